// ==============================================================================
// friction.rs — LATERAL FRICTION (GRIP) MODEL
// ------------------------------------------------------------------------------
// Damps the velocity component perpendicular to the steered forward
// direction. This is an explicit-Euler step, not an exact zeroing: with
// grip * GRIP_COEFF * dt >= 2 the lateral velocity overshoots and inverts.
// That overshoot is a known characteristic of this family of arcade friction
// models and downstream tuning relies on it; do not clamp it away.
// ==============================================================================

use crate::kart::types::{v_cross, v_dot, v_scale, v_sub, Vec3};

/// Fixed lateral friction gain. Tuning, not config.
const GRIP_COEFF: f32 = 30.0;

pub fn apply_lateral_friction(
    velocity: Vec3,
    forward: Vec3,
    up: Vec3,
    grip: f32,
    dt: f32,
) -> Vec3 {
    let lat_direction = v_cross(forward, up);
    let lat_speed = v_dot(velocity, lat_direction);
    v_sub(velocity, v_scale(lat_direction, lat_speed * grip * GRIP_COEFF * dt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kart::types::v_mag;

    const FWD: Vec3 = [0.0, 0.0, 1.0];
    const UP: Vec3 = [0.0, 1.0, 0.0];

    #[test]
    fn pure_forward_velocity_is_untouched() {
        let vel = [0.0, 0.0, 7.0];
        let damped = apply_lateral_friction(vel, FWD, UP, 1.0, 0.02);
        assert_eq!(damped, vel);
    }

    #[test]
    fn lateral_speed_decays_monotonically_in_the_stable_regime() {
        // grip * 30 * dt = 0.3 < 2, so |lateral| must shrink every step
        let dt = 0.01;
        let mut vel = [3.0, 0.0, 0.0];
        let mut previous = 3.0_f32;

        for _ in 0..200 {
            vel = apply_lateral_friction(vel, FWD, UP, 1.0, dt);
            let lat = v_dot(vel, v_cross(FWD, UP)).abs();
            assert!(lat < previous);
            previous = lat;
        }

        assert!(previous < 1e-3);
    }

    #[test]
    fn vertical_component_is_preserved() {
        let vel = [2.0, -4.0, 5.0];
        let damped = apply_lateral_friction(vel, FWD, UP, 1.0, 0.02);
        assert_eq!(damped[1], vel[1]);
        assert_eq!(damped[2], vel[2]);
        assert!(damped[0].abs() < vel[0].abs());
    }

    #[test]
    fn zero_grip_means_no_damping() {
        let vel = [3.0, 0.0, 1.0];
        let damped = apply_lateral_friction(vel, FWD, UP, 0.0, 0.02);
        assert_eq!(v_mag(v_sub(damped, vel)), 0.0);
    }

    #[test]
    fn large_grip_dt_product_overshoots_by_design() {
        // grip * 30 * dt = 3 > 2: lateral velocity inverts instead of settling
        let vel = [1.0, 0.0, 0.0];
        let damped = apply_lateral_friction(vel, FWD, UP, 1.0, 0.1);
        let lat = v_dot(damped, v_cross(FWD, UP));
        let lat_before = v_dot(vel, v_cross(FWD, UP));
        assert!(lat.signum() != lat_before.signum());
    }
}
