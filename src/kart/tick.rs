// ==============================================================================
// tick.rs — DRIVE TICK ORCHESTRATOR
// ------------------------------------------------------------------------------
// Sequences the drive models once per fixed step, purely on numbers:
// 1) derive direction flags from throttle vs. local forward velocity
// 2) tilt the chassis forward direction by turningPower degrees about up
// 3) longitudinal acceleration (longitudinal.rs), scaled by ground percent,
//    integrated into velocity; the vertical component is then restored so
//    gravity stays entirely with the rigid-body integrator
// 4) grounded only: smooth the yaw rate toward its target (steering.rs) and
//    damp lateral velocity (friction.rs)
// Fully airborne karts keep whatever linear/angular motion they already had.
//
// The host owns the rigid body; this module never touches position or
// orientation. World is y-up.
// ==============================================================================

use crate::kart::friction::apply_lateral_friction;
use crate::kart::longitudinal::compute_acceleration;
use crate::kart::stats::Stats;
use crate::kart::steering::{smooth_yaw, yaw_rate_target};
use crate::kart::types::{
    v_add, v_dot, v_mag, v_rotate_about, v_scale, DriveFlags, TickInputs, Vec3,
};

/// Rigid-body state read at the start of a tick. `forward` and `up` are the
/// chassis basis in world space (unit vectors).
#[derive(Debug, Clone, Copy)]
pub struct BodyState {
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
}

/// Velocity / angular velocity to hand back to the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveOutput {
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
}

pub fn drive_tick(stats: &Stats, inputs: TickInputs, body: &BodyState, dt: f32) -> DriveOutput {
    let flags = DriveFlags::new(inputs.throttle, v_dot(body.velocity, body.forward));

    let acceleration = compute_acceleration(v_mag(body.velocity), flags, stats);

    // steered forward: chassis forward tilted by turningPower degrees about up
    let turning_power = inputs.turn * stats.steer;
    let forward = v_rotate_about(body.forward, body.up, turning_power.to_radians());

    let movement = v_scale(
        forward,
        inputs.throttle * acceleration * inputs.ground_percent,
    );

    let mut velocity = v_add(body.velocity, v_scale(movement, dt));
    velocity[1] = body.velocity[1]; // vertical motion belongs to the integrator

    let mut angular_velocity = body.angular_velocity;

    if inputs.ground_percent > 0.0 {
        let target = yaw_rate_target(turning_power, flags);
        angular_velocity[1] = smooth_yaw(angular_velocity[1], target, dt);

        velocity = apply_lateral_friction(velocity, forward, body.up, stats.grip, dt);
    }

    DriveOutput {
        velocity,
        angular_velocity,
    }
}

/// Signed speed as a fraction of the applicable max speed, for UI/animation.
/// While the kart is immobilized the raw throttle is reported instead, so
/// feedback still follows driver intent. A small dot-product dead zone
/// suppresses jitter near standstill.
pub fn local_speed_fraction(
    can_move: bool,
    throttle_input: f32,
    velocity: Vec3,
    forward: Vec3,
    stats: &Stats,
) -> f32 {
    if !can_move {
        return throttle_input;
    }

    let dot = v_dot(forward, velocity);
    if dot.abs() <= 0.1 {
        return 0.0;
    }

    let speed = v_mag(velocity);
    if dot < 0.0 {
        -(speed / stats.reverse_speed)
    } else {
        speed / stats.top_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FWD: Vec3 = [0.0, 0.0, 1.0];
    const UP: Vec3 = [0.0, 1.0, 0.0];

    fn resting_body() -> BodyState {
        BodyState {
            velocity: [0.0; 3],
            angular_velocity: [0.0; 3],
            forward: FWD,
            up: UP,
        }
    }

    #[test]
    fn full_throttle_from_rest_gains_expected_forward_speed() {
        // Acceleration 5 * (Curve 4 * 5) * throttle 1 * ground 1 * dt 0.02 = 2.0
        let stats = Stats::default();
        let inputs = TickInputs { turn: 0.0, throttle: 1.0, ground_percent: 1.0 };

        let out = drive_tick(&stats, inputs, &resting_body(), 0.02);

        assert!((out.velocity[2] - 2.0).abs() < 1e-5);
        assert_eq!(out.velocity[0], 0.0);
        assert_eq!(out.velocity[1], 0.0);
    }

    #[test]
    fn vertical_velocity_is_always_restored() {
        let stats = Stats::default();
        let mut body = resting_body();
        body.velocity = [0.0, -3.0, 0.0]; // falling
        let inputs = TickInputs { turn: 0.0, throttle: 1.0, ground_percent: 1.0 };

        let out = drive_tick(&stats, inputs, &body, 0.02);

        assert_eq!(out.velocity[1], -3.0);
    }

    #[test]
    fn airborne_kart_keeps_its_motion() {
        let stats = Stats::default();
        let mut body = resting_body();
        body.velocity = [2.0, -1.0, 4.0];
        body.angular_velocity = [0.0, 1.5, 0.0];
        let inputs = TickInputs { turn: 1.0, throttle: 1.0, ground_percent: 0.0 };

        let out = drive_tick(&stats, inputs, &body, 0.02);

        // no drive (scaled by ground percent), no steering, no friction
        assert_eq!(out.velocity, body.velocity);
        assert_eq!(out.angular_velocity, body.angular_velocity);
    }

    #[test]
    fn partial_ground_contact_scales_the_drive() {
        let stats = Stats::default();
        let full = TickInputs { turn: 0.0, throttle: 1.0, ground_percent: 1.0 };
        let half = TickInputs { ground_percent: 0.5, ..full };

        let v_full = drive_tick(&stats, full, &resting_body(), 0.02).velocity[2];
        let v_half = drive_tick(&stats, half, &resting_body(), 0.02).velocity[2];

        assert!((v_half - v_full * 0.5).abs() < 1e-6);
    }

    #[test]
    fn grounded_turn_builds_yaw_rate_toward_target() {
        let stats = Stats::default();
        let dt = 0.02;
        let inputs = TickInputs { turn: 1.0, throttle: 1.0, ground_percent: 1.0 };
        let mut body = resting_body();
        body.velocity = [0.0, 0.0, 1.0];

        let out = drive_tick(&stats, inputs, &body, dt);

        // target = turn * Steer * 0.4 = 2.0, rate-limited to 20 * dt = 0.4
        assert!((out.angular_velocity[1] - 0.4).abs() < 1e-6);
        assert_eq!(out.angular_velocity[0], 0.0);
        assert_eq!(out.angular_velocity[2], 0.0);
    }

    #[test]
    fn repeated_ticks_saturate_yaw_rate_at_target() {
        let stats = Stats::default();
        let dt = 0.02;
        let inputs = TickInputs { turn: 1.0, throttle: 1.0, ground_percent: 1.0 };
        let mut body = resting_body();
        body.velocity = [0.0, 0.0, 1.0];

        for _ in 0..20 {
            let out = drive_tick(&stats, inputs, &body, dt);
            body.velocity = out.velocity;
            body.angular_velocity = out.angular_velocity;
        }

        assert!((body.angular_velocity[1] - 2.0).abs() < 1e-4);
    }

    #[test]
    fn speed_fraction_dead_zone() {
        let stats = Stats::default();
        // |dot| = 0.1 is still inside the dead zone
        let f = local_speed_fraction(true, 1.0, [0.0, 0.0, 0.1], FWD, &stats);
        assert_eq!(f, 0.0);
        let f = local_speed_fraction(true, 1.0, [5.0, 0.0, 0.05], FWD, &stats);
        assert_eq!(f, 0.0);
    }

    #[test]
    fn speed_fraction_signs_and_scales() {
        let stats = Stats::default(); // top 10, reverse 5
        let fwd = local_speed_fraction(true, 0.0, [0.0, 0.0, 5.0], FWD, &stats);
        assert!((fwd - 0.5).abs() < 1e-6);
        let back = local_speed_fraction(true, 0.0, [0.0, 0.0, -2.5], FWD, &stats);
        assert!((back + 0.5).abs() < 1e-6);
    }

    #[test]
    fn immobilized_kart_reports_throttle_intent() {
        let stats = Stats::default();
        let f = local_speed_fraction(false, -0.75, [0.0, 0.0, 9.0], FWD, &stats);
        assert_eq!(f, -0.75);
    }
}
