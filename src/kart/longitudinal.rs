// ==============================================================================
// longitudinal.rs — LONGITUDINAL DRIVE MODEL
// ------------------------------------------------------------------------------
// Converts throttle intent + current speed into a signed acceleration
// magnitude along the steered forward direction:
// 1) pick max speed / base power for the commanded direction
// 2) ramp fraction = speed / max speed (squared into the curve lerp, so the
//    boost is strongest at standstill and saturates at top speed)
// 3) braking (throttle against motion) swaps the base power for Braking
//
// Output is a magnitude; the orchestrator multiplies throttle and ground
// percent back in when integrating.
// ==============================================================================

use crate::kart::stats::Stats;
use crate::kart::types::{lerp_clamped, DriveFlags};

/// Fixed design scalar applied to AccelerationCurve. Tuning, not config.
const ACCELERATION_CURVE_COEFF: f32 = 5.0;

/// Below this max speed the ramp is skipped entirely (un-ramped base power)
/// instead of dividing by ~zero.
const MIN_RAMP_MAX_SPEED: f32 = 1e-4;

pub fn compute_acceleration(current_speed: f32, flags: DriveFlags, stats: &Stats) -> f32 {
    // max speed and base power for the direction we are commanding
    let max_speed = if flags.accelerating_forward {
        stats.top_speed
    } else {
        stats.reverse_speed
    };
    let base_power = if flags.accelerating_forward {
        stats.acceleration
    } else {
        stats.reverse_acceleration
    };

    let accel_ramp = if max_speed.abs() > MIN_RAMP_MAX_SPEED {
        let ramp_time = current_speed / max_speed;
        let curve_scalar = stats.acceleration_curve * ACCELERATION_CURVE_COEFF;
        lerp_clamped(curve_scalar, 1.0, ramp_time * ramp_time)
    } else {
        1.0
    };

    // throttling against the current motion is braking, not driving
    let final_power = if flags.braking() { stats.braking } else { base_power };

    final_power * accel_ramp
}
