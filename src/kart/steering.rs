// ==============================================================================
// steering.rs — STEERING & YAW MODEL
// ------------------------------------------------------------------------------
// Converts the turn axis into a target yaw rate and smooths the current yaw
// rate toward it:
// - turningPower = turn * Steer (also the steered-forward tilt, in degrees)
// - target yaw rate = turningPower * 0.4, sign-flipped while reversing so the
//   perceived steering direction stays consistent
// - smoothing is linear move-towards, max step 20/s * dt (not exponential)
// Only the yaw component of angular velocity is ever touched.
// ==============================================================================

use crate::kart::types::{move_towards, DriveFlags};

/// Base steering sensitivity (yaw rate per unit of turning power).
const ANGULAR_VELOCITY_STEERING: f32 = 0.4;

/// Max yaw-rate change per second while smoothing toward the target.
const ANGULAR_VELOCITY_SMOOTH_SPEED: f32 = 20.0;

/// Target yaw rate for the given turning power (`turn * Steer`).
pub fn yaw_rate_target(turning_power: f32, flags: DriveFlags) -> f32 {
    let mut steering = ANGULAR_VELOCITY_STEERING;

    // rolling backward under reverse throttle: flip so left stays left
    if !flags.velocity_forward && !flags.accelerating_forward {
        steering = -steering;
    }

    turning_power * steering
}

/// One smoothing step of the yaw rate toward `target`.
pub fn smooth_yaw(current: f32, target: f32, dt: f32) -> f32 {
    move_towards(current, target, ANGULAR_VELOCITY_SMOOTH_SPEED * dt)
}
