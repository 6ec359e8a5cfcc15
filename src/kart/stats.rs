// ==============================================================================
// stats.rs — KART TUNING COEFFICIENTS
// ------------------------------------------------------------------------------
// All fields are authored as-is; only Grip and Suspension get clamped to [0,1]
// when the config is finalized. CoastingDrag, AddedGravity and Suspension are
// carried for forward compatibility (airborne/coasting behavior) but are not
// consumed by any motion equation yet.
// ==============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub top_speed: f32,            // maximum forward speed (m/s)
    pub acceleration: f32,         // how quickly top speed is reached
    pub reverse_speed: f32,        // maximum backward speed (m/s)
    pub reverse_acceleration: f32, // how quickly backward speed builds
    pub acceleration_curve: f32,   // low-speed boost shaping, authored range (0.2, 1]
    pub braking: f32,              // deceleration when throttling against motion
    pub coasting_drag: f32,        // reserved (not consumed yet)
    pub grip: f32,                 // side-to-side friction, 0..1 after finalize
    pub steer: f32,                // steering strength (degrees of forward tilt at full turn)
    pub added_gravity: f32,        // reserved for airborne behavior (not consumed yet)
    pub suspension: f32,           // reserved, 0..1 after finalize (not consumed yet)
}

impl Default for Stats {
    fn default() -> Self {
        BASE_STATS
    }
}

pub const BASE_STATS: Stats = Stats {
    top_speed: 10.0,
    acceleration: 5.0,
    reverse_speed: 5.0,
    reverse_acceleration: 5.0,
    acceleration_curve: 4.0,
    braking: 10.0,
    coasting_drag: 4.0,
    grip: 0.95,
    steer: 5.0,
    added_gravity: 1.0,
    suspension: 0.2,
};

impl Stats {
    /// Clamp the ratio-valued fields into range. Everything else passes
    /// through as authored; out-of-range tuning shows up as behavior, not as
    /// an error. Idempotent, called once before the first tick.
    pub fn finalize(mut self) -> Self {
        self.grip = self.grip.clamp(0.0, 1.0);
        self.suspension = self.suspension.clamp(0.0, 1.0);
        self
    }
}
