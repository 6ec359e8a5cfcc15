//! Core shared types for `kart` (engine-agnostic).
// kart/types.rs

pub type Vec2 = [f32; 2];
pub type Vec3 = [f32; 3];

// ----- tiny vec helpers (avoid pulling a math crate into the drive model) -----
#[inline] pub fn v_add(a: Vec3, b: Vec3) -> Vec3 { [a[0]+b[0], a[1]+b[1], a[2]+b[2]] }
#[inline] pub fn v_sub(a: Vec3, b: Vec3) -> Vec3 { [a[0]-b[0], a[1]-b[1], a[2]-b[2]] }
#[inline] pub fn v_scale(v: Vec3, s: f32) -> Vec3 { [v[0]*s, v[1]*s, v[2]*s] }
#[inline] pub fn v_dot(a: Vec3, b: Vec3) -> f32 { a[0]*b[0] + a[1]*b[1] + a[2]*b[2] }
#[inline] pub fn v_mag(v: Vec3) -> f32 { v_dot(v, v).sqrt() }

#[inline] pub fn v2_sqr_mag(v: Vec2) -> f32 { v[0]*v[0] + v[1]*v[1] }

#[inline]
pub fn v_cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1]*b[2] - a[2]*b[1],
        a[2]*b[0] - a[0]*b[2],
        a[0]*b[1] - a[1]*b[0],
    ]
}

/// Rodrigues rotation of `v` by `angle` radians about a unit `axis`.
#[inline]
pub fn v_rotate_about(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    let term1 = v_scale(v, cos);
    let term2 = v_scale(v_cross(axis, v), sin);
    let term3 = v_scale(axis, v_dot(axis, v) * (1.0 - cos));
    v_add(v_add(term1, term2), term3)
}

/// Linear interpolation with the parameter clamped to [0, 1].
#[inline]
pub fn lerp_clamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Move `current` toward `target` by at most `max_delta` (never overshoots).
#[inline]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + max_delta.copysign(delta)
    }
}

// ============================================
// ----- per-tick derived state ---------------
// ============================================

/// Player intent + ground contact for one fixed step. Recomputed every tick,
/// never stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInputs {
    pub turn: f32,           // -1..1 (steer axis)
    pub throttle: f32,       // -1..1 (accelerate / reverse axis)
    pub ground_percent: f32, // 0..1 (grounded wheels / total wheels)
}

/// Direction flags derived from throttle intent vs. actual motion.
#[derive(Debug, Clone, Copy)]
pub struct DriveFlags {
    pub accelerating_forward: bool, // throttle >= 0
    pub velocity_forward: bool,     // forward-local velocity component >= 0
}

impl DriveFlags {
    #[inline]
    pub fn new(throttle: f32, forward_velocity: f32) -> Self {
        Self {
            accelerating_forward: throttle >= 0.0,
            velocity_forward: forward_velocity >= 0.0,
        }
    }

    /// Braking = commanding throttle against the current direction of motion
    /// (as opposed to reversing from rest or while already rolling backward).
    #[inline]
    pub fn braking(&self) -> bool {
        self.accelerating_forward != self.velocity_forward
    }
}
