// ==============================================================================
// ground_contact.rs — WHEEL-ANCHOR GROUND SAMPLING
// ------------------------------------------------------------------------------
// Casts one short ray straight down per wheel anchor and reports only the
// fraction of anchors touching a surface. No spring/damper forces here; the
// drive model consumes the fraction to scale drive, steering and grip.
//
// Main entry:
// - sample_ground_percent(...)
//     Transforms each local anchor into world space, casts a ray of length
//     `cast_distance`, excludes the kart's own body, and returns
//     hits / anchors through grounded_fraction().
// ==============================================================================

use rapier3d::prelude::*;

/// Grounded wheels over total wheels. An empty anchor set is defined as 0
/// (fully airborne) instead of propagating 0/0.
#[inline]
pub fn grounded_fraction(grounded: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        grounded as f32 / total as f32
    }
}

pub fn sample_ground_percent(
    anchors: &[Point<Real>],
    cast_distance: Real,
    body: &RigidBody,
    handle: RigidBodyHandle,
    query: &QueryPipeline,
    bodies: &RigidBodySet,
    colliders: &ColliderSet,
) -> f32 {
    let pos = body.position();
    let dir: Vector<Real> = vector![0.0, -1.0, 0.0];
    let filter = QueryFilter::default().exclude_rigid_body(handle);

    let mut grounded = 0;

    for anchor in anchors {
        let origin = pos * anchor;
        let ray = Ray::new(origin, dir);

        if query
            .cast_ray(bodies, colliders, &ray, cast_distance, true, filter)
            .is_some()
        {
            grounded += 1;
        }
    }

    grounded_fraction(grounded, anchors.len())
}
