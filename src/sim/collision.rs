//! Circle-circle collision detection and elastic response
//!
//! Bodies are point-mass disks with implicit mass 1, so the normal velocity
//! components simply swap on impact. There is no size-dependent momentum;
//! a heavy striker and a light coin exchange normal velocities identically.

use glam::Vec2;

use super::state::Body;

/// True iff two circles overlap (strict: exact tangency is not a collision)
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Resolve an elastic collision between two overlapping bodies.
///
/// Classic equal-mass elastic swap: velocities are decomposed along the
/// contact normal and tangent, the normal components are exchanged, and
/// the tangential components pass through unchanged. Both bodies are then
/// pushed apart along the normal by half the overlap depth each so they
/// don't re-collide on the next tick.
///
/// Coincident centers (distance == 0) are a defined no-op: there is no
/// normal to resolve along.
pub fn resolve_elastic(a: &mut Body, b: &mut Body) {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    if distance == 0.0 {
        return;
    }

    let normal = delta / distance;
    let tangent = Vec2::new(-normal.y, normal.x);

    let a_normal = normal.dot(a.vel);
    let b_normal = normal.dot(b.vel);
    let a_tangent = tangent.dot(a.vel);
    let b_tangent = tangent.dot(b.vel);

    // Swap normal components, keep tangential ones
    a.vel = normal * b_normal + tangent * a_tangent;
    b.vel = normal * a_normal + tangent * b_tangent;

    // Positional correction: half the overlap each
    let overlap = a.radius + b.radius - distance;
    a.pos -= normal * (overlap / 2.0);
    b.pos += normal * (overlap / 2.0);
}
