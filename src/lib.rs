//! Carrom Sim - a carrom-style board physics engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, collisions, pockets, prediction)
//! - `tuning`: Data-driven physics constants and board layout
//!
//! Rendering and input handling are external collaborators: they read body
//! positions after a tick completes and feed shot parameters between shots.
//! Nothing in this crate touches a screen.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * 180.0 / std::f32::consts::PI
}

/// Aim angle in degrees from `from` toward `to`.
///
/// Board coordinates grow downward (+y is down) while the angle convention
/// treats "up" as positive, so the y delta is negated.
#[inline]
pub fn aim_angle_deg(from: Vec2, to: Vec2) -> f32 {
    rad_to_deg((-(to.y - from.y)).atan2(to.x - from.x))
}

/// Velocity vector for a shot at `angle_deg` degrees and `speed` units/tick.
///
/// Inverse of [`aim_angle_deg`]: the y component is negated so a positive
/// angle launches up-screen.
#[inline]
pub fn shot_velocity(angle_deg: f32, speed: f32) -> Vec2 {
    let radians = deg_to_rad(angle_deg);
    Vec2::new(speed * radians.cos(), -speed * radians.sin())
}
