//! Deterministic simulation module
//!
//! All board physics lives here. This module must be pure and deterministic:
//! - Fixed timestep, one tick per call
//! - Fixed initial layouts, no randomness
//! - Stable iteration order (coins in rack order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod predict;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, resolve_elastic};
pub use predict::{ShotPlan, predict_best_shot, trace_trajectory};
pub use state::{
    Body, BodyKind, BoundaryPolicy, CoinColor, Pocket, SimError, SimEvent, WorldState,
};
pub use tick::tick;
