//! World state and core simulation types
//!
//! The whole board lives in one owned `WorldState`; there are no globals.
//! Rendering reads positions after a tick, input lands through the gated
//! `apply_shot` / `set_striker_x` methods between shots.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::Tuning;
use crate::shot_velocity;

/// Cosmetic coin tag; not load-bearing for physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinColor {
    White,
    Black,
    Red,
}

/// What a body is, which decides its boundary policy and speed clamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Striker,
    Coin(CoinColor),
}

/// How a body interacts with the board edge.
///
/// The two policies are deliberate, per body kind:
/// - the striker reflects without a position clamp and may briefly overshoot
///   past the edge (legacy behavior, kept for fidelity);
/// - coins reflect and clamp into `[radius, dim - radius]` so they never
///   tunnel visually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    ReflectUnclamped,
    ReflectClamped,
}

impl BodyKind {
    /// Boundary policy for this kind of body
    pub fn boundary_policy(&self) -> BoundaryPolicy {
        match self {
            BodyKind::Striker => BoundaryPolicy::ReflectUnclamped,
            BodyKind::Coin(_) => BoundaryPolicy::ReflectClamped,
        }
    }
}

/// A disk-shaped movable body (striker or coin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Stable identifier; 0 is the striker, coins are numbered from 1 in
    /// rack order
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// False once absorbed by a pocket. An inactive body is excluded from
    /// integration, collision, and prediction. Coins never re-activate;
    /// the striker re-activates on reset.
    pub active: bool,
    pub kind: BodyKind,
}

impl Body {
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A fixed absorbing zone at a board corner
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pocket {
    pub pos: Vec2,
}

/// Observable signals for the rendering/input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// Striker speed dropped below the stop epsilon; it has been reset to
    /// the launch point and shot input may be re-enabled
    StrikerStopped,
    /// Striker fell into a pocket; it has been reset to the launch point
    /// and shot input may be re-enabled
    StrikerPocketed,
    /// A coin fell into a pocket and is permanently out of play
    CoinPocketed { id: u32 },
}

/// Rejections for the gated input surface
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// Shot or placement input arrived while the striker is still moving
    #[error("striker is in motion; input is only accepted between shots")]
    StrikerInMotion,
    /// NaN or infinite input would silently poison position state
    #[error("non-finite input: {what}")]
    NonFiniteInput { what: &'static str },
}

/// The complete board state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub tuning: Tuning,
    pub striker: Body,
    /// Coins in rack order; order is the collision-iteration and
    /// prediction tie-break order. Pocketed coins stay in the list
    /// (inactive) so their ids remain resolvable.
    pub coins: Vec<Body>,
    pub pockets: [Pocket; 4],
    /// Gates shot and placement input; set by `apply_shot`, cleared when
    /// the striker stops or is pocketed
    pub striker_in_motion: bool,
    /// Tick counter, for logging and inspection
    pub time_ticks: u64,
}

impl WorldState {
    /// Build the initial board from a tuning configuration
    pub fn new(tuning: Tuning) -> Self {
        let striker = Body {
            id: 0,
            pos: tuning.striker_spawn,
            vel: Vec2::ZERO,
            radius: tuning.striker_radius,
            active: true,
            kind: BodyKind::Striker,
        };

        let coins = tuning
            .rack
            .iter()
            .enumerate()
            .map(|(i, spawn)| Body {
                id: i as u32 + 1,
                pos: spawn.pos,
                vel: Vec2::ZERO,
                radius: tuning.coin_radius,
                active: true,
                kind: BodyKind::Coin(spawn.color),
            })
            .collect();

        let pockets = tuning.pocket_positions().map(|pos| Pocket { pos });

        Self {
            tuning,
            striker,
            coins,
            pockets,
            striker_in_motion: false,
            time_ticks: 0,
        }
    }

    /// Launch the striker.
    ///
    /// Only valid between shots; rejected while the striker is in motion so
    /// a mid-flight call can never corrupt its velocity.
    pub fn apply_shot(&mut self, angle_deg: f32, speed: f32) -> Result<(), SimError> {
        if self.striker_in_motion {
            return Err(SimError::StrikerInMotion);
        }
        if !angle_deg.is_finite() {
            return Err(SimError::NonFiniteInput { what: "angle" });
        }
        if !speed.is_finite() {
            return Err(SimError::NonFiniteInput { what: "speed" });
        }

        self.striker.vel = shot_velocity(angle_deg, speed);
        self.striker_in_motion = true;
        log::debug!(
            "shot applied: angle {angle_deg:.2} deg, speed {speed:.2}, vel {:?}",
            self.striker.vel
        );
        Ok(())
    }

    /// Pre-shot horizontal placement of the striker.
    ///
    /// Same gating as `apply_shot`. The x position is clamped so the disk
    /// stays on the board.
    pub fn set_striker_x(&mut self, x: f32) -> Result<(), SimError> {
        if self.striker_in_motion {
            return Err(SimError::StrikerInMotion);
        }
        if !x.is_finite() {
            return Err(SimError::NonFiniteInput { what: "x" });
        }

        let r = self.striker.radius;
        self.striker.pos.x = x.clamp(r, self.tuning.board_size.x - r);
        Ok(())
    }

    /// Return the striker to the launch point with zero velocity
    pub fn reset_striker(&mut self) {
        self.striker.pos = self.tuning.striker_reset;
        self.striker.vel = Vec2::ZERO;
        self.striker.active = true;
        self.striker_in_motion = false;
    }

    /// Active coins in rack order
    pub fn active_coins(&self) -> impl Iterator<Item = &Body> {
        self.coins.iter().filter(|c| c.active)
    }

    /// Look up a coin by id (active or not)
    pub fn coin(&self, id: u32) -> Option<&Body> {
        self.coins.iter().find(|c| c.id == id)
    }
}
