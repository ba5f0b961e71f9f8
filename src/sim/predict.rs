//! Best-shot heuristic and trajectory trace
//!
//! The predictor scores every active coin against every pocket by straight
//! line path length and aims at the cheapest pair. It never checks whether
//! another coin blocks the path; that is a known limitation of the
//! heuristic, not a bug.

use glam::Vec2;

use super::state::{SimError, WorldState};
use crate::{aim_angle_deg, shot_velocity};

/// A suggested shot: which coin to hit, toward which pocket, at what angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotPlan {
    pub coin_id: u32,
    /// Center of the target pocket
    pub pocket: Vec2,
    /// Aim angle in degrees, ready for `WorldState::apply_shot`
    pub angle_deg: f32,
    /// Straight-line score: dist(coin, pocket) + dist(striker, coin)
    pub path_length: f32,
}

/// Pick the coin/pocket pair with the shortest total straight-line path.
///
/// Read-only. Ties break to the first pair found in iteration order (coins
/// in rack order, pockets in corner order), deterministically across calls.
/// Returns `None` when no coin is in play.
pub fn predict_best_shot(state: &WorldState) -> Option<ShotPlan> {
    let mut best: Option<ShotPlan> = None;

    for coin in state.active_coins() {
        for pocket in &state.pockets {
            let path_length =
                coin.pos.distance(pocket.pos) + state.striker.pos.distance(coin.pos);

            if best.as_ref().is_none_or(|b| path_length < b.path_length) {
                best = Some(ShotPlan {
                    coin_id: coin.id,
                    pocket: pocket.pos,
                    angle_deg: aim_angle_deg(state.striker.pos, coin.pos),
                    path_length,
                });
            }
        }
    }

    if let Some(plan) = &best {
        log::debug!(
            "best shot: coin {} via pocket {:?}, angle {:.2} deg, path {:.1}",
            plan.coin_id,
            plan.pocket,
            plan.angle_deg,
            plan.path_length
        );
    }
    best
}

/// Simulate a launch forward without walls or collisions, for an aim guide.
///
/// Pure function: `steps` predicted positions starting one step after
/// `start`, with the same per-step friction decay the real integrator
/// applies. Non-finite inputs are rejected rather than letting NaN walk
/// through the points.
pub fn trace_trajectory(
    start: Vec2,
    angle_deg: f32,
    speed: f32,
    friction: f32,
    steps: usize,
) -> Result<Vec<Vec2>, SimError> {
    if !angle_deg.is_finite() {
        return Err(SimError::NonFiniteInput { what: "angle" });
    }
    if !speed.is_finite() {
        return Err(SimError::NonFiniteInput { what: "speed" });
    }

    let mut points = Vec::with_capacity(steps);
    let mut pos = start;
    let mut vel = shot_velocity(angle_deg, speed);
    for _ in 0..steps {
        pos += vel;
        vel *= friction;
        points.push(pos);
    }
    Ok(points)
}

impl WorldState {
    /// Trajectory trace from the striker's current position, using the
    /// tuned friction and step count
    pub fn trace_from_striker(
        &self,
        angle_deg: f32,
        speed: f32,
    ) -> Result<Vec<Vec2>, SimError> {
        trace_trajectory(
            self.striker.pos,
            angle_deg,
            speed,
            self.tuning.friction,
            self.tuning.trace_steps,
        )
    }
}
