//! Data-driven physics tuning and board layout
//!
//! Everything the simulation treats as a constant lives here so layouts and
//! physics feel can be swapped without code changes. `Default` is the
//! reference configuration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::CoinColor;

/// Initial placement of a single coin in the rack
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoinSpawn {
    pub color: CoinColor,
    pub pos: Vec2,
}

/// Physics constants and board layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Per-tick velocity multiplier (0 < friction < 1)
    pub friction: f32,
    /// Board width and height (square board)
    pub board_size: Vec2,
    /// Striker disk radius
    pub striker_radius: f32,
    /// Coin disk radius
    pub coin_radius: f32,
    /// Pocket absorption radius
    pub pocket_radius: f32,
    /// Maximum striker speed in units/tick (coins are not clamped)
    pub max_striker_speed: f32,
    /// Per-axis speed below which the striker is considered stopped
    pub stop_epsilon: f32,
    /// Where the striker first appears
    pub striker_spawn: Vec2,
    /// Where the striker returns after stopping or pocketing.
    ///
    /// Deliberately independent from `striker_spawn`: the reference
    /// configuration spawns at (238,460) but resets to (238,419).
    pub striker_reset: Vec2,
    /// Number of points produced by the trajectory trace
    pub trace_steps: usize,
    /// Coin rack layout, in collision-iteration order
    pub rack: Vec<CoinSpawn>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            friction: 0.98,
            board_size: Vec2::new(460.0, 460.0),
            striker_radius: 20.0,
            coin_radius: 15.0,
            pocket_radius: 25.0,
            max_striker_speed: 20.0,
            stop_epsilon: 0.1,
            striker_spawn: Vec2::new(238.0, 460.0),
            striker_reset: Vec2::new(238.0, 419.0),
            trace_steps: 50,
            rack: vec![
                CoinSpawn { color: CoinColor::White, pos: Vec2::new(230.0, 180.0) },
                CoinSpawn { color: CoinColor::White, pos: Vec2::new(260.0, 180.0) },
                CoinSpawn { color: CoinColor::Black, pos: Vec2::new(200.0, 230.0) },
                CoinSpawn { color: CoinColor::White, pos: Vec2::new(250.0, 180.0) },
                CoinSpawn { color: CoinColor::Red, pos: Vec2::new(230.0, 230.0) },
            ],
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize tuning to a pretty JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Corner pocket centers for this board size
    pub fn pocket_positions(&self) -> [Vec2; 4] {
        [
            Vec2::new(0.0, 0.0),
            Vec2::new(self.board_size.x, 0.0),
            Vec2::new(0.0, self.board_size.y),
            Vec2::new(self.board_size.x, self.board_size.y),
        ]
    }
}
