//! Precomputed decision tables.
//!
//! A [`LookupTable`] holds one [`StrategyGrid`] per dealer up-card. Each grid
//! covers every two-card starting hand (2..=11 × 2..=11) and stores the
//! engine's win / stand / hit probabilities plus a recommended action, so a
//! front end can look decisions up instead of running the recursion.
//!
//! Tables are produced by repeatedly calling
//! [`ProbabilityEngine::evaluate_all`](crate::engine::ProbabilityEngine::evaluate_all)
//! and are saved as JSON.

pub mod grid;
pub mod output;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{ConfigError, EngineError, HandValue, Outcome};

pub use grid::{GridCell, StrategyGrid};
pub use output::{LookupTable, TableMetadata};

/// Totals at or below this always hit: no single card can bust them.
pub const ALWAYS_HIT_MAX: u8 = 11;

/// Recommended play for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Take another card.
    Hit,
    /// Keep the current total.
    Stand,
}

impl Action {
    /// Pick an action for a hand worth `value`.
    ///
    /// A busted hand has nothing left to play and stands. Low totals always
    /// hit. Otherwise hit when the hit share of the win probability beats
    /// the stand share.
    pub fn recommend(outcome: &Outcome, value: HandValue) -> Self {
        if value.is_bust() {
            return Action::Stand;
        }
        if value.high() <= ALWAYS_HIT_MAX {
            return Action::Hit;
        }
        let (hit_ratio, stand_ratio) = ratios(outcome);
        if hit_ratio > stand_ratio {
            Action::Hit
        } else {
            Action::Stand
        }
    }

    /// Short label for grids.
    pub fn label(self) -> &'static str {
        match self {
            Action::Hit => "Hit",
            Action::Stand => "Stand",
        }
    }
}

/// `hit / win` and `stand / win`, both 0 when the hand cannot win.
pub fn ratios(outcome: &Outcome) -> (f64, f64) {
    if outcome.win > 0.0 {
        (outcome.hit / outcome.win, outcome.stand / outcome.win)
    } else {
        (0.0, 0.0)
    }
}

/// Errors from building, saving or loading tables.
#[derive(Debug, Error)]
pub enum TableError {
    /// The shoe cannot supply a cell's cards.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// Engine configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// File could not be read or written.
    #[error("table I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("table JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}
