//! # Blackjack Odds
//!
//! Exact outcome probabilities for blackjack decisions over a finite deck,
//! drawing without replacement.
//!
//! ## Features
//!
//! - **Exact Enumeration**: Every draw sequence is walked, weighted by the
//!   remaining composition; no sampling
//! - **Soft Aces**: Hands carry both totals while an ace can still count 11
//! - **Bounded Memoization**: Shared LRU cache keyed by query, deck and hand
//! - **Lookup Tables**: Precompute every starting hand against every up-card
//!
//! ## Quick Start
//!
//! ```
//! use blackjack_odds::{Deck, Hand, ProbabilityEngine, Rank};
//!
//! let engine = ProbabilityEngine::default();
//! let player = Hand::from_ranks(vec![Rank::TEN, Rank::SIX]);
//! let dealer = Hand::from_ranks(vec![Rank::TEN]);
//!
//! let mut deck = Deck::single();
//! deck.remove_all(&[Rank::TEN, Rank::SIX, Rank::TEN]).unwrap();
//!
//! let outcome = engine.evaluate_all(&deck, &player, &dealer);
//! println!("win {:.3} stand {:.3} hit {:.3}", outcome.win, outcome.stand, outcome.hit);
//! ```
//!
//! ## Modules
//!
//! - [`engine`]: Cards, hands, decks and the probability engine
//! - [`tables`]: Precomputed decision grids
//! - [`play`]: Rounds played by following the engine
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      ProbabilityEngine                          │
//! │  - Draw-tree recursion    - Bounded LRU cache                   │
//! │  - Dealer / player models - Win / stand / hit composition       │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ evaluate_all per cell
//!                               ▼
//!                      ┌─────────────────┐
//!                      │   LookupTable   │
//!                      │ (one grid per   │
//!                      │  dealer card)   │
//!                      └─────────────────┘
//! ```

#![warn(missing_docs)]

/// Probability engine module.
///
/// Hand evaluation, deck composition, the memoized recursion and every query
/// built on it.
pub mod engine;

/// Lookup table module.
///
/// Grids of engine results for every starting hand and dealer up-card.
pub mod tables;

/// Self-playing rounds driven by the engine's recommendations.
pub mod play;

// Re-export commonly used types at crate root for convenience
pub use engine::{Deck, EngineConfig, EngineError, Hand, HandValue, Outcome, ProbabilityEngine, Rank};
pub use tables::{Action, LookupTable, StrategyGrid, TableError};
