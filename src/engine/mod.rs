//! Exact Blackjack Probability Engine.
//!
//! This module computes exact outcome probabilities for a blackjack decision
//! given the dealer's exposed card(s) and the composition of the remaining
//! deck, drawing without replacement.
//!
//! # Overview
//!
//! Every multi-card query is an exhaustive walk of the draw tree:
//! 1. Evaluate the current hand (with the soft-ace rule)
//! 2. Stop if the query is settled (bust, reached target, dealer stands)
//! 3. Otherwise branch on every card left in the deck, weighted by its
//!    chance of being drawn next
//!
//! Results are memoized by (query, deck multiset, hand) in a bounded LRU
//! cache owned by the [`ProbabilityEngine`].
//!
//! # Queries
//!
//! - **Dealer**: bust probability, probability of finishing on an exact total
//! - **Player**: probability of reaching a total, bust on the next card
//! - **Composition**: win / stand / hit via [`ProbabilityEngine::evaluate_all`]
//! - **Bias**: how far the remaining deck's average rank drifts from a full shoe
//!
//! # Example
//!
//! ```
//! use blackjack_odds::engine::{Deck, Hand, ProbabilityEngine, Rank};
//!
//! let engine = ProbabilityEngine::default();
//!
//! // Player 10 + 6 against a dealer 10, single deck.
//! let player = Hand::from_ranks(vec![Rank::TEN, Rank::SIX]);
//! let dealer = Hand::from_ranks(vec![Rank::TEN]);
//! let mut deck = Deck::single();
//! deck.remove_all(&[Rank::TEN, Rank::SIX, Rank::TEN]).unwrap();
//!
//! let outcome = engine.evaluate_all(&deck, &player, &dealer);
//! assert_eq!(outcome.hit, outcome.win - outcome.stand);
//! ```

pub mod bias;
pub mod cache;
pub mod calculator;
pub mod config;
pub mod dealer;
pub mod deck;
pub mod error;
pub mod hand;
pub mod outcome;
pub mod player;

// Re-export main types for convenient access
pub use bias::deck_bias;
pub use cache::{CacheKey, CacheStats, ProbabilityCache, Query};
pub use calculator::ProbabilityEngine;
pub use config::{ConfigError, EngineConfig};
pub use dealer::{DealerOutcomes, DEALER_FINAL_TOTALS, DEALER_STAND_VALUE};
pub use deck::{Deck, MAX_DECKS};
pub use error::EngineError;
pub use hand::{evaluate, Hand, HandValue, Rank, BLACKJACK};
pub use outcome::Outcome;
pub use player::bust_on_next_card;
