//! The probability engine.
//!
//! [`ProbabilityEngine`] owns the configuration and the memo cache, and runs
//! the recursion shared by every multi-ply query: evaluate the hand, stop if
//! the query is settled, otherwise branch on every card left in the deck
//! weighted by its chance of being drawn next.
//!
//! The public queries live next to the models they implement:
//! - [`dealer`](crate::engine::dealer): dealer bust and exact-final-total
//! - [`player`](crate::engine::player): player reachability and bust-on-hit
//! - [`outcome`](crate::engine::outcome): win / stand / hit composition

use crate::engine::cache::{CacheKey, CacheStats, ProbabilityCache, Query};
use crate::engine::config::{ConfigError, EngineConfig};
use crate::engine::dealer;
use crate::engine::deck::Deck;
use crate::engine::error::EngineError;
use crate::engine::hand::{Hand, HandValue};
use crate::engine::player;

impl Query {
    /// Outcome of a hand that needs no further draws, or `None` to keep
    /// drawing.
    fn settle(self, value: HandValue) -> Option<f64> {
        match self {
            Query::DealerBust { stand_value } => dealer::bust_outcome(value, stand_value),
            Query::DealerExact { target } => dealer::exact_outcome(value, target),
            Query::PlayerReach { target } => player::reach_outcome(value, target),
        }
    }
}

/// Exact blackjack probability calculator with a bounded memo cache.
///
/// # Example
/// ```
/// use blackjack_odds::engine::{Deck, EngineConfig, Hand, ProbabilityEngine, Rank};
///
/// let engine = ProbabilityEngine::new(EngineConfig::default());
/// let mut deck = Deck::single();
/// deck.remove(Rank::TEN).unwrap();
///
/// let dealer = Hand::from_ranks(vec![Rank::TEN]);
/// let bust = engine.dealer_bust_probability(&deck, &dealer, 17);
/// assert!(bust > 0.0 && bust < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ProbabilityEngine {
    config: EngineConfig,
    cache: ProbabilityCache,
}

impl Default for ProbabilityEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ProbabilityEngine {
    /// Create an engine. The config is used as given; see [`Self::try_new`].
    pub fn new(config: EngineConfig) -> Self {
        let cache = ProbabilityCache::new(config.cache_capacity);
        Self { config, cache }
    }

    /// Create an engine after validating the config.
    pub fn try_new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The memo cache.
    pub fn cache(&self) -> &ProbabilityCache {
        &self.cache
    }

    /// Hit/miss counters of the memo cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Forget every memoized result, e.g. between independent computations.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// A full shoe of the configured size.
    pub fn reference_deck(&self) -> Result<Deck, EngineError> {
        Deck::standard(self.config.num_decks)
    }

    /// Probability that `query` ends successfully from (`deck`, `hand`).
    ///
    /// Every physical card is an equally likely next draw; equal ranks lead
    /// to identical subtrees, so each distinct rank is expanded once and
    /// weighted by `count / |deck|`. An exhausted deck settles the branch as
    /// a failure: nothing more can be drawn to reach the query's goal.
    pub(crate) fn probability(&self, query: Query, deck: &Deck, hand: &Hand) -> f64 {
        if let Some(settled) = query.settle(hand.value()) {
            return settled;
        }
        if deck.is_empty() {
            return 0.0;
        }

        let key = CacheKey::new(query, deck, hand);
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        let remaining = deck.len() as f64;
        let mut probability = 0.0;
        for (rank, count) in deck.draws() {
            let branch = self.probability(query, &deck.without(rank), &hand.with_card(rank));
            probability += count as f64 / remaining * branch;
        }

        self.cache.insert(key, probability);
        probability
    }
}
