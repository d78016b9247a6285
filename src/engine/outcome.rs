//! Win / stand / hit composition.
//!
//! Combines the dealer and player models:
//!
//! ```text
//! win   = P(dealer busts) + Σ_{v=17..21} P(dealer ends on v) · P(player reaches ≥ v)
//! stand = P(dealer busts) + Σ_{17 ≤ v < h} P(dealer ends on v)      (h = player's high total)
//! hit   = win − stand
//! ```
//!
//! A dealer finishing on the player's own total is a push, not a win, so
//! `stand` only counts dealer totals strictly below `h`.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::calculator::ProbabilityEngine;
use crate::engine::dealer::{DEALER_FINAL_TOTALS, DEALER_STAND_VALUE};
use crate::engine::deck::Deck;
use crate::engine::hand::Hand;

/// The three headline probabilities for a decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Probability of winning outright.
    pub win: f64,
    /// Probability of winning by standing now.
    pub stand: f64,
    /// Value of hitting over standing (`win - stand`, may be negative).
    pub hit: f64,
}

impl Outcome {
    /// Build from `win` and `stand`, deriving `hit`.
    pub fn new(win: f64, stand: f64) -> Self {
        Self {
            win,
            stand,
            hit: win - stand,
        }
    }

    /// Whether drawing is worth more than standing.
    pub fn favors_hit(&self) -> bool {
        self.hit > self.stand
    }
}

impl ProbabilityEngine {
    /// Total win probability.
    pub fn win_probability(&self, deck: &Deck, hand: &Hand, dealer_hand: &Hand) -> f64 {
        let mut win = self.dealer_bust_probability(deck, dealer_hand, DEALER_STAND_VALUE);
        for target in DEALER_FINAL_TOTALS {
            let dealer = self.dealer_exact_value_probability(deck, dealer_hand, target);
            if dealer == 0.0 {
                continue;
            }
            win += dealer * self.player_reach_probability(deck, hand, target);
        }
        win
    }

    /// Win probability if the player stands on `hand` now.
    pub fn stand_probability(&self, deck: &Deck, hand: &Hand, dealer_hand: &Hand) -> f64 {
        let standing = hand.value().high();
        let mut win = self.dealer_bust_probability(deck, dealer_hand, DEALER_STAND_VALUE);
        for target in DEALER_FINAL_TOTALS.filter(|&v| v < standing) {
            win += self.dealer_exact_value_probability(deck, dealer_hand, target);
        }
        win
    }

    /// Incremental value of one more card: `win - stand`.
    pub fn hit_probability(&self, deck: &Deck, hand: &Hand, dealer_hand: &Hand) -> f64 {
        self.evaluate_all(deck, hand, dealer_hand).hit
    }

    /// Win, stand and hit in one call.
    ///
    /// With `log_timings` enabled, emits a debug event with per-part timings
    /// and cache statistics.
    pub fn evaluate_all(&self, deck: &Deck, hand: &Hand, dealer_hand: &Hand) -> Outcome {
        let start = Instant::now();
        let win = self.win_probability(deck, hand, dealer_hand);
        let win_elapsed = start.elapsed();

        let start = Instant::now();
        let stand = self.stand_probability(deck, hand, dealer_hand);
        let stand_elapsed = start.elapsed();

        if self.config().log_timings {
            let stats = self.cache_stats();
            debug!(
                player = %hand,
                dealer = %dealer_hand,
                win_ms = win_elapsed.as_secs_f64() * 1000.0,
                stand_ms = stand_elapsed.as_secs_f64() * 1000.0,
                cache_entries = stats.entries,
                cache_hits = stats.hits,
                cache_misses = stats.misses,
                cache_evictions = stats.evictions,
                "evaluated decision"
            );
        }

        Outcome::new(win, stand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::engine::hand::Rank;

    fn deck_without(removed: &[u8]) -> Deck {
        let mut deck = Deck::single();
        for &value in removed {
            deck.remove(Rank::new(value).unwrap()).unwrap();
        }
        deck
    }

    fn hand(values: &[u8]) -> Hand {
        Hand::from_values(values).unwrap()
    }

    #[test]
    fn test_hard_16_vs_ten_reference() {
        let engine = ProbabilityEngine::default();
        let deck = deck_without(&[10, 10, 6]);
        let outcome = engine.evaluate_all(&deck, &hand(&[10, 6]), &hand(&[10]));

        let win = 111_973_622_867.0 / 272_097_091_728.0;
        let stand = 5_502_694.0 / 26_219_655.0;
        assert!((outcome.win - win).abs() < 1e-12);
        // Standing on 16 wins only when the dealer busts.
        assert!((outcome.stand - stand).abs() < 1e-12);
        assert!((outcome.hit - 274_344_328_063.0 / 1_360_485_458_640.0).abs() < 1e-12);
        assert!(!outcome.favors_hit());
    }

    #[test]
    fn test_hard_19_vs_six_reference() {
        let engine = ProbabilityEngine::default();
        let deck = deck_without(&[10, 9, 6]);
        let outcome = engine.evaluate_all(&deck, &hand(&[10, 9]), &hand(&[6]));

        let win = 1_454_088_263_671.0 / 1_767_834_018_720.0;
        let stand = 1_885_967_141.0 / 2_745_083_880.0;
        assert!((outcome.win - win).abs() < 1e-12);
        assert!((outcome.stand - stand).abs() < 1e-12);
    }

    #[test]
    fn test_stand_excludes_ties() {
        let engine = ProbabilityEngine::default();
        let deck = deck_without(&[10, 9, 6]);
        let player = hand(&[10, 9]);
        let dealer = hand(&[6]);

        let outcomes = engine.dealer_outcomes(&deck, &dealer);
        let expected = outcomes.bust + outcomes.finishing_on(17) + outcomes.finishing_on(18);
        let stand = engine.stand_probability(&deck, &player, &dealer);
        assert!((stand - expected).abs() < 1e-12);
    }

    #[test]
    fn test_soft_18_stands_on_high_total() {
        let engine = ProbabilityEngine::default();
        let deck = deck_without(&[11, 7, 9]);
        let outcome = engine.evaluate_all(&deck, &hand(&[11, 7]), &hand(&[9]));
        assert!((outcome.win - 0.6709018818148086).abs() < 1e-12);
        assert!((outcome.stand - 0.357484165981589).abs() < 1e-12);
    }

    #[test]
    fn test_hit_is_win_minus_stand() {
        let engine = ProbabilityEngine::new(EngineConfig::default().with_timings(true));
        for (player, dealer, removed) in [
            (&[10, 6][..], &[10][..], &[10, 6, 10][..]),
            (&[11, 11][..], &[5][..], &[11, 11, 5][..]),
            (&[2, 3][..], &[11][..], &[2, 3, 11][..]),
            (&[10, 10][..], &[7][..], &[10, 10, 7][..]),
        ] {
            let deck = deck_without(removed);
            let outcome = engine.evaluate_all(&deck, &hand(player), &hand(dealer));
            assert_eq!(outcome.hit, outcome.win - outcome.stand);
            assert!(outcome.win >= 0.0 && outcome.win <= 1.0 + 1e-12);
            assert!(outcome.stand >= 0.0 && outcome.stand <= outcome.win + 1e-12);

            let hit = engine.hit_probability(&deck, &hand(player), &hand(dealer));
            assert_eq!(hit.to_bits(), outcome.hit.to_bits());
        }
    }

    #[test]
    fn test_win_against_twenty() {
        let engine = ProbabilityEngine::default();
        let deck = deck_without(&[10, 10, 7]);
        let player = hand(&[10, 10]);
        let dealer = hand(&[7]);

        // Player on 20 already reaches every dealer total below 21; 21
        // needs an ace.
        let outcomes = engine.dealer_outcomes(&deck, &dealer);
        let win = engine.win_probability(&deck, &player, &dealer);
        let to_21 = engine.player_reach_probability(&deck, &player, 21);
        let expected = outcomes.total() - outcomes.finishing_on(21) * (1.0 - to_21);
        assert!((win - expected).abs() < 1e-12);
        assert!((to_21 - 4.0 / 49.0).abs() < 1e-12);
    }

    #[test]
    fn test_outcome_serializes() {
        let outcome = Outcome::new(0.5, 0.25);
        let json = serde_json::to_string(&outcome).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
        assert_eq!(back.hit, 0.25);
    }
}
