//! Dealer outcome model.
//!
//! The dealer draws until the high total reaches the stand value. Two
//! queries describe where that ends up: the chance of busting, and the
//! chance of finishing on an exact total.

use serde::{Deserialize, Serialize};

use crate::engine::cache::Query;
use crate::engine::calculator::ProbabilityEngine;
use crate::engine::deck::Deck;
use crate::engine::hand::{Hand, HandValue, BLACKJACK};

/// Total at which the dealer stops drawing (soft 17 included).
pub const DEALER_STAND_VALUE: u8 = 17;

/// Final dealer totals that are not a bust.
pub const DEALER_FINAL_TOTALS: std::ops::RangeInclusive<u8> = DEALER_STAND_VALUE..=BLACKJACK;

/// Settles a dealer-bust branch.
pub(crate) fn bust_outcome(value: HandValue, stand_value: u8) -> Option<f64> {
    if value.is_bust() {
        Some(1.0)
    } else if value.high() >= stand_value {
        Some(0.0)
    } else {
        None
    }
}

/// Settles a dealer-exact-total branch.
pub(crate) fn exact_outcome(value: HandValue, target: u8) -> Option<f64> {
    if value.is_bust() {
        Some(0.0)
    } else if value.matches(target) {
        Some(1.0)
    } else if value.high() >= DEALER_STAND_VALUE {
        Some(0.0)
    } else {
        None
    }
}

/// How the dealer's hand finishes: bust, or one of 17..=21.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealerOutcomes {
    /// Probability of busting.
    pub bust: f64,
    /// Probability of finishing on 17, 18, 19, 20, 21.
    pub finals: [f64; 5],
}

impl DealerOutcomes {
    /// Probability of finishing on `total` (0 outside 17..=21).
    pub fn finishing_on(&self, total: u8) -> f64 {
        if DEALER_FINAL_TOTALS.contains(&total) {
            self.finals[(total - DEALER_STAND_VALUE) as usize]
        } else {
            0.0
        }
    }

    /// Sum over every outcome; 1 unless the deck can run dry first.
    pub fn total(&self) -> f64 {
        self.bust + self.finals.iter().sum::<f64>()
    }
}

impl ProbabilityEngine {
    /// Probability the dealer busts, drawing until the high total reaches
    /// `stand_value`.
    pub fn dealer_bust_probability(&self, deck: &Deck, dealer_hand: &Hand, stand_value: u8) -> f64 {
        self.probability(Query::DealerBust { stand_value }, deck, dealer_hand)
    }

    /// Probability the dealer's final total is exactly `target`, standing on
    /// 17 or more.
    pub fn dealer_exact_value_probability(&self, deck: &Deck, dealer_hand: &Hand, target: u8) -> f64 {
        self.probability(Query::DealerExact { target }, deck, dealer_hand)
    }

    /// Full distribution of the dealer's finish under the standard rule.
    pub fn dealer_outcomes(&self, deck: &Deck, dealer_hand: &Hand) -> DealerOutcomes {
        let bust = self.dealer_bust_probability(deck, dealer_hand, DEALER_STAND_VALUE);
        let mut finals = [0.0; 5];
        for (slot, target) in finals.iter_mut().zip(DEALER_FINAL_TOTALS) {
            *slot = self.dealer_exact_value_probability(deck, dealer_hand, target);
        }
        DealerOutcomes { bust, finals }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::engine::hand::Rank;
    use proptest::prelude::*;

    /// Single deck with `removed` taken out.
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
    fn test_settled_hands() {
        let engine = ProbabilityEngine::default();
        let deck = Deck::single();

        assert_eq!(engine.dealer_bust_probability(&deck, &hand(&[10, 6, 10]), 17), 1.0);
        assert_eq!(engine.dealer_bust_probability(&deck, &hand(&[10, 7]), 17), 0.0);
        // Soft 17 stands.
        assert_eq!(engine.dealer_bust_probability(&deck, &hand(&[11, 6]), 17), 0.0);
        assert_eq!(engine.dealer_exact_value_probability(&deck, &hand(&[11, 6]), 17), 1.0);
        assert_eq!(engine.dealer_exact_value_probability(&deck, &hand(&[10, 8]), 17), 0.0);
        assert_eq!(engine.dealer_exact_value_probability(&deck, &hand(&[10, 6, 10]), 17), 0.0);
    }

    #[test]
    fn test_dealer_ten_single_deck_reference() {
        // Dealer shows a 10, player holds 10 + 6. Exact value by enumeration
        // of the 49 remaining cards.
        let engine = ProbabilityEngine::default();
        let deck = deck_without(&[10, 10, 6]);
        let bust = engine.dealer_bust_probability(&deck, &hand(&[10]), DEALER_STAND_VALUE);

        let expected = 5_502_694.0 / 26_219_655.0;
        assert!((bust - expected).abs() < 1e-12, "bust {} != {}", bust, expected);
    }

    #[test]
    fn test_dealer_ten_final_totals_reference() {
        let engine = ProbabilityEngine::default();
        let deck = deck_without(&[10, 10, 6]);
        let outcomes = engine.dealer_outcomes(&deck, &hand(&[10]));

        let expected = [
            1_136_257.0 / 9_534_420.0,
            12_145_741.0 / 104_878_620.0,
            1_027_877.0 / 8_739_885.0,
            8_389_877.0 / 26_219_655.0,
            342_479.0 / 2_913_295.0,
        ];
        for (total, (got, want)) in DEALER_FINAL_TOTALS.zip(outcomes.finals.iter().zip(expected)) {
            assert!((got - want).abs() < 1e-12, "dealer {}: {} != {}", total, got, want);
            assert_eq!(outcomes.finishing_on(total), *got);
        }
        assert!((outcomes.total() - 1.0).abs() < 1e-12);
        assert_eq!(outcomes.finishing_on(16), 0.0);
    }

    #[test]
    fn test_dealer_ace_single_deck_reference() {
        let engine = ProbabilityEngine::default();
        let deck = deck_without(&[11, 10, 7]);
        let bust = engine.dealer_bust_probability(&deck, &hand(&[11]), DEALER_STAND_VALUE);

        let expected = 22_396_027_151.0 / 189_410_787_720.0;
        assert!((bust - expected).abs() < 1e-12);
    }

    #[test]
    fn test_stand_value_parameter() {
        let engine = ProbabilityEngine::default();
        let deck = deck_without(&[10, 10, 6]);
        let dealer = hand(&[10]);

        // Standing earlier can only lower the bust chance.
        let at_17 = engine.dealer_bust_probability(&deck, &dealer, 17);
        let at_12 = engine.dealer_bust_probability(&deck, &dealer, 12);
        let at_21 = engine.dealer_bust_probability(&deck, &dealer, 21);
        assert!(at_12 < at_17);
        assert!(at_17 < at_21);
        // A dealer already at 10 standing on 10 never draws.
        assert_eq!(engine.dealer_bust_probability(&deck, &dealer, 10), 0.0);
    }

    #[test]
    fn test_memoization_is_transparent() {
        let engine = ProbabilityEngine::default();
        let deck = deck_without(&[9, 7, 5]);
        let dealer = hand(&[5]);

        let first = engine.dealer_exact_value_probability(&deck, &dealer, 19);
        let after_first = engine.cache_stats();
        let second = engine.dealer_exact_value_probability(&deck, &dealer, 19);
        let after_second = engine.cache_stats();

        assert_eq!(first.to_bits(), second.to_bits());
        assert!(after_first.misses > 0);
        assert_eq!(after_second.misses, after_first.misses);
        assert_eq!(after_second.hits, after_first.hits + 1);

        // A cold engine computes the same bits.
        let cold = ProbabilityEngine::default();
        assert_eq!(cold.dealer_exact_value_probability(&deck, &dealer, 19).to_bits(), first.to_bits());
    }

    #[test]
    fn test_shuffled_deck_reuses_cache() {
        let engine = ProbabilityEngine::default();
        let dealer = hand(&[6]);
        let a = Deck::from_ranks(&[2, 3, 4, 5, 10, 10, 11, 9, 8, 7, 6]).unwrap();
        let b = Deck::from_ranks(&[11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 10]).unwrap();

        let first = engine.dealer_bust_probability(&a, &dealer, 17);
        let misses = engine.cache_stats().misses;
        let second = engine.dealer_bust_probability(&b, &dealer, 17);

        assert_eq!(first, second);
        assert_eq!(engine.cache_stats().misses, misses);
    }

    #[test]
    fn test_tiny_cache_matches_large_cache() {
        let small = ProbabilityEngine::new(EngineConfig::default().with_cache_capacity(16));
        let large = ProbabilityEngine::default();
        let deck = deck_without(&[4, 10, 3]);
        let dealer = hand(&[4]);

        let a = small.dealer_bust_probability(&deck, &dealer, 17);
        let b = large.dealer_bust_probability(&deck, &dealer, 17);
        assert!((a - b).abs() < 1e-12);
        assert!(small.cache_stats().evictions > 0);
        assert!(small.cache_stats().entries <= 16);
    }

    /// Strategy for a shoe of 1-2 decks with a few random cards removed,
    /// plus a dealer up-card still present in it.
    fn shoe_and_upcard() -> impl Strategy<Value = (Deck, Hand)> {
        (1u8..=2, prop::collection::vec(2u8..=11, 0..12), 2u8..=11).prop_map(
            |(decks, removed, up)| {
                let mut deck = Deck::standard(decks).unwrap();
                for value in removed {
                    let _ = deck.remove(Rank::new(value).unwrap());
                }
                let up = Rank::new(up).unwrap();
                let _ = deck.remove(up);
                (deck, Hand::from_ranks(vec![up]))
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_dealer_outcomes_partition((deck, dealer) in shoe_and_upcard()) {
            let engine = ProbabilityEngine::default();
            let outcomes = engine.dealer_outcomes(&deck, &dealer);
            prop_assert!((outcomes.total() - 1.0).abs() < 1e-9, "total {}", outcomes.total());
            prop_assert!(outcomes.bust >= 0.0 && outcomes.bust <= 1.0);
        }
    }
}
