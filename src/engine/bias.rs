//! Deck composition bias.

use crate::engine::deck::Deck;
use crate::engine::error::EngineError;

/// Percentage deviation of `current`'s average rank from `reference`'s.
///
/// Positive when the remaining deck is richer in high cards than the
/// reference, negative when it is richer in low cards.
pub fn deck_bias(reference: &Deck, current: &Deck) -> Result<f64, EngineError> {
    let reference_avg = reference.average_rank().ok_or(EngineError::EmptyDeck)?;
    let current_avg = current.average_rank().ok_or(EngineError::EmptyDeck)?;
    Ok(100.0 * (current_avg - reference_avg) / reference_avg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::hand::Rank;

    #[test]
    fn test_same_deck_has_no_bias() {
        let deck = Deck::single();
        assert_eq!(deck_bias(&deck, &deck).unwrap(), 0.0);
        let shoe = Deck::standard(8).unwrap();
        assert_eq!(deck_bias(&shoe, &shoe).unwrap(), 0.0);
    }

    #[test]
    fn test_proportional_shoe_has_no_bias() {
        let bias = deck_bias(&Deck::single(), &Deck::standard(6).unwrap()).unwrap();
        assert!(bias.abs() < 1e-12);
    }

    #[test]
    fn test_direction() {
        let reference = Deck::single();

        let mut low_gone = reference;
        for rank in [Rank::TWO, Rank::THREE, Rank::FOUR, Rank::FIVE] {
            low_gone.remove(rank).unwrap();
        }
        assert!(deck_bias(&reference, &low_gone).unwrap() > 0.0);

        let mut high_gone = reference;
        for _ in 0..4 {
            high_gone.remove(Rank::TEN).unwrap();
        }
        assert!(deck_bias(&reference, &high_gone).unwrap() < 0.0);
    }

    #[test]
    fn test_known_value() {
        // Reference average 380 / 52; only tens and aces left averages 10.2.
        let reference = Deck::single();
        let current = Deck::from_ranks(&[10, 10, 10, 10, 11]).unwrap();
        let expected = 100.0 * (10.2 - 380.0 / 52.0) / (380.0 / 52.0);
        assert!((deck_bias(&reference, &current).unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_deck() {
        assert_eq!(deck_bias(&Deck::single(), &Deck::empty()), Err(EngineError::EmptyDeck));
        assert_eq!(deck_bias(&Deck::empty(), &Deck::single()), Err(EngineError::EmptyDeck));
    }
}
