//! Card ranks, hands and hand evaluation.
//!
//! Suits never matter for blackjack totals, so a card is just its [`Rank`]:
//! 2-9 at face value, 10 for any ten-valued card and 11 for an ace.
//!
//! [`evaluate`] folds a hand into a [`HandValue`]. The first ace is kept
//! "soft" (worth 11 or 1), every later ace counts 1 in both totals.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::error::EngineError;

/// Best total a hand can hold without busting.
pub const BLACKJACK: u8 = 21;

/// Value added by treating the soft ace as 11 instead of 1.
const SOFT_ACE_BONUS: u16 = 10;

/// A card rank for totals purposes (2-11, 11 is an ace).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    /// Deuce.
    pub const TWO: Rank = Rank(2);
    /// Three.
    pub const THREE: Rank = Rank(3);
    /// Four.
    pub const FOUR: Rank = Rank(4);
    /// Five.
    pub const FIVE: Rank = Rank(5);
    /// Six.
    pub const SIX: Rank = Rank(6);
    /// Seven.
    pub const SEVEN: Rank = Rank(7);
    /// Eight.
    pub const EIGHT: Rank = Rank(8);
    /// Nine.
    pub const NINE: Rank = Rank(9);
    /// Ten, jack, queen or king.
    pub const TEN: Rank = Rank(10);
    /// Ace.
    pub const ACE: Rank = Rank(11);

    /// Every rank in ascending order.
    pub const ALL: [Rank; 10] = [
        Rank::TWO,
        Rank::THREE,
        Rank::FOUR,
        Rank::FIVE,
        Rank::SIX,
        Rank::SEVEN,
        Rank::EIGHT,
        Rank::NINE,
        Rank::TEN,
        Rank::ACE,
    ];

    /// Create a rank, rejecting values outside `2..=11`.
    pub fn new(value: u8) -> Result<Self, EngineError> {
        if (2..=11).contains(&value) {
            Ok(Self(value))
        } else {
            Err(EngineError::InvalidRank(value))
        }
    }

    /// Numeric value (aces report 11).
    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this rank is an ace.
    #[inline]
    pub fn is_ace(self) -> bool {
        self.0 == 11
    }

    /// Slot of this rank in a per-rank count array.
    #[inline]
    pub(crate) fn index(self) -> usize {
        (self.0 - 2) as usize
    }

    /// Inverse of [`Rank::index`].
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < 10, "rank index must be 0-9");
        Self(index as u8 + 2)
    }
}

impl TryFrom<u8> for Rank {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::new(value)
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> u8 {
        rank.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ace() {
            write!(f, "A")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Debug for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// The possible totals of a hand.
///
/// In list form (see [`HandValue::totals`]) these are `[1, 1]` for a bust,
/// `[v]` for a single total and `[high, low]` while an ace is still soft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandValue {
    /// Every interpretation exceeds 21.
    Bust,
    /// A single total: no ace, or the soft ace was forced down to 1.
    Hard(u8),
    /// One live ace: `high` counts it as 11, `low` as 1.
    Soft {
        /// Total with the soft ace at 11.
        high: u8,
        /// Total with the soft ace at 1.
        low: u8,
    },
}

impl HandValue {
    /// Sentinel total reported for both slots of a busted hand.
    pub const BUST_SENTINEL: u8 = 1;

    /// Highest live total (the first list element).
    pub fn high(self) -> u8 {
        match self {
            HandValue::Bust => Self::BUST_SENTINEL,
            HandValue::Hard(total) => total,
            HandValue::Soft { high, .. } => high,
        }
    }

    /// Lowest live total (the last list element).
    pub fn low(self) -> u8 {
        match self {
            HandValue::Bust => Self::BUST_SENTINEL,
            HandValue::Hard(total) => total,
            HandValue::Soft { low, .. } => low,
        }
    }

    /// Whether the hand is busted.
    #[inline]
    pub fn is_bust(self) -> bool {
        matches!(self, HandValue::Bust)
    }

    /// Whether an ace can still count as 11.
    #[inline]
    pub fn is_soft(self) -> bool {
        matches!(self, HandValue::Soft { .. })
    }

    /// Whether either interpretation equals `total`.
    pub fn matches(self, total: u8) -> bool {
        !self.is_bust() && (self.high() == total || self.low() == total)
    }

    /// List form: `[1, 1]`, `[v]` or `[high, low]`.
    pub fn totals(self) -> Vec<u8> {
        match self {
            HandValue::Bust => vec![Self::BUST_SENTINEL, Self::BUST_SENTINEL],
            HandValue::Hard(total) => vec![total],
            HandValue::Soft { high, low } => vec![high, low],
        }
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandValue::Bust => write!(f, "bust"),
            HandValue::Hard(total) => write!(f, "{}", total),
            HandValue::Soft { high, low } => write!(f, "{}/{}", high, low),
        }
    }
}

/// Whether an ace has already been given the 11-or-1 treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AceState {
    NoAce,
    SoftAce,
}

/// Evaluate a sequence of drawn ranks.
pub fn evaluate(cards: &[Rank]) -> HandValue {
    let mut high: u16 = 0;
    let mut low: u16 = 0;
    let mut state = AceState::NoAce;

    for card in cards {
        match (card.is_ace(), state) {
            (false, _) => {
                high += card.value() as u16;
                low += card.value() as u16;
            }
            (true, AceState::NoAce) => {
                high += 1 + SOFT_ACE_BONUS;
                low += 1;
                state = AceState::SoftAce;
            }
            (true, AceState::SoftAce) => {
                high += 1;
                low += 1;
            }
        }
    }

    let limit = BLACKJACK as u16;
    if low > limit {
        HandValue::Bust
    } else if high > limit || high == low {
        HandValue::Hard(low as u8)
    } else {
        HandValue::Soft {
            high: high as u8,
            low: low as u8,
        }
    }
}

/// An ordered sequence of drawn ranks.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Rank>,
}

impl Hand {
    /// Create an empty hand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand from already-validated ranks.
    pub fn from_ranks(cards: Vec<Rank>) -> Self {
        Self { cards }
    }

    /// Create a hand from raw rank values, validating each one.
    pub fn from_values(values: &[u8]) -> Result<Self, EngineError> {
        let cards = values
            .iter()
            .map(|&v| Rank::new(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { cards })
    }

    /// A new hand with `card` appended. `self` is left untouched.
    pub fn with_card(&self, card: Rank) -> Self {
        let mut cards = Vec::with_capacity(self.cards.len() + 1);
        cards.extend_from_slice(&self.cards);
        cards.push(card);
        Self { cards }
    }

    /// Append a card in place.
    pub fn push(&mut self, card: Rank) {
        self.cards.push(card);
    }

    /// Cards in draw order.
    pub fn cards(&self) -> &[Rank] {
        &self.cards
    }

    /// Number of cards drawn.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether no card has been drawn.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Evaluate the hand.
    pub fn value(&self) -> HandValue {
        evaluate(&self.cards)
    }

    /// Plain sum of rank values, aces at 11.
    pub fn raw_sum(&self) -> u16 {
        self.cards.iter().map(|c| c.value() as u16).sum()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.cards.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}]", parts.join(" "))
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(values: &[u8]) -> Hand {
        Hand::from_values(values).unwrap()
    }

    #[test]
    fn test_rank_bounds() {
        assert!(Rank::new(1).is_err());
        assert!(Rank::new(12).is_err());
        assert_eq!(Rank::new(0), Err(EngineError::InvalidRank(0)));
        assert_eq!(Rank::new(11).unwrap(), Rank::ACE);
        assert_eq!(Rank::from_index(Rank::SEVEN.index()), Rank::SEVEN);
    }

    #[test]
    fn test_empty_hand() {
        let value = evaluate(&[]);
        assert_eq!(value, HandValue::Hard(0));
        assert_eq!(value.high(), 0);
        assert_eq!(value.low(), 0);
    }

    #[test]
    fn test_hands_without_aces_have_one_total() {
        for values in [&[2, 3][..], &[10, 6], &[9, 9, 3], &[5, 5, 5, 6]] {
            let value = hand(values).value();
            let sum: u8 = values.iter().sum();
            assert_eq!(value, HandValue::Hard(sum));
            assert_eq!(value.totals(), vec![sum]);
            assert_eq!(value.high(), value.low());
        }
    }

    #[test]
    fn test_pair_of_aces() {
        let value = hand(&[11, 11]).value();
        assert_eq!(value, HandValue::Soft { high: 12, low: 2 });
        assert_eq!(value.totals(), vec![12, 2]);
    }

    #[test]
    fn test_ten_ace_is_soft_21() {
        assert_eq!(hand(&[10, 11]).value().totals(), vec![21, 11]);
        assert_eq!(hand(&[11, 10]).value().totals(), vec![21, 11]);
    }

    #[test]
    fn test_soft_ace_forced_hard() {
        // 11 + 5 + 10 = 26 with the ace high, 16 with it low.
        let value = hand(&[11, 5, 10]).value();
        assert_eq!(value, HandValue::Hard(16));
        assert_eq!(value.totals(), vec![16]);
        assert!(!value.is_soft());
    }

    #[test]
    fn test_later_aces_count_one() {
        // First ace soft, the other two always 1.
        assert_eq!(
            hand(&[11, 11, 11]).value(),
            HandValue::Soft { high: 13, low: 3 }
        );
        assert_eq!(hand(&[9, 11, 11]).value(), HandValue::Soft { high: 21, low: 11 });
        assert_eq!(hand(&[9, 11, 11, 11]).value(), HandValue::Hard(12));
    }

    #[test]
    fn test_bust() {
        let value = hand(&[10, 6, 10]).value();
        assert!(value.is_bust());
        assert_eq!(value.totals(), vec![1, 1]);
        assert!(hand(&[11, 10, 10, 5]).value().is_bust());
    }

    #[test]
    fn test_order_does_not_change_totals() {
        assert_eq!(hand(&[11, 4, 6]).value(), hand(&[6, 4, 11]).value());
        assert_eq!(hand(&[11, 11, 9]).value(), hand(&[9, 11, 11]).value());
    }

    #[test]
    fn test_matches() {
        let soft = hand(&[11, 6]).value();
        assert!(soft.matches(17));
        assert!(soft.matches(7));
        assert!(!soft.matches(18));
        assert!(!HandValue::Bust.matches(1));
    }

    #[test]
    fn test_with_card_leaves_original() {
        let base = hand(&[10]);
        let extended = base.with_card(Rank::SIX);
        assert_eq!(base.len(), 1);
        assert_eq!(extended.cards(), &[Rank::TEN, Rank::SIX]);
        assert_eq!(extended.raw_sum(), 16);
        assert_eq!(hand(&[11, 11]).raw_sum(), 22);
    }

    #[test]
    fn test_display() {
        assert_eq!(hand(&[11, 6]).to_string(), "[A 6]");
        assert_eq!(hand(&[11, 6]).value().to_string(), "17/7");
        assert_eq!(HandValue::Bust.to_string(), "bust");
    }
}
