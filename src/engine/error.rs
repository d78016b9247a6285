//! Errors raised when building engine inputs.

use thiserror::Error;

use crate::engine::hand::Rank;

/// Errors for malformed ranks, hands and decks.
///
/// The probability functions themselves are total; these errors surface only
/// while constructing their inputs or while computing statistics that are
/// undefined for empty decks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Rank value outside `2..=11`.
    #[error("invalid rank {0} (expected 2..=11, with 11 for an ace)")]
    InvalidRank(u8),

    /// Tried to remove a card the deck no longer holds.
    #[error("no {0} left in the deck")]
    CardNotInDeck(Rank),

    /// A deck holds more copies of a rank than its shoe can contain.
    #[error("{count} copies of {rank} exceed the {max} a {decks}-deck shoe holds")]
    TooManyCopies {
        /// Offending rank.
        rank: Rank,
        /// Copies requested.
        count: u16,
        /// Copies the shoe holds.
        max: u16,
        /// Number of decks in the shoe.
        decks: u8,
    },

    /// Shoe size outside the supported range.
    #[error("deck count {0} is out of range [1, {max}]", max = crate::engine::deck::MAX_DECKS)]
    InvalidDeckCount(u8),

    /// A statistic that needs at least one card was asked of an empty deck.
    #[error("deck is empty")]
    EmptyDeck,
}
