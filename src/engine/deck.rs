//! The remaining deck as a multiset of ranks.
//!
//! A [`Deck`] stores one count per rank, so two decks holding the same cards
//! compare and hash equal no matter what order the cards were added in. The
//! type is `Copy`: recursion derives "one card removed" by value and the
//! caller's deck stays valid.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::error::EngineError;
use crate::engine::hand::Rank;

/// Largest supported shoe, in decks.
pub const MAX_DECKS: u8 = 8;

/// Copies of each non-ten rank in one deck.
const COPIES_PER_RANK: u16 = 4;

/// Ten-valued cards in one deck (10, J, Q, K).
const TENS_PER_DECK: u16 = 16;

/// Per-rank card counts, indexed by [`Rank::index`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deck {
    counts: [u16; 10],
    len: u16,
}

impl Deck {
    /// A deck with no cards.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A full shoe of `num_decks` standard 52-card decks.
    pub fn standard(num_decks: u8) -> Result<Self, EngineError> {
        if num_decks == 0 || num_decks > MAX_DECKS {
            return Err(EngineError::InvalidDeckCount(num_decks));
        }
        let mut deck = Self::empty();
        for rank in Rank::ALL {
            let copies = Self::shoe_limit(rank, num_decks);
            deck.counts[rank.index()] = copies;
            deck.len += copies;
        }
        Ok(deck)
    }

    /// A single 52-card deck.
    pub fn single() -> Self {
        let mut deck = Self::empty();
        for rank in Rank::ALL {
            let copies = Self::shoe_limit(rank, 1);
            deck.counts[rank.index()] = copies;
            deck.len += copies;
        }
        deck
    }

    /// Build a deck from raw rank values in any order.
    pub fn from_ranks(values: &[u8]) -> Result<Self, EngineError> {
        let mut deck = Self::empty();
        for &value in values {
            deck.insert(Rank::new(value)?);
        }
        Ok(deck)
    }

    /// How many copies of `rank` a shoe of `num_decks` decks holds.
    pub fn shoe_limit(rank: Rank, num_decks: u8) -> u16 {
        let per_deck = if rank == Rank::TEN {
            TENS_PER_DECK
        } else {
            COPIES_PER_RANK
        };
        per_deck * num_decks as u16
    }

    /// Check that no rank exceeds what a `num_decks` shoe can hold.
    pub fn validate(&self, num_decks: u8) -> Result<(), EngineError> {
        if num_decks == 0 || num_decks > MAX_DECKS {
            return Err(EngineError::InvalidDeckCount(num_decks));
        }
        for rank in Rank::ALL {
            let count = self.count(rank);
            let max = Self::shoe_limit(rank, num_decks);
            if count > max {
                return Err(EngineError::TooManyCopies {
                    rank,
                    count,
                    max,
                    decks: num_decks,
                });
            }
        }
        Ok(())
    }

    /// Copies of `rank` remaining.
    #[inline]
    pub fn count(&self, rank: Rank) -> u16 {
        self.counts[rank.index()]
    }

    /// Total cards remaining.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the deck has run out.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether at least one `rank` remains.
    #[inline]
    pub fn contains(&self, rank: Rank) -> bool {
        self.count(rank) > 0
    }

    /// Add one card.
    pub fn insert(&mut self, rank: Rank) {
        self.counts[rank.index()] += 1;
        self.len += 1;
    }

    /// Remove one card in place.
    pub fn remove(&mut self, rank: Rank) -> Result<(), EngineError> {
        if !self.contains(rank) {
            return Err(EngineError::CardNotInDeck(rank));
        }
        self.counts[rank.index()] -= 1;
        self.len -= 1;
        Ok(())
    }

    /// Remove every card of `hand`, failing on the first one that is missing.
    pub fn remove_all(&mut self, cards: &[Rank]) -> Result<(), EngineError> {
        for &card in cards {
            self.remove(card)?;
        }
        Ok(())
    }

    /// A copy of this deck with one `rank` drawn. The rank must be present.
    #[inline]
    pub(crate) fn without(&self, rank: Rank) -> Deck {
        debug_assert!(self.contains(rank), "drawing {rank} from a deck without it");
        let mut next = *self;
        next.counts[rank.index()] -= 1;
        next.len -= 1;
        next
    }

    /// Distinct ranks still present with their counts, ascending.
    pub fn draws(&self) -> impl Iterator<Item = (Rank, u16)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(index, &count)| (Rank::from_index(index), count))
    }

    /// Every physical card, in canonical (sorted) order.
    pub fn cards(&self) -> impl Iterator<Item = Rank> + '_ {
        self.draws()
            .flat_map(|(rank, count)| std::iter::repeat(rank).take(count as usize))
    }

    /// Arithmetic mean of the rank values, `None` when empty.
    pub fn average_rank(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let total: u64 = self
            .draws()
            .map(|(rank, count)| rank.value() as u64 * count as u64)
            .sum();
        Some(total as f64 / self.len as f64)
    }

    /// Draw a uniformly random card, removing it.
    pub fn draw_random<R: Rng>(&mut self, rng: &mut R) -> Option<Rank> {
        if self.is_empty() {
            return None;
        }
        let mut pick = rng.gen_range(0..self.len);
        let mut chosen = None;
        for (rank, count) in self.draws() {
            if pick < count {
                chosen = Some(rank);
                break;
            }
            pick -= count;
        }
        let rank = chosen?;
        *self = self.without(rank);
        Some(rank)
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .draws()
            .map(|(rank, count)| format!("{}x{}", rank, count))
            .collect();
        write!(f, "{} cards [{}]", self.len, parts.join(" "))
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
