//! Player models: reachability and bust-on-next-card.

use crate::engine::cache::Query;
use crate::engine::calculator::ProbabilityEngine;
use crate::engine::deck::Deck;
use crate::engine::hand::{Hand, HandValue, BLACKJACK};

/// Settles a player-reach branch.
pub(crate) fn reach_outcome(value: HandValue, target: u8) -> Option<f64> {
    if value.is_bust() {
        Some(0.0)
    } else if value.high() >= target {
        Some(1.0)
    } else {
        None
    }
}

/// Probability that the very next card busts `hand`.
///
/// Single ply: this is not the chance of busting under any hitting
/// strategy. A hand that is already busted cannot bust further and an empty
/// deck offers no card to draw, so both report 0.
pub fn bust_on_next_card(deck: &Deck, hand: &Hand) -> f64 {
    let value = hand.value();
    if value.is_bust() || deck.is_empty() {
        return 0.0;
    }

    let headroom = BLACKJACK as i32 - value.low() as i32;
    let raw_sum = hand.raw_sum() as i32;

    let mut survivors = 0usize;
    for (rank, count) in deck.draws() {
        let next = hand.with_card(rank).value();
        if next.is_bust() {
            continue;
        }
        if next.low() as i32 - raw_sum <= headroom {
            survivors += count as usize;
        }
    }

    1.0 - survivors as f64 / deck.len() as f64
}

impl ProbabilityEngine {
    /// Probability that hitting lets `hand` reach `target` or more without
    /// busting. The player keeps drawing until the target is met or the hand
    /// busts; no stand threshold applies.
    pub fn player_reach_probability(&self, deck: &Deck, hand: &Hand, target: u8) -> f64 {
        self.probability(Query::PlayerReach { target }, deck, hand)
    }

    /// Probability of busting on exactly one more card. See
    /// [`bust_on_next_card`].
    pub fn player_bust_on_hit_probability(&self, deck: &Deck, hand: &Hand) -> f64 {
        bust_on_next_card(deck, hand)
    }
}
