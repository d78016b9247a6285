//! Rounds played by the engine against a dealer.
//!
//! The player asks the engine before every card and follows
//! [`Action::recommend`]; the dealer draws below
//! [`DEALER_STAND_VALUE`] and stands on every 17. The hole card is drawn
//! after the player acts, which leaves the distribution the player faces
//! unchanged.

use rand::Rng;
use tracing::{debug, warn};

use crate::engine::{
    Deck, EngineError, Hand, HandValue, Outcome, ProbabilityEngine, Rank, BLACKJACK,
    DEALER_STAND_VALUE,
};
use crate::tables::Action;

/// A shoe dealt from at random, refilled from its full composition.
#[derive(Debug, Clone)]
pub struct Shoe {
    full: Deck,
    remaining: Deck,
    reshuffle_at: usize,
}

impl Shoe {
    /// Fresh shoe that reshuffles between rounds once fewer than
    /// `reshuffle_at` cards remain.
    pub fn new(full: Deck, reshuffle_at: usize) -> Result<Self, EngineError> {
        if full.is_empty() {
            return Err(EngineError::EmptyDeck);
        }
        Ok(Self {
            full,
            remaining: full,
            reshuffle_at,
        })
    }

    /// Cards not yet dealt.
    pub fn remaining(&self) -> &Deck {
        &self.remaining
    }

    /// Refill if the shoe is below its cut. Returns whether it did.
    pub fn reshuffle_if_low(&mut self) -> bool {
        if self.remaining.len() < self.reshuffle_at {
            self.remaining = self.full;
            true
        } else {
            false
        }
    }

    /// Deal one card, refilling mid-round if the shoe is empty.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Rank {
        loop {
            if let Some(card) = self.remaining.draw_random(rng) {
                return card;
            }
            warn!("shoe ran dry mid-round, reshuffling");
            self.remaining = self.full;
        }
    }
}

/// One consultation of the engine during the player's turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// Hand the decision was made on.
    pub hand: Hand,
    /// Engine numbers for that hand.
    pub outcome: Outcome,
    /// What the player did.
    pub action: Action,
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    /// Player beat the dealer or the dealer busted.
    PlayerWins,
    /// Player busted or finished below the dealer.
    DealerWins,
    /// Equal totals.
    Push,
}

/// A finished round.
#[derive(Debug, Clone)]
pub struct Round {
    /// Player's final hand.
    pub player: Hand,
    /// Dealer's final hand; only the up-card if the player busted.
    pub dealer: Hand,
    /// Every decision the player made, in order.
    pub decisions: Vec<Decision>,
    /// Result for the player.
    pub result: RoundResult,
}

/// Settle a round from both final hands.
pub fn settle(player: HandValue, dealer: HandValue) -> RoundResult {
    if player.is_bust() {
        RoundResult::DealerWins
    } else if dealer.is_bust() || player.high() > dealer.high() {
        RoundResult::PlayerWins
    } else if player.high() == dealer.high() {
        RoundResult::Push
    } else {
        RoundResult::DealerWins
    }
}

/// Play the player's turn against the dealer's up-card.
///
/// Stops on a stand, on 21 or on a bust; a busted hand is never offered
/// another card.
pub fn player_turn<R: Rng>(
    engine: &ProbabilityEngine,
    shoe: &mut Shoe,
    player: &mut Hand,
    dealer: &Hand,
    rng: &mut R,
) -> Vec<Decision> {
    let mut decisions = Vec::new();
    loop {
        let value = player.value();
        if value.is_bust() || value.high() >= BLACKJACK {
            break;
        }

        let outcome = engine.evaluate_all(shoe.remaining(), player, dealer);
        let action = Action::recommend(&outcome, value);
        decisions.push(Decision {
            hand: player.clone(),
            outcome,
            action,
        });
        if action == Action::Stand {
            break;
        }
        player.push(shoe.draw(rng));
    }
    decisions
}

/// Draw for the dealer until 17 or more, or bust.
pub fn dealer_turn<R: Rng>(shoe: &mut Shoe, dealer: &mut Hand, rng: &mut R) {
    loop {
        let value = dealer.value();
        if value.is_bust() || value.high() >= DEALER_STAND_VALUE {
            return;
        }
        dealer.push(shoe.draw(rng));
    }
}

/// Deal and play one full round.
pub fn play_round<R: Rng>(engine: &ProbabilityEngine, shoe: &mut Shoe, rng: &mut R) -> Round {
    if shoe.reshuffle_if_low() {
        debug!("reshuffling");
    }

    let mut player = Hand::new();
    player.push(shoe.draw(rng));
    player.push(shoe.draw(rng));
    let mut dealer = Hand::from_ranks(vec![shoe.draw(rng)]);

    let decisions = player_turn(engine, shoe, &mut player, &dealer, rng);
    if !player.value().is_bust() {
        dealer_turn(shoe, &mut dealer, rng);
    }
    let result = settle(player.value(), dealer.value());

    Round {
        player,
        dealer,
        decisions,
        result,
    }
}
