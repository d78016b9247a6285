//! One dealer up-card's grid of starting hands.

use serde::{Deserialize, Serialize};

use super::{ratios, Action};
use crate::engine::{
    Deck, EngineError, Hand, HandValue, Outcome, ProbabilityEngine, Rank, DEALER_STAND_VALUE,
};

/// Probabilities and recommendation for one starting hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    /// Player's first card.
    pub card1: Rank,
    /// Player's second card.
    pub card2: Rank,
    /// High total of the two cards.
    pub total: u8,
    /// Win / stand / hit.
    pub outcome: Outcome,
    /// `hit / win`.
    pub hit_ratio: f64,
    /// `stand / win`.
    pub stand_ratio: f64,
    /// Recommended play.
    pub action: Action,
}

impl GridCell {
    fn new(card1: Rank, card2: Rank, value: HandValue, outcome: Outcome) -> Self {
        let (hit_ratio, stand_ratio) = ratios(&outcome);
        Self {
            card1,
            card2,
            total: value.high(),
            outcome,
            hit_ratio,
            stand_ratio,
            action: Action::recommend(&outcome, value),
        }
    }
}

/// All 100 two-card starting hands against one dealer up-card.
///
/// `cells[i][j]` holds the hand `Rank::ALL[i]`, `Rank::ALL[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyGrid {
    /// Dealer's exposed card.
    pub dealer_card: Rank,
    /// Dealer bust probability with only the up-card removed from the shoe.
    pub dealer_bust: f64,
    /// Mean win probability over all cells.
    pub expected_win: f64,
    /// 10×10 cells indexed by rank.
    pub cells: Vec<Vec<GridCell>>,
}

impl StrategyGrid {
    /// Evaluate every starting hand against `dealer_card`, drawing from
    /// `shoe` minus the three visible cards.
    pub fn build(engine: &ProbabilityEngine, shoe: &Deck, dealer_card: Rank) -> Result<Self, EngineError> {
        let dealer = Hand::from_ranks(vec![dealer_card]);

        let mut after_up = *shoe;
        after_up.remove(dealer_card)?;
        let dealer_bust = engine.dealer_bust_probability(&after_up, &dealer, DEALER_STAND_VALUE);

        let n = Rank::ALL.len();
        let mut slots: Vec<Vec<Option<GridCell>>> = vec![vec![None; n]; n];

        // (a, b) and (b, a) draw from the same deck and evaluate alike, so
        // each unordered pair is computed once.
        for i in 0..n {
            for j in i..n {
                let (card1, card2) = (Rank::ALL[i], Rank::ALL[j]);
                let mut deck = after_up;
                deck.remove(card1)?;
                deck.remove(card2)?;

                let player = Hand::from_ranks(vec![card1, card2]);
                let value = player.value();
                let outcome = engine.evaluate_all(&deck, &player, &dealer);

                slots[j][i] = Some(GridCell::new(card2, card1, value, outcome));
                slots[i][j] = Some(GridCell::new(card1, card2, value, outcome));
            }
        }

        let cells: Vec<Vec<GridCell>> = slots
            .into_iter()
            .map(|row| row.into_iter().flatten().collect())
            .collect();
        let count = (n * n) as f64;
        let expected_win = cells.iter().flatten().map(|c| c.outcome.win).sum::<f64>() / count;

        Ok(Self {
            dealer_card,
            dealer_bust,
            expected_win,
            cells,
        })
    }

    /// Cell for the starting hand `card1`, `card2`.
    pub fn cell(&self, card1: Rank, card2: Rank) -> &GridCell {
        &self.cells[card1.index()][card2.index()]
    }

    /// Print as text grid.
    pub fn print_grid(&self) {
        println!("\n=== Dealer shows {} ===", self.dealer_card);
        println!(
            "Expected win: {:.2}% | Dealer bust: {:.2}%\n",
            self.expected_win * 100.0,
            self.dealer_bust * 100.0
        );

        print!("     ");
        for rank in Rank::ALL {
            print!("{:>7}", rank.to_string());
        }
        println!();

        for (rank, row) in Rank::ALL.iter().zip(&self.cells) {
            print!("{:>3}  ", rank.to_string());
            for cell in row {
                let marker = match cell.action {
                    Action::Hit => 'H',
                    Action::Stand => 'S',
                };
                print!("{:>2}{:>4.0}%", marker, cell.outcome.win * 100.0);
            }
            println!();
        }
    }
}
