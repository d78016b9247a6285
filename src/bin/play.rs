//! Self-playing demo.
//!
//! Deals rounds from a seeded shoe and prints the engine's numbers at every
//! decision the player makes.

use std::error::Error;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use blackjack_odds::engine::{EngineConfig, Hand, ProbabilityEngine};
use blackjack_odds::play::{play_round, RoundResult, Shoe};

#[derive(Parser, Debug)]
#[command(author, version, about = "Watch the odds engine play blackjack")]
struct Args {
    /// Decks in the shoe
    #[arg(short, long, default_value_t = 1)]
    decks: u8,

    /// Rounds to play
    #[arg(short, long, default_value_t = 10)]
    rounds: u32,

    /// RNG seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Reshuffle when fewer cards than this remain
    #[arg(long, default_value_t = 15)]
    reshuffle_at: usize,

    /// Log verbosity (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

#[derive(Debug, Default)]
struct Tally {
    wins: u32,
    losses: u32,
    pushes: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let engine = ProbabilityEngine::try_new(EngineConfig::shoe(args.decks))?;
    let mut shoe = Shoe::new(engine.reference_deck()?, args.reshuffle_at)?;
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut tally = Tally::default();

    println!("=== Blackjack Demo ({} deck(s), seed {}) ===", args.decks, args.seed);

    for number in 1..=args.rounds {
        let round = play_round(&engine, &mut shoe, &mut rng);
        debug!(round = number, cards_left = shoe.remaining().len(), "round complete");

        println!(
            "\nRound {}: player {} vs dealer {}",
            number,
            Hand::from_ranks(round.player.cards().iter().take(2).copied().collect()),
            Hand::from_ranks(round.dealer.cards().iter().take(1).copied().collect())
        );
        for decision in &round.decisions {
            println!(
                "  {} ({}): win {:.1}% stand {:.1}% hit {:.1}% -> {}",
                decision.hand,
                decision.hand.value(),
                decision.outcome.win * 100.0,
                decision.outcome.stand * 100.0,
                decision.outcome.hit * 100.0,
                decision.action.label()
            );
        }

        if round.player.value().is_bust() {
            println!("  Player busts with {}", round.player);
        } else {
            println!("  Dealer ends {} ({})", round.dealer, round.dealer.value());
        }

        match round.result {
            RoundResult::PlayerWins => {
                println!("  Player wins");
                tally.wins += 1;
            }
            RoundResult::Push => {
                println!("  Push");
                tally.pushes += 1;
            }
            RoundResult::DealerWins => {
                println!("  Dealer wins");
                tally.losses += 1;
            }
        }
    }

    let stats = engine.cache_stats();
    println!(
        "\n=== Result: {} won, {} lost, {} pushed ===",
        tally.wins, tally.losses, tally.pushes
    );
    println!(
        "Cache: {} entries, {:.1}% hit rate, {} evictions",
        stats.entries,
        stats.hit_rate() * 100.0,
        stats.evictions
    );
    Ok(())
}
