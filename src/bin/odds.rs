//! Exact odds for a single decision.
//!
//! ```text
//! odds --player 10,6 --dealer 10
//! odds --decks 6 --player 11,7 --dealer 9 --removed 10,10,5
//! ```

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use blackjack_odds::engine::{
    deck_bias, EngineConfig, Hand, ProbabilityEngine, Rank, DEALER_FINAL_TOTALS,
};
use blackjack_odds::tables::Action;

#[derive(Parser, Debug)]
#[command(author, version, about = "Exact win / stand / hit odds for one blackjack decision")]
struct Args {
    /// Decks in the shoe
    #[arg(short, long, default_value_t = 1)]
    decks: u8,

    /// Player's cards, e.g. 10,6 (ace = 11)
    #[arg(short, long, value_delimiter = ',', required = true)]
    player: Vec<u8>,

    /// Dealer's exposed cards
    #[arg(long, value_delimiter = ',', required = true)]
    dealer: Vec<u8>,

    /// Other cards already seen and out of the shoe
    #[arg(short, long, value_delimiter = ',')]
    removed: Vec<u8>,

    /// JSON engine config; overrides --decks
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log timings and cache statistics per evaluation
    #[arg(long, default_value_t = false)]
    timings: bool,

    /// Log verbosity (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::shoe(args.decks),
    }
    .with_timings(args.timings);
    let engine = ProbabilityEngine::try_new(config)?;

    let player = Hand::from_values(&args.player)?;
    let dealer = Hand::from_values(&args.dealer)?;
    let removed = args
        .removed
        .iter()
        .map(|&v| Rank::new(v))
        .collect::<Result<Vec<_>, _>>()?;

    let shoe = engine.reference_deck()?;
    let mut deck = shoe;
    deck.remove_all(player.cards())?;
    deck.remove_all(dealer.cards())?;
    deck.remove_all(&removed)?;
    info!(cards_left = deck.len(), %player, %dealer, "evaluating");

    let outcome = engine.evaluate_all(&deck, &player, &dealer);
    let bust_on_hit = engine.player_bust_on_hit_probability(&deck, &player);
    let dealer_outcomes = engine.dealer_outcomes(&deck, &dealer);
    let bias = deck_bias(&shoe, &deck)?;

    println!("=== Blackjack Odds ===\n");
    println!("Player: {} ({})", player, player.value());
    println!("Dealer: {} ({})", dealer, dealer.value());
    println!("Deck:   {}\n", deck);

    println!("Win:          {:>7.2}%", outcome.win * 100.0);
    println!("Stand:        {:>7.2}%", outcome.stand * 100.0);
    println!("Hit:          {:>7.2}%", outcome.hit * 100.0);
    println!("Bust on hit:  {:>7.2}%", bust_on_hit * 100.0);
    println!("Dealer bust:  {:>7.2}%", dealer_outcomes.bust * 100.0);
    for total in DEALER_FINAL_TOTALS {
        println!("Dealer {}:    {:>7.2}%", total, dealer_outcomes.finishing_on(total) * 100.0);
    }
    println!("Deck bias:    {:>+7.2}%", bias);
    let action = Action::recommend(&outcome, player.value());
    println!("\nRecommendation: {}", action.label().to_uppercase());

    let stats = engine.cache_stats();
    info!(
        entries = stats.entries,
        hit_rate = stats.hit_rate(),
        evictions = stats.evictions,
        "cache"
    );
    Ok(())
}
