//! Lookup Table Generator
//!
//! Solves every two-card starting hand against every dealer up-card and
//! writes the result as JSON.

use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use blackjack_odds::engine::{EngineConfig, Rank};
use blackjack_odds::tables::LookupTable;

#[derive(Parser, Debug)]
#[command(author, version, about = "Precompute blackjack decision tables")]
struct Args {
    /// Decks in the shoe
    #[arg(short, long, default_value_t = 1)]
    decks: u8,

    /// Output file
    #[arg(short, long, default_value = "lookup_table.json")]
    output: PathBuf,

    /// Per-worker cache capacity
    #[arg(long)]
    cache_capacity: Option<usize>,

    /// Print every grid after generation
    #[arg(long, default_value_t = false)]
    grids: bool,

    /// Log verbosity (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    println!("=== Blackjack Lookup Table Generator ===\n");

    let mut config = EngineConfig::shoe(args.decks);
    if let Some(capacity) = args.cache_capacity {
        config = config.with_cache_capacity(capacity);
    }
    println!(
        "Decks: {} | Cache capacity per worker: {}",
        config.num_decks, config.cache_capacity
    );

    let pb = ProgressBar::new(Rank::ALL.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} dealer cards {msg}")?
            .progress_chars("##-"),
    );

    let start = Instant::now();
    let table = LookupTable::generate_with_progress(&config, |dealer_card| {
        pb.set_message(format!("(last: {})", dealer_card));
        pb.inc(1);
    })?;
    pb.finish_with_message("done");

    table.save_json(&args.output)?;
    println!(
        "\nSaved {} in {:.1}s",
        args.output.display(),
        start.elapsed().as_secs_f64()
    );

    table.print_summary();
    if args.grids {
        for grid in &table.grids {
            grid.print_grid();
        }
    }
    Ok(())
}
