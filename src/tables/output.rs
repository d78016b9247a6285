//! Whole-table generation and JSON persistence.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{StrategyGrid, TableError};
use crate::engine::{EngineConfig, ProbabilityEngine, Rank};

/// Provenance of a generated table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Decks in the shoe the table was built from.
    pub num_decks: u8,
    /// Per-worker cache capacity used during generation.
    pub cache_capacity: usize,
    /// Wall-clock generation time.
    pub elapsed_secs: f64,
    /// Seconds since the Unix epoch at generation time.
    pub timestamp: u64,
}

/// Grids for every dealer up-card, 2 through ace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTable {
    /// How the table was produced.
    pub metadata: TableMetadata,
    /// One grid per dealer up-card, in rank order.
    pub grids: Vec<StrategyGrid>,
}

impl LookupTable {
    /// Build every grid from a fresh shoe of `config.num_decks` decks.
    pub fn generate(config: &EngineConfig) -> Result<Self, TableError> {
        Self::generate_with_progress(config, |_| {})
    }

    /// Like [`generate`](Self::generate), calling `on_grid` as each dealer
    /// up-card finishes.
    ///
    /// Up-cards are solved in parallel. Each worker owns its engine so the
    /// caches never contend.
    pub fn generate_with_progress<F>(config: &EngineConfig, on_grid: F) -> Result<Self, TableError>
    where
        F: Fn(Rank) + Sync,
    {
        config.validate()?;

        let start = Instant::now();
        let shoe = ProbabilityEngine::new(config.clone()).reference_deck()?;
        info!(decks = config.num_decks, cards = shoe.len(), "generating lookup table");

        let grids = Rank::ALL
            .par_iter()
            .map(|&dealer_card| -> Result<StrategyGrid, TableError> {
                let engine = ProbabilityEngine::new(config.clone());
                let grid = StrategyGrid::build(&engine, &shoe, dealer_card)?;
                let stats = engine.cache_stats();
                info!(
                    dealer = %dealer_card,
                    expected_win = grid.expected_win,
                    cache_hit_rate = stats.hit_rate(),
                    "grid complete"
                );
                on_grid(dealer_card);
                Ok(grid)
            })
            .collect::<Result<Vec<_>, TableError>>()?;

        let elapsed_secs = start.elapsed().as_secs_f64();
        info!(elapsed_secs, "lookup table complete");

        Ok(Self {
            metadata: TableMetadata {
                num_decks: config.num_decks,
                cache_capacity: config.cache_capacity,
                elapsed_secs,
                timestamp: SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0),
            },
            grids,
        })
    }

    /// Grid for one dealer up-card.
    pub fn grid(&self, dealer_card: Rank) -> Option<&StrategyGrid> {
        self.grids.iter().find(|g| g.dealer_card == dealer_card)
    }

    /// Save as pretty JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Load a table written by [`save_json`](Self::save_json).
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Print a per-dealer-card summary.
    pub fn print_summary(&self) {
        println!("\n=== Lookup Table Summary ===");
        println!(
            "Decks: {} | Grids: {} | Generated in {:.1}s\n",
            self.metadata.num_decks,
            self.grids.len(),
            self.metadata.elapsed_secs
        );
        println!("{:<8} {:>12} {:>12} {:>8}", "Dealer", "Dealer bust", "Expected win", "Hits");
        println!("{}", "-".repeat(44));

        for grid in &self.grids {
            let hits = grid
                .cells
                .iter()
                .flatten()
                .filter(|c| c.action == super::Action::Hit)
                .count();
            println!(
                "{:<8} {:>11.2}% {:>11.2}% {:>8}",
                grid.dealer_card.to_string(),
                grid.dealer_bust * 100.0,
                grid.expected_win * 100.0,
                hits
            );
        }
    }
}
