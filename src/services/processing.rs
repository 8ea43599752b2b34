use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{info, warn};

use crate::config::AppConfig;
use crate::domain::Player;
use crate::ledger::{LedgerWriter, Reconciler, Table};
use crate::rating::{LedgerState, RatingEngine};

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub scored_matches: usize,
    pub delta_ledger: PathBuf,
    pub rating_ledger: PathBuf,
    /// Final counters in roster order.
    pub games_played: Vec<(Player, u32)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Updated(RunSummary),
    NoNewMatches,
}

pub struct ProcessingService {
    config: AppConfig,
}

impl ProcessingService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Read everything, score everything, then write both ledgers.
    ///
    /// Nothing is written unless the whole run succeeds, and nothing at all
    /// when there is no new match.
    pub fn run(&self, input: &Path) -> Result<RunOutcome> {
        info!("=== Starting Rating Update ===");

        let session = Table::read(input)?;
        info!("  → Loaded {} session rows from {}", session.len(), input.display());

        let delta_path = &self.config.ledger.delta_ledger_path;
        let rating_path = &self.config.ledger.rating_ledger_path;
        let delta_ledger = self.load_ledger("delta ledger", delta_path);
        let rating_ledger = self.load_ledger("rating ledger", rating_path);

        let reconciliation =
            Reconciler::new(&self.config).reconcile(&session, delta_ledger.as_ref(), rating_ledger.as_ref());

        if reconciliation.new_matches.is_empty() {
            info!("=== No new matches to process ===");
            return Ok(RunOutcome::NoNewMatches);
        }
        info!("  → {} new matches to score", reconciliation.new_matches.len());

        let state = LedgerState::new(reconciliation.ratings, reconciliation.games_played);
        let (state, scored) =
            RatingEngine::new(&self.config).score_all(state, &reconciliation.new_matches);

        let writer = LedgerWriter::new(&self.config);
        let merged = writer.merge(delta_ledger.as_ref(), rating_ledger.as_ref(), &scored);
        writer.persist(&merged, delta_path, rating_path)?;

        info!("=== Rating Update Complete ===");
        Ok(RunOutcome::Updated(RunSummary {
            scored_matches: scored.len(),
            delta_ledger: delta_path.clone(),
            rating_ledger: rating_path.clone(),
            games_played: self
                .config
                .roster
                .iter()
                .map(|player| (player.to_string(), state.games_for(player)))
                .collect(),
        }))
    }

    /// A missing or unreadable ledger is an empty history, not a failure.
    fn load_ledger(&self, kind: &str, path: &Path) -> Option<Table> {
        if !path.exists() {
            info!("  → No {} at {}, starting from empty history", kind, path.display());
            return None;
        }

        match Table::read(path) {
            Ok(table) => {
                info!("  → Loaded {} rows from {} {}", table.len(), kind, path.display());
                Some(table)
            }
            Err(e) => {
                warn!("{}: {:#}", crate::errors::read_context(kind, path), anyhow::Error::from(e));
                None
            }
        }
    }
}
