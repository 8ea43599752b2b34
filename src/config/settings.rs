use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use super::columns::ColumnSchema;
use super::roster::Roster;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    pub initial_rating: f64,
    /// Points awarded per finishing rank. Ranks missing here score 0.
    pub rank_points: BTreeMap<u32, f64>,
    pub games_cap: u32,
    pub damping_per_game: f64,
    pub correction_divisor: f64,
    /// Ledger rows dated on this day are templates, never matches.
    pub placeholder_date: NaiveDate,
    pub min_rank: f64,
    pub max_rank: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            initial_rating: 1500.0,
            rank_points: BTreeMap::from([(1, 30.0), (2, 10.0), (3, -10.0), (4, -30.0)]),
            games_cap: 400,
            damping_per_game: 0.002,
            correction_divisor: 40.0,
            placeholder_date: NaiveDate::from_ymd_opt(1999, 1, 1).unwrap_or_default(),
            min_rank: 1.0,
            max_rank: 4.0,
        }
    }
}

impl RatingSettings {
    pub fn points_for(&self, rank: f64) -> f64 {
        if rank.fract() != 0.0 || rank < 0.0 || rank > u32::MAX as f64 {
            return 0.0;
        }
        self.rank_points.get(&(rank as u32)).copied().unwrap_or(0.0)
    }

    pub fn is_valid_rank(&self, rank: f64) -> bool {
        rank != 0.0 && rank >= self.min_rank && rank <= self.max_rank
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSettings {
    pub default_input_path: PathBuf,
    pub delta_ledger_path: PathBuf,
    pub rating_ledger_path: PathBuf,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            default_input_path: PathBuf::from("半荘順位.csv"),
            delta_ledger_path: PathBuf::from("Rt.変動値.csv"),
            rating_ledger_path: PathBuf::from("Rt.算出.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub ledger: LedgerSettings,
    pub roster: Roster,
    pub columns: ColumnSchema,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiled-in defaults, overlaid with a JSON settings file when one is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::new());
        };

        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

        info!(
            "Loaded settings from {} ({} roster players)",
            path.display(),
            config.roster.len()
        );
        Ok(config)
    }
}
