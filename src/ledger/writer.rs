use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::{info, warn};

use super::models::ScoredMatch;
use super::table::{self, Table, TableRow};
use crate::config::AppConfig;
use crate::domain::Numeric;
use crate::errors;

/// Full contents of both ledgers, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedLedgers {
    pub delta_header: Vec<String>,
    pub delta_rows: Vec<Vec<String>>,
    pub rating_header: Vec<String>,
    pub rating_rows: Vec<Vec<String>>,
}

pub struct LedgerWriter<'a> {
    config: &'a AppConfig,
}

impl<'a> LedgerWriter<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    pub fn delta_header(&self) -> Vec<String> {
        let columns = &self.config.columns;
        let mut header = vec![
            columns.date.canonical.clone(),
            columns.match_id.canonical.clone(),
            columns.field_average.canonical.clone(),
        ];
        header.extend(self.config.roster.players().iter().cloned());
        header
    }

    pub fn rating_header(&self) -> Vec<String> {
        let columns = &self.config.columns;
        let mut header = vec![
            columns.date.canonical.clone(),
            columns.match_id.canonical.clone(),
        ];
        header.extend(self.config.roster.players().iter().cloned());
        header
    }

    /// Existing delta rows in the canonical layout. A player column the old
    /// header never had becomes `0`; a blank or ragged cell stays blank.
    pub fn normalize_delta_rows(&self, existing: Option<&Table>) -> Vec<Vec<String>> {
        let missing = Numeric::Int(0).to_string();
        existing
            .map(|ledger| {
                let known: Vec<bool> = self
                    .config
                    .roster
                    .iter()
                    .map(|player| ledger.headers.iter().any(|h| h == player))
                    .collect();
                ledger
                    .rows
                    .iter()
                    .map(|row| {
                        let mut record = self.key_cells(row);
                        record.push(
                            self.config
                                .columns
                                .field_average
                                .resolve(row)
                                .unwrap_or_default()
                                .to_string(),
                        );
                        record.extend(self.config.roster.iter().zip(&known).map(
                            |(player, &in_header)| {
                                if in_header {
                                    row.get(player).unwrap_or_default().to_string()
                                } else {
                                    missing.clone()
                                }
                            },
                        ));
                        record
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Existing rating rows in the canonical layout. Absent or blank player
    /// cells take the initial rating.
    pub fn normalize_rating_rows(&self, existing: Option<&Table>) -> Vec<Vec<String>> {
        let initial = Numeric::Float(self.config.rating.initial_rating).to_string();
        existing
            .map(|ledger| {
                ledger
                    .rows
                    .iter()
                    .map(|row| {
                        let mut record = self.key_cells(row);
                        record.extend(self.config.roster.iter().map(|player| {
                            row.get(player)
                                .filter(|cell| !cell.is_empty())
                                .map_or_else(|| initial.clone(), str::to_string)
                        }));
                        record
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Existing rows first, in their original order, then the new ones.
    pub fn merge(
        &self,
        delta_ledger: Option<&Table>,
        rating_ledger: Option<&Table>,
        scored: &[ScoredMatch],
    ) -> MergedLedgers {
        let mut delta_rows = self.normalize_delta_rows(delta_ledger);
        delta_rows.extend(scored.iter().map(|s| s.delta.to_record()));

        let mut rating_rows = self.normalize_rating_rows(rating_ledger);
        rating_rows.extend(scored.iter().map(|s| s.rating.to_record()));

        MergedLedgers {
            delta_header: self.delta_header(),
            delta_rows,
            rating_header: self.rating_header(),
            rating_rows,
        }
    }

    /// Replace both ledger files. Both are staged next to their targets and only
    /// renamed into place once every byte has been written.
    pub fn persist(&self, merged: &MergedLedgers, delta_path: &Path, rating_path: &Path) -> Result<()> {
        let delta_bytes = table::render(&merged.delta_header, &merged.delta_rows)?;
        let rating_bytes = table::render(&merged.rating_header, &merged.rating_rows)?;

        let delta_tmp = staging_path(delta_path)?;
        let rating_tmp = staging_path(rating_path)?;

        fs::write(&delta_tmp, delta_bytes)
            .with_context(|| errors::write_context("delta ledger", &delta_tmp))?;
        if let Err(e) = fs::write(&rating_tmp, rating_bytes) {
            let _ = fs::remove_file(&delta_tmp);
            return Err(e).with_context(|| errors::write_context("rating ledger", &rating_tmp));
        }

        fs::rename(&delta_tmp, delta_path)
            .with_context(|| errors::write_context("delta ledger", delta_path))?;
        if let Err(e) = fs::rename(&rating_tmp, rating_path) {
            let _ = fs::remove_file(&rating_tmp);
            warn!(
                "{} was replaced but {} was not; the two ledgers are out of step",
                delta_path.display(),
                rating_path.display()
            );
            return Err(e).with_context(|| errors::write_context("rating ledger", rating_path));
        }

        info!(
            "Wrote {} delta rows to {} and {} rating rows to {}",
            merged.delta_rows.len(),
            delta_path.display(),
            merged.rating_rows.len(),
            rating_path.display()
        );
        Ok(())
    }

    fn key_cells(&self, row: &TableRow) -> Vec<String> {
        let columns = &self.config.columns;
        vec![
            columns.date.resolve(row).unwrap_or_default().to_string(),
            columns.match_id.resolve(row).unwrap_or_default().to_string(),
        ]
    }
}

fn staging_path(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| anyhow!("Ledger path {} has no file name", path.display()))?;
    let mut staged = name.to_os_string();
    staged.push(".tmp");
    Ok(path.with_file_name(staged))
}
