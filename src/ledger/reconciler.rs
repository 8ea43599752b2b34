use std::collections::HashSet;

use log::{debug, info, warn};

use super::table::{Table, TableRow};
use crate::config::AppConfig;
use crate::domain::{
    DateValue, GamesPlayed, Match, MatchKey, Numeric, Participant, RatingState, clean_numeric,
    normalize_date,
};

/// Prior state recovered from the ledgers plus the matches still to score.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    pub games_played: GamesPlayed,
    pub already_processed: HashSet<MatchKey>,
    pub ratings: RatingState,
    pub new_matches: Vec<Match>,
}

pub struct Reconciler<'a> {
    config: &'a AppConfig,
}

impl<'a> Reconciler<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    pub fn reconcile(
        &self,
        session: &Table,
        delta_ledger: Option<&Table>,
        rating_ledger: Option<&Table>,
    ) -> Reconciliation {
        let games_played = self.count_games_played(delta_ledger);
        let already_processed = self.collect_processed(delta_ledger);
        let ratings = self.current_ratings(rating_ledger);
        let new_matches = self.extract_new_matches(session, &already_processed);

        Reconciliation {
            games_played,
            already_processed,
            ratings,
            new_matches,
        }
    }

    /// A nonzero delta in the ledger counts as one match played.
    pub fn count_games_played(&self, delta_ledger: Option<&Table>) -> GamesPlayed {
        let mut games: GamesPlayed = self
            .config
            .roster
            .iter()
            .map(|player| (player.to_string(), 0))
            .collect();

        let Some(ledger) = delta_ledger else {
            return games;
        };

        for row in &ledger.rows {
            for player in self.config.roster.iter() {
                let Some(cell) = row.get(player).filter(|cell| !cell.is_empty()) else {
                    continue;
                };
                match clean_numeric(Some(cell)) {
                    Some(delta) if !delta.is_zero() => {
                        if let Some(count) = games.get_mut(player) {
                            *count += 1;
                        }
                    }
                    Some(_) => {}
                    None => debug!("Ignoring non-numeric delta {:?} for {}", cell, player),
                }
            }
        }

        info!("Recovered games played from delta ledger: {}", self.describe(&games));
        games
    }

    pub fn collect_processed(&self, delta_ledger: Option<&Table>) -> HashSet<MatchKey> {
        let Some(ledger) = delta_ledger else {
            return HashSet::new();
        };

        let columns = &self.config.columns;
        let processed: HashSet<MatchKey> = ledger
            .rows
            .iter()
            .filter_map(|row| {
                let date = normalize_date(columns.date.resolve(row)?);
                let match_id = columns.match_id.resolve(row)?;
                (!self.is_placeholder(&date)).then(|| MatchKey::new(date, match_id))
            })
            .collect();

        info!("Delta ledger already covers {} matches", processed.len());
        processed
    }

    /// Ratings from the newest non-placeholder row; everyone else starts fresh.
    pub fn current_ratings(&self, rating_ledger: Option<&Table>) -> RatingState {
        let mut ratings = RatingState::new();

        let latest = rating_ledger.and_then(|ledger| {
            ledger.rows.iter().rev().find(|row| {
                self.config
                    .columns
                    .date
                    .resolve(row)
                    .is_some_and(|date| !self.is_placeholder(&normalize_date(date)))
            })
        });

        if let Some(row) = latest {
            for player in self.config.roster.iter() {
                match clean_numeric(row.get(player)) {
                    Some(rating) if !rating.is_zero() => {
                        ratings.insert(player.to_string(), rating);
                    }
                    Some(_) => {}
                    None => {
                        if row.get(player).is_some_and(|cell| !cell.is_empty()) {
                            warn!("Unparseable rating for {} in rating ledger, using default", player);
                        }
                    }
                }
            }
            info!("Loaded current ratings for {} players from rating ledger", ratings.len());
        }

        let initial = Numeric::Float(self.config.rating.initial_rating);
        for player in self.config.roster.iter() {
            ratings.entry(player.to_string()).or_insert(initial);
        }
        ratings
    }

    /// Unscored session rows, in file order, with ranks attached.
    pub fn extract_new_matches(
        &self,
        session: &Table,
        already_processed: &HashSet<MatchKey>,
    ) -> Vec<Match> {
        let columns = &self.config.columns;
        let mut seen = HashSet::new();
        let mut matches = Vec::new();

        for (idx, row) in session.rows.iter().enumerate() {
            let line = idx + 2;
            let (Some(date), Some(match_id)) = (columns.date.resolve(row), columns.match_id.resolve(row))
            else {
                warn!(
                    "Skipping row {}: date={:?}, game={:?}",
                    line,
                    columns.date.resolve(row),
                    columns.match_id.resolve(row)
                );
                continue;
            };

            let key = MatchKey::new(normalize_date(date), match_id);
            if key.match_id.is_empty() || key.date.is_empty() {
                warn!("Skipping row {}: blank date or game", line);
                continue;
            }

            if already_processed.contains(&key) {
                info!("Skipping already processed: {}", key);
                continue;
            }

            if !seen.insert(key.clone()) {
                warn!("Skipping row {}: duplicate of {} earlier in the file", line, key);
                continue;
            }

            let participants = self.extract_participants(row);
            if participants.is_empty() {
                warn!("Skipping {}: no player has a rank between 1 and 4", key);
                continue;
            }

            let m = Match { key, participants };
            info!("New match: {} - players: {:?}", m.key, m.player_names());
            matches.push(m);
        }

        matches
    }

    fn extract_participants(&self, row: &TableRow) -> Vec<Participant> {
        let rating = &self.config.rating;
        self.config
            .roster
            .iter()
            .filter_map(|player| {
                let rank = clean_numeric(row.get(player))?.as_f64();
                rating.is_valid_rank(rank).then(|| Participant {
                    player: player.to_string(),
                    rank,
                })
            })
            .collect()
    }

    fn is_placeholder(&self, date: &DateValue) -> bool {
        date.as_date() == Some(self.config.rating.placeholder_date)
    }

    fn describe(&self, games: &GamesPlayed) -> String {
        self.config
            .roster
            .iter()
            .map(|player| format!("{}={}", player, games.get(player).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
