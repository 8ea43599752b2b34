use log::{debug, warn};

use super::damping::{correction, trial_factor};
use super::types::LedgerState;
use crate::config::AppConfig;
use crate::domain::{Match, Numeric, RatingState, ScoringProgress, round2};
use crate::ledger::{DeltaRow, RatingRow, ScoredMatch};

/// Scores matches one after another against the running ledger state.
pub struct RatingEngine<'a> {
    config: &'a AppConfig,
}

impl<'a> RatingEngine<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Fold every match, in order, over the starting state.
    pub fn score_all(&self, state: LedgerState, matches: &[Match]) -> (LedgerState, Vec<ScoredMatch>) {
        let mut progress = ScoringProgress::new(matches.len());

        matches.iter().fold(
            (state, Vec::with_capacity(matches.len())),
            |(mut state, mut scored), m| {
                scored.push(self.score_match(&mut state, m));
                progress.increment();
                (state, scored)
            },
        )
    }

    /// Mean rating of the table, rounded to cents. Falls back to the initial
    /// rating when no participant has a usable rating.
    pub fn field_average(&self, m: &Match, ratings: &RatingState) -> f64 {
        let known: Vec<f64> = m
            .participants
            .iter()
            .filter_map(|p| ratings.get(&p.player))
            .filter(|rating| rating.is_finite())
            .map(|rating| rating.as_f64())
            .collect();

        if known.is_empty() {
            return self.config.rating.initial_rating;
        }
        round2(known.iter().sum::<f64>() / known.len() as f64)
    }

    /// Score one match and advance `state` past it.
    pub fn score_match(&self, state: &mut LedgerState, m: &Match) -> ScoredMatch {
        let settings = &self.config.rating;
        let initial = Numeric::Float(settings.initial_rating);
        let field_average = self.field_average(m, &state.ratings);

        let mut deltas = Vec::with_capacity(self.config.roster.len());
        let mut ratings = Vec::with_capacity(self.config.roster.len());

        for player in self.config.roster.iter() {
            let current = state.ratings.get(player).copied();

            let Some(rank) = m.rank_of(player) else {
                deltas.push((player.to_string(), Numeric::Int(0)));
                ratings.push((player.to_string(), current.unwrap_or(initial)));
                continue;
            };

            let Some(rating) = current.filter(|r| r.is_finite()).map(Numeric::as_f64) else {
                warn!("{} has no usable rating before {}, leaving it unchanged", player, m.key);
                deltas.push((player.to_string(), Numeric::Int(0)));
                ratings.push((player.to_string(), current.unwrap_or(initial)));
                continue;
            };

            let factor = trial_factor(state.games_for(player), settings);
            let points = settings.points_for(rank);
            let delta = round2(factor * (points + correction(field_average, rating, settings)));
            let updated = round2(rating + delta);

            debug!(
                "{} {}: rank {} factor {:.3} delta {:+.2} -> {:.2}",
                m.key, player, rank, factor, delta, updated
            );

            state.ratings.insert(player.to_string(), Numeric::Float(updated));
            deltas.push((player.to_string(), Numeric::Float(delta)));
            ratings.push((player.to_string(), Numeric::Float(updated)));
        }

        // Counts move only after the whole table is scored.
        for participant in &m.participants {
            *state
                .games_played
                .entry(participant.player.clone())
                .or_insert(0) += 1;
        }

        ScoredMatch {
            delta: DeltaRow {
                key: m.key.clone(),
                field_average,
                deltas,
            },
            rating: RatingRow {
                key: m.key.clone(),
                ratings,
            },
        }
    }
}
