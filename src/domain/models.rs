use std::collections::HashMap;
use std::fmt;

use super::normalize::{DateValue, Numeric, format_date};

/// Player identity: a roster name.
pub type Player = String;

/// Running rating per player. Values keep the numeric form they were read in.
pub type RatingState = HashMap<Player, Numeric>;

/// Matches counted towards damping, per player.
pub type GamesPlayed = HashMap<Player, u32>;

/// Identifies a match across runs: normalized date plus trimmed match id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchKey {
    pub date: DateValue,
    pub match_id: String,
}

impl MatchKey {
    pub fn new(date: DateValue, match_id: &str) -> Self {
        Self {
            date,
            match_id: match_id.trim().to_string(),
        }
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} game {}", format_date(&self.date), self.match_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub player: Player,
    pub rank: f64,
}

/// One scored table. Read-only once built by reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub key: MatchKey,
    pub participants: Vec<Participant>,
}

impl Match {
    pub fn rank_of(&self, player: &str) -> Option<f64> {
        self.participants
            .iter()
            .find(|p| p.player == player)
            .map(|p| p.rank)
    }

    pub fn player_names(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.player.as_str()).collect()
    }
}
