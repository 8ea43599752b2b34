use crate::domain::{GamesPlayed, RatingState};

/// The accumulator threaded through the match fold.
///
/// Scoring match N reads exactly the ratings and games-played counts left by
/// every match before it, so matches must be folded strictly in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerState {
    pub ratings: RatingState,
    pub games_played: GamesPlayed,
}

impl LedgerState {
    pub fn new(ratings: RatingState, games_played: GamesPlayed) -> Self {
        Self {
            ratings,
            games_played,
        }
    }

    pub fn games_for(&self, player: &str) -> u32 {
        self.games_played.get(player).copied().unwrap_or(0)
    }
}
