pub mod models;
pub mod normalize;
pub mod progress;

pub use models::{GamesPlayed, Match, MatchKey, Participant, Player, RatingState};
pub use normalize::{DateValue, Numeric, clean_numeric, format_date, normalize_date, round2};
pub use progress::ScoringProgress;
