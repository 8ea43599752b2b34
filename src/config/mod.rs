pub mod columns;
pub mod roster;
pub mod settings;

pub use columns::{Column, ColumnSchema};
pub use roster::Roster;
pub use settings::{AppConfig, LedgerSettings, RatingSettings};
