pub mod damping;
pub mod engine;
pub mod types;

pub use damping::{correction, trial_factor};
pub use engine::RatingEngine;
pub use types::LedgerState;
