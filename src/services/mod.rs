pub mod processing;

pub use processing::{ProcessingService, RunOutcome, RunSummary};
