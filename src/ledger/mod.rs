pub mod models;
pub mod reconciler;
pub mod table;
pub mod writer;

pub use models::{DeltaRow, RatingRow, ScoredMatch};
pub use reconciler::{Reconciler, Reconciliation};
pub use table::{Table, TableRow};
pub use writer::{LedgerWriter, MergedLedgers};
