use serde::{Deserialize, Serialize};

use crate::ledger::TableRow;

/// A semantic column: the name we write plus the legacy headers we still accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub canonical: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Column {
    pub fn new(canonical: &str, aliases: &[&str]) -> Self {
        Self {
            canonical: canonical.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// First non-empty value among the canonical header and its aliases.
    pub fn resolve<'r>(&self, row: &'r TableRow) -> Option<&'r str> {
        std::iter::once(&self.canonical)
            .chain(self.aliases.iter())
            .filter_map(|name| row.get(name))
            .find(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    pub date: Column,
    pub match_id: Column,
    pub field_average: Column,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            date: Column::new("日付", &["Date", "Date."]),
            match_id: Column::new("半荘", &["game", "game "]),
            field_average: Column::new("平均Rt.", &[]),
        }
    }
}
