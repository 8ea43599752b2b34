use crate::domain::{MatchKey, Numeric, Player, format_date};

/// Per-match rating changes, one cell per roster player in roster order.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaRow {
    pub key: MatchKey,
    pub field_average: f64,
    pub deltas: Vec<(Player, Numeric)>,
}

impl DeltaRow {
    pub fn delta_for(&self, player: &str) -> Option<Numeric> {
        lookup(&self.deltas, player)
    }

    pub fn to_record(&self) -> Vec<String> {
        let mut record = vec![
            format_date(&self.key.date),
            self.key.match_id.clone(),
            Numeric::Float(self.field_average).to_string(),
        ];
        record.extend(self.deltas.iter().map(|(_, delta)| delta.to_string()));
        record
    }
}

/// Absolute ratings after a match, one cell per roster player in roster order.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRow {
    pub key: MatchKey,
    pub ratings: Vec<(Player, Numeric)>,
}

impl RatingRow {
    pub fn rating_for(&self, player: &str) -> Option<Numeric> {
        lookup(&self.ratings, player)
    }

    pub fn to_record(&self) -> Vec<String> {
        let mut record = vec![format_date(&self.key.date), self.key.match_id.clone()];
        record.extend(self.ratings.iter().map(|(_, rating)| rating.to_string()));
        record
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch {
    pub delta: DeltaRow,
    pub rating: RatingRow,
}

fn lookup(cells: &[(Player, Numeric)], player: &str) -> Option<Numeric> {
    cells
        .iter()
        .find(|(name, _)| name == player)
        .map(|(_, value)| *value)
}
