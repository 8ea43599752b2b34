use serde::{Deserialize, Serialize};

/// Fixed, ordered set of tracked players.
///
/// Ledger columns follow this order, so changing it changes the on-disk schema.
/// Players are added here (or in a settings file), never discovered from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<String>,
}

impl Roster {
    pub fn new<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            players: players.into_iter().map(Into::into).collect(),
        }
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(default_players())
    }
}

/// The league's regular members, in ledger column order.
pub fn default_players() -> Vec<&'static str> {
    vec![
        "坂井", "中江", "福原", "遥平", "大前", "高木", "志村", "池谷", "米森", "浜島", "犬塚",
        "目黒", "梶田", "磯", "杉崎", "横塚", "安達",
    ]
}
