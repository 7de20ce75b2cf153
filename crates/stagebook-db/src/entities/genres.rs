use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Ordered genre tags, persisted as a JSON array column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Genres(pub Vec<String>);

impl Genres {
    /// Parse a comma-separated list, trimming entries and dropping blanks.
    /// Order of first appearance is kept; exact duplicates are skipped.
    pub fn from_csv(raw: &str) -> Self {
        let mut out: Vec<String> = Vec::new();
        for part in raw.split(',') {
            let g = part.trim();
            if g.is_empty() || out.iter().any(|existing| existing == g) {
                continue;
            }
            out.push(g.to_string());
        }
        Self(out)
    }

    pub fn to_csv(&self) -> String {
        self.0.join(",")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for Genres {
    fn from(v: Vec<String>) -> Self {
        Self(v)
    }
}
