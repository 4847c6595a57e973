use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Question category; seeded, read-mostly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// `{id: type}` mapping as returned to clients
pub type CategoryMap = BTreeMap<i64, String>;

pub fn category_map(categories: &[Category]) -> CategoryMap {
    categories
        .iter()
        .map(|c| (c.id, c.kind.clone()))
        .collect()
}

/// Categories seeded into an empty store
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .zip(1..)
        .map(|(kind, id)| Category {
            id,
            kind: kind.to_string(),
        })
        .collect()
}
