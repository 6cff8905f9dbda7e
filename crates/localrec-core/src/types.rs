//! Domain types shared by the vectorizer, similarity engine and recommender.

use serde::{Deserialize, Serialize};

pub type ItemId = u64;

/// A single catalog entry.
///
/// - `id`: stable identifier, unique within a snapshot
/// - `category`: free-form label, compared by exact match
/// - `description`: free text that feeds the term-weighted vector
/// - `price`: non-negative, carried through for display only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "product_id", alias = "id")]
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
}

impl Item {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            description: description.into(),
            price,
        }
    }
}

/// An item paired with its similarity to the query item. Higher is better.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem {
    pub item: Item,
    pub score: f32,
}
