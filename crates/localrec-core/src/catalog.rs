//! In-memory catalog snapshot.
//!
//! Row positions (`0..len`) are the coordinates used by the vector space and
//! the similarity matrix. The snapshot is immutable once built; loading a new
//! catalog means building a new `Catalog`.

use std::collections::HashMap;

use tracing::warn;

use crate::types::{Item, ItemId};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    positions: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Build a snapshot, indexing identifiers by their first occurrence.
    pub fn new(items: Vec<Item>) -> Self {
        let mut positions = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if positions.contains_key(&item.id) {
                warn!(id = item.id, pos, "duplicate product id; lookups resolve to the first occurrence");
                continue;
            }
            positions.insert(item.id, pos);
        }
        Self { items, positions }
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn items(&self) -> &[Item] { &self.items }

    pub fn get(&self, pos: usize) -> Option<&Item> { self.items.get(pos) }

    pub fn position_of(&self, id: ItemId) -> Option<usize> { self.positions.get(&id).copied() }

    pub fn by_id(&self, id: ItemId) -> Option<&Item> { self.position_of(id).and_then(|p| self.items.get(p)) }

    /// First `n` items in catalog order.
    pub fn preview(&self, n: usize) -> &[Item] { &self.items[..n.min(self.items.len())] }

    /// Items whose category equals `category` exactly, in catalog order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.items.iter().filter(move |item| item.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: ItemId, category: &str) -> Item {
        Item::new(id, format!("item {id}"), category, "text", 1.0)
    }

    #[test]
    fn duplicate_ids_resolve_to_first_position() {
        let catalog = Catalog::new(vec![item(7, "A"), item(8, "B"), item(7, "C")]);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.position_of(7), Some(0));
        assert_eq!(catalog.by_id(7).map(|i| i.category.as_str()), Some("A"));
        assert_eq!(catalog.position_of(99), None);
    }

    #[test]
    fn preview_clamps_to_len() {
        let catalog = Catalog::new(vec![item(1, "A"), item(2, "A")]);
        assert_eq!(catalog.preview(5).len(), 2);
        assert_eq!(catalog.preview(1)[0].id, 1);
    }

    #[test]
    fn category_filter_keeps_catalog_order() {
        let catalog = Catalog::new(vec![item(3, "A"), item(1, "B"), item(2, "A")]);
        let ids: Vec<ItemId> = catalog.in_category("A").map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(catalog.in_category("a").count(), 0);
    }
}
