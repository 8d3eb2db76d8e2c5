//! Read-only category catalog.
//!
//! Loaded once at startup from the store's seed categories and shared by
//! every request afterwards.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::Category;

#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    /// Build a catalog; entries are kept in ascending id order.
    pub fn new(mut categories: Vec<Category>) -> Self {
        categories.sort_by_key(|c| c.id);
        Self { categories }
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn count(&self) -> usize {
        self.categories.len()
    }

    pub fn by_id(&self, id: i64) -> Result<&Category> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or(Error::NotFound)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.by_id(id).is_ok()
    }

    /// Type of the category at 1-based position `one_based` in id order.
    ///
    /// This resolves by position, not by id: it only agrees with
    /// [`by_id`](Self::by_id) while ids run 1, 2, 3, ... without gaps.
    pub fn type_for_positional_index(&self, one_based: i64) -> Result<&str> {
        let out_of_range = || Error::OutOfRange {
            index: one_based,
            count: self.categories.len(),
        };

        let position = usize::try_from(one_based)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .ok_or_else(out_of_range)?;

        self.categories
            .get(position)
            .map(|c| c.kind.as_str())
            .ok_or_else(out_of_range)
    }

    /// `id -> type` mapping as returned to clients.
    pub fn as_map(&self) -> BTreeMap<i64, String> {
        self.categories
            .iter()
            .map(|c| (c.id, c.kind.clone()))
            .collect()
    }
}
