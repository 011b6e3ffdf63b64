//! SearchIndex — the immutable set of items the overlay searches over.
//!
//! An index is built once from a data source and then only ever replaced
//! wholesale on refresh. Cloning is cheap: clones share the same storage, so
//! the host can keep one copy for its navigation pane while the overlay holds
//! another.

use crate::types::{ItemCategory, SearchableItem};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SearchIndex {
    items: Arc<[SearchableItem]>,
}

impl SearchIndex {
    pub fn new(items: Vec<SearchableItem>) -> Self {
        tracing::debug!(items = items.len(), "search index built");
        Self {
            items: items.into(),
        }
    }

    pub fn items(&self) -> &[SearchableItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First item whose path equals `path` exactly.
    pub fn find_by_path(&self, path: &str) -> Option<&SearchableItem> {
        self.items.iter().find(|item| item.path == path)
    }

    pub fn count(&self, category: ItemCategory) -> usize {
        self.items.iter().filter(|i| i.category == category).count()
    }

    /// Items ordered by path, for browsing rather than searching.
    pub fn sorted_by_path(&self) -> Vec<&SearchableItem> {
        let mut items: Vec<&SearchableItem> = self.items.iter().collect();
        items.sort_by(|a, b| a.path.cmp(&b.path));
        items
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self {
            items: Vec::new().into(),
        }
    }
}

impl FromIterator<SearchableItem> for SearchIndex {
    fn from_iter<I: IntoIterator<Item = SearchableItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
