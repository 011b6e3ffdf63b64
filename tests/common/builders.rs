//! Test builders — ergonomic constructors for items, indexes and overlays.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use seek_core::{ItemCategory, SearchIndex, SearchOverlay, SearchableItem, SkimMatcher};

/// Fluent builder for [`SearchableItem`] fixtures.
///
/// ```rust
/// let item = ItemBuilder::new("ingest_events")
///     .category(ItemCategory::Pipeline)
///     .context("etl@prod")
///     .build();
/// ```
pub struct ItemBuilder {
    label: String,
    path: Option<String>,
    category: ItemCategory,
    context: Option<String>,
}

impl ItemBuilder {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: None,
            category: ItemCategory::Pipeline,
            context: None,
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Without an explicit path the item lives at `/<label>`.
    pub fn build(self) -> SearchableItem {
        let path = self.path.unwrap_or_else(|| format!("/{}", self.label));
        let item = SearchableItem::new(self.label, path, self.category);
        match self.context {
            Some(context) => item.with_context(context),
            None => item,
        }
    }
}

/// An index of `(label, path)` pipeline items.
pub fn index_of(items: &[(&str, &str)]) -> SearchIndex {
    items
        .iter()
        .map(|(label, path)| ItemBuilder::new(*label).path(*path).build())
        .collect()
}

/// An overlay over `index` with the default matcher.
pub fn overlay_over(index: SearchIndex) -> SearchOverlay {
    SearchOverlay::new(Some(index), SkimMatcher::default())
}

/// `n` items labelled `item-000`, `item-001`, …
pub fn numbered_index(n: usize) -> SearchIndex {
    (0..n)
        .map(|i| ItemBuilder::new(format!("item-{i:03}")).build())
        .collect()
}
