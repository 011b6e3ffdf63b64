//! Core types shared by the index, the matcher and the overlay.
//!
//! [`SearchableItem`] is what gets indexed, [`ItemCategory`] says what kind of
//! workspace entity it points at, and [`RankedResult`] is one scored hit
//! returned by a [`Matcher`](crate::search::Matcher).

use serde::{Deserialize, Serialize};

/// A navigable workspace entity.
///
/// Immutable once it has been placed in a [`SearchIndex`](crate::SearchIndex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchableItem {
    /// Text shown in the result list and matched against the query.
    pub label: String,
    /// Route the host navigates to when this item is confirmed.
    pub path: String,
    pub category: ItemCategory,
    /// Where the item lives, e.g. `etl@data-platform` (repository@location).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl SearchableItem {
    pub fn new(label: impl Into<String>, path: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            category,
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Kind of workspace entity an item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Repository,
    Pipeline,
    Schedule,
    Sensor,
    PartitionSet,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemCategory::Repository => write!(f, "repository"),
            ItemCategory::Pipeline => write!(f, "pipeline"),
            ItemCategory::Schedule => write!(f, "schedule"),
            ItemCategory::Sensor => write!(f, "sensor"),
            ItemCategory::PartitionSet => write!(f, "partition set"),
            ItemCategory::Other => write!(f, "other"),
        }
    }
}

/// One scored hit produced by a matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedResult {
    pub item: SearchableItem,
    /// Higher is better. Only comparable within a single search.
    pub score: i64,
    /// Char positions in `item.label` that matched the query, ascending.
    #[serde(skip)]
    pub matched: Vec<usize>,
}

impl RankedResult {
    pub fn path(&self) -> &str {
        &self.item.path
    }
}
