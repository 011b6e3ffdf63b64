//! Search layer — fuzzy ranking of index items against a query.
//!
//! The overlay only ever talks to the [`Matcher`] trait, so the scoring
//! algorithm can be swapped without touching overlay logic. The default
//! [`SkimMatcher`] uses skim's v2 scoring (the algorithm behind the `sk`
//! picker) over item labels.
//!
//! # Policy
//!
//! - An empty (or whitespace-only) query yields no results, never the full
//!   index.
//! - An empty index yields no results; it is not an error.
//! - Results are ordered by descending score; ties keep label order so the
//!   ranking is deterministic.

use crate::index::SearchIndex;
use crate::types::RankedResult;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Deserialize;

/// Narrow seam between the overlay and whatever does the matching.
pub trait Matcher {
    /// Rank `index` against `query`. Must not fail: anything that cannot be
    /// matched is simply absent from the output.
    fn search(&self, index: &SearchIndex, query: &str) -> Vec<RankedResult>;
}

/// How letter case in the query affects matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    /// Case-insensitive unless the query contains an uppercase letter.
    #[default]
    Smart,
    Ignore,
    Respect,
}

/// Skim v2 fuzzy matcher with an optional cap on the number of results.
pub struct SkimMatcher {
    inner: SkimMatcherV2,
    case: CaseMode,
    limit: Option<usize>,
}

impl SkimMatcher {
    pub fn new(case: CaseMode) -> Self {
        let inner = match case {
            CaseMode::Smart => SkimMatcherV2::default().smart_case(),
            CaseMode::Ignore => SkimMatcherV2::default().ignore_case(),
            CaseMode::Respect => SkimMatcherV2::default().respect_case(),
        };
        Self {
            inner,
            case,
            limit: None,
        }
    }

    /// Keep at most `limit` results. `0` means unlimited.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }

    pub fn case(&self) -> CaseMode {
        self.case
    }
}

impl Default for SkimMatcher {
    fn default() -> Self {
        Self::new(CaseMode::default())
    }
}

impl std::fmt::Debug for SkimMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkimMatcher")
            .field("case", &self.case)
            .field("limit", &self.limit)
            .finish()
    }
}

impl Matcher for SkimMatcher {
    fn search(&self, index: &SearchIndex, query: &str) -> Vec<RankedResult> {
        let pattern = query.trim();
        if pattern.is_empty() || index.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<RankedResult> = index
            .items()
            .iter()
            .filter_map(|item| {
                let (score, matched) = self.inner.fuzzy_indices(&item.label, pattern)?;
                Some(RankedResult {
                    item: item.clone(),
                    score,
                    matched,
                })
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.item.label.cmp(&b.item.label))
                .then_with(|| a.item.path.cmp(&b.item.path))
        });
        if let Some(limit) = self.limit {
            results.truncate(limit);
        }

        tracing::debug!(query = pattern, hits = results.len(), "fuzzy search");
        results
    }
}
