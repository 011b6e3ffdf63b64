#![allow(unused)]
//! Ranking integration harness.
//!
//! # What this covers
//!
//! - **Ranking over a real snapshot**: the sample workspace is flattened into
//!   an index and queried the way the overlay queries it.
//! - **Deterministic ties**: identical labels fall back to path order.
//! - **Case modes and limits**.
//! - **Property: results ⊆ index**: every result points at an indexed item,
//!   results are ordered best first, and matched positions fall inside the
//!   label.
//!
//! # Running
//!
//! ```sh
//! cargo test --test search_harness
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use seek_core::{CaseMode, Matcher, SearchIndex, SkimMatcher, WorkspaceSnapshot};

fn workspace() -> SearchIndex {
    WorkspaceSnapshot::from_json(WORKSPACE_JSON)
        .expect("fixture parses")
        .into_index()
}

fn labels(index: &SearchIndex, matcher: &SkimMatcher, query: &str) -> Vec<String> {
    matcher
        .search(index, query)
        .into_iter()
        .map(|r| r.item.label)
        .collect()
}

#[test]
fn same_label_in_two_locations_orders_by_path() {
    let results = SkimMatcher::default().search(&workspace(), "ingest_events");
    let paths: Vec<_> = results.iter().map(|r| r.path()).collect();
    assert_eq!(
        paths[..2],
        [
            "/workspace/etl@prod/pipelines/ingest_events",
            "/workspace/etl@staging/pipelines/ingest_events",
        ]
    );
}

#[test]
fn prefix_query_finds_every_ingest_pipeline() {
    let mut found = labels(&workspace(), &SkimMatcher::default(), "ingest");
    found.sort();
    assert_eq!(found, ["ingest_events", "ingest_events", "ingest_users"]);
}

#[rstest]
#[case(CaseMode::Smart, "ingest", 3)]
#[case(CaseMode::Smart, "Ingest", 0)]
#[case(CaseMode::Ignore, "INGEST", 3)]
#[case(CaseMode::Respect, "Ingest", 0)]
#[case(CaseMode::Respect, "ingest", 3)]
fn case_modes(#[case] case: CaseMode, #[case] query: &str, #[case] expected: usize) {
    let matcher = SkimMatcher::new(case);
    assert_eq!(matcher.search(&workspace(), query).len(), expected);
}

#[rstest]
#[case(1, 1)]
#[case(2, 2)]
#[case(0, 3)]
#[case(50, 3)]
fn limit_caps_results(#[case] limit: usize, #[case] expected: usize) {
    let matcher = SkimMatcher::default().with_limit(limit);
    assert_eq!(matcher.search(&workspace(), "ingest").len(), expected);
}

#[test]
fn scattered_letters_match_within_one_label() {
    let found = labels(&workspace(), &SkimMatcher::default(), "landing");
    assert_eq!(found, ["s3_landing_sensor"]);
}

proptest! {
    #[test]
    fn results_are_indexed_and_ordered(query in "[a-z_ ]{0,8}") {
        let index = workspace();
        let results = SkimMatcher::default().search(&index, &query);

        if query.trim().is_empty() {
            prop_assert!(results.is_empty());
        }
        for r in &results {
            prop_assert!(index.find_by_path(r.path()).is_some());
            let len = r.item.label.chars().count();
            prop_assert!(r.matched.iter().all(|&i| i < len));
        }
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}
