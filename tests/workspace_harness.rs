#![allow(unused)]
//! Workspace snapshot integration harness.
//!
//! # What this covers
//!
//! - **Loading from disk** with `tempfile`: a valid snapshot, a missing file
//!   and malformed JSON.
//! - **Route shape**: repository and definition paths, and the
//!   `repository@location` context shown next to results.
//! - **Index loading** through the TUI entry point, including the demo
//!   fallback when no file is configured.
//!
//! # Running
//!
//! ```sh
//! cargo test --test workspace_harness
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use seek_core::{ItemCategory, WorkspaceError, WorkspaceSnapshot};

#[test]
fn loads_snapshot_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(dir.path(), WORKSPACE_JSON);
    let index = WorkspaceSnapshot::load(&path).unwrap().into_index();
    assert_eq!(index.len(), WORKSPACE_ITEM_COUNT);
    assert_eq!(index.count(ItemCategory::Repository), 3);
    assert_eq!(index.count(ItemCategory::Pipeline), 5);
    assert_eq!(index.count(ItemCategory::Other), 1);
}

#[test]
fn routes_and_context() {
    let index = WorkspaceSnapshot::from_json(WORKSPACE_JSON)
        .unwrap()
        .into_index();

    let repo = index.find_by_path("/workspace/etl@prod").unwrap();
    assert_eq!(repo.category, ItemCategory::Repository);
    assert_eq!(repo.context.as_deref(), Some("prod"));

    let set = index
        .find_by_path("/workspace/etl@prod/partition-sets/daily_partitions")
        .unwrap();
    assert_eq!(set.category, ItemCategory::PartitionSet);
    assert_eq!(set.context.as_deref(), Some("etl@prod"));

    let runs = index.find_by_path("/runs").unwrap();
    assert_eq!(runs.context, None);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = WorkspaceSnapshot::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, WorkspaceError::Read { .. }));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(dir.path(), "{ \"locations\": [ ");
    let err = WorkspaceSnapshot::load(&path).unwrap_err();
    assert!(matches!(err, WorkspaceError::Parse { .. }));
}

#[test]
fn unknown_item_category_becomes_other() {
    let snapshot = WorkspaceSnapshot::from_json(
        r#"{ "items": [ { "label": "Assets", "path": "/assets", "category": "asset_group" } ] }"#,
    )
    .unwrap();
    assert_eq!(snapshot.items()[0].category, ItemCategory::Other);
}

#[test]
fn tui_loader_falls_back_to_demo_workspace() {
    let demo = seek_tui::load_index(None).unwrap();
    assert!(!demo.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(dir.path(), WORKSPACE_JSON);
    assert_eq!(
        seek_tui::load_index(Some(&path)).unwrap().len(),
        WORKSPACE_ITEM_COUNT
    );
    assert!(seek_tui::load_index(Some(&dir.path().join("missing.json"))).is_err());
}
