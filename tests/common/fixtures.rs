//! Workspace fixtures shared across harnesses.

use seek_core::SearchIndex;
use std::path::{Path, PathBuf};

/// The checked-in sample snapshot.
pub const WORKSPACE_JSON: &str = include_str!("../fixtures/workspace.json");

/// Items the sample snapshot flattens to.
pub const WORKSPACE_ITEM_COUNT: usize = 12;

/// The two-item index from the overlay walkthrough.
pub fn pipelines_a_b() -> SearchIndex {
    super::builders::index_of(&[("Pipeline A", "/pipelines/a"), ("Pipeline B", "/pipelines/b")])
}

/// Write `contents` as `workspace.json` inside `dir`.
pub fn write_snapshot(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("workspace.json");
    std::fs::write(&path, contents).expect("write snapshot fixture");
    path
}
