//! seek TUI — ratatui application shell around the search overlay.

pub mod app;
pub mod commands;
pub mod event;
pub mod router;
pub mod theme;
pub mod watch;
pub mod widgets;

pub use app::App;

use seek_core::{config::Config, SearchIndex, WorkspaceSnapshot};
use std::path::{Path, PathBuf};

/// Where the TUI gets its data from. CLI flags win over `[workspace]` config.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub workspace: Option<PathBuf>,
    pub no_watch: bool,
}

/// Start the TUI.
pub fn run(opts: RunOptions) -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        Config::defaults()
    });
    let workspace = opts.workspace.or_else(|| config.workspace.snapshot_path());
    let watch = config.workspace.watch && !opts.no_watch;
    let theme = theme::Theme::load_default();
    App::new(config, theme, workspace, watch).run()
}

/// Build the search index from a snapshot file, or the built-in demo
/// workspace when no file is given.
pub fn load_index(path: Option<&Path>) -> anyhow::Result<SearchIndex> {
    let snapshot = match path {
        Some(path) => WorkspaceSnapshot::load(path)?,
        None => WorkspaceSnapshot::demo(),
    };
    Ok(snapshot.into_index())
}
