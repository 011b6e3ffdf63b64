//! Configuration types for seek.
//!
//! [`Config::load`] reads `~/.config/seek/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::search::CaseMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ui]
overlay_width_pct  = 60
overlay_height_pct = 50
nav_pane_width_pct = 35
show_context       = true

[search]
max_results = 50
case        = "smart"

[keybindings]
open_search = "/"
help        = "?"
command     = ":"
quit        = "q"

[workspace]
path  = ""
watch = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/seek/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_overlay_width_pct")]
    pub overlay_width_pct: u16,
    #[serde(default = "default_overlay_height_pct")]
    pub overlay_height_pct: u16,
    #[serde(default = "default_nav_pane_width_pct")]
    pub nav_pane_width_pct: u16,
    /// Show `repository@location` next to each result.
    #[serde(default = "default_show_context")]
    pub show_context: bool,
}

fn default_overlay_width_pct() -> u16 { 60 }
fn default_overlay_height_pct() -> u16 { 50 }
fn default_nav_pane_width_pct() -> u16 { 35 }
fn default_show_context() -> bool { true }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            overlay_width_pct: default_overlay_width_pct(),
            overlay_height_pct: default_overlay_height_pct(),
            nav_pane_width_pct: default_nav_pane_width_pct(),
            show_context: default_show_context(),
        }
    }
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Cap on ranked results kept per query; 0 keeps all of them.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub case: CaseMode,
}

fn default_max_results() -> usize { 50 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            case: CaseMode::default(),
        }
    }
}

/// `[keybindings]` section of `config.toml`. Each binding is a single key.
#[derive(Debug, Clone, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_open_search")]
    pub open_search: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default = "default_quit")]
    pub quit: String,
}

fn default_open_search() -> String { "/".to_string() }
fn default_help() -> String { "?".to_string() }
fn default_command() -> String { ":".to_string() }
fn default_quit() -> String { "q".to_string() }

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            open_search: default_open_search(),
            help: default_help(),
            command: default_command(),
            quit: default_quit(),
        }
    }
}

/// `[workspace]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkspaceConfig {
    /// Snapshot file to index. Empty means the built-in demo workspace.
    #[serde(default)]
    pub path: String,
    /// Reload the snapshot when it changes on disk.
    #[serde(default)]
    pub watch: bool,
}

impl WorkspaceConfig {
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        let trimmed = self.path.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/seek/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Same as [`Config::load`] for an explicit file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("seek")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
