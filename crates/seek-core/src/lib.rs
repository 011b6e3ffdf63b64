//! seek-core — search index, fuzzy matching and the search overlay state machine.
//!
//! # Architecture
//!
//! ```text
//! Workspace snapshot ──► SearchIndex ──► Matcher ──► SearchOverlay ──► Navigator
//!                                                        ▲
//!                                     host key / mouse / route events
//! ```
//!
//! The overlay is a pure reducer ([`overlay::reduce`]) wrapped by a small
//! controller ([`SearchOverlay`]) that owns the side effects: running the
//! matcher and asking the host to navigate. Everything runs on the host's
//! event loop; nothing here spawns threads.

pub mod config;
pub mod index;
pub mod overlay;
pub mod search;
pub mod types;
pub mod workspace;

pub use index::SearchIndex;
pub use overlay::{Action, Navigator, Phase, QueryState, SearchOverlay, Step};
pub use search::{CaseMode, Matcher, SkimMatcher};
pub use types::{ItemCategory, RankedResult, SearchableItem};
pub use workspace::{WorkspaceError, WorkspaceSnapshot};
