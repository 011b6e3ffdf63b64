//! seek — fuzzy search overlay for orchestration workspaces.
//!
//! The interactive dashboard lives in `seek-tui`, the overlay state machine
//! and ranking in `seek-core`. This crate holds the command-line front end,
//! including the non-interactive [`headless`] mode.
//!
//! ```text
//! snapshot.json ──► SearchIndex ──► SearchOverlay ──► Router
//!                        │
//!                        └──► headless (stdout)
//! ```

pub mod headless;
