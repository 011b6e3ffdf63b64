//! Ratatui widgets for the seek TUI.

pub mod command_bar;
pub mod help;
pub mod line_input;
pub mod location;
pub mod nav_list;
pub mod search_overlay;
pub mod status_bar;
