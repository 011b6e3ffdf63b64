//! Router — the dashboard's current location and its back-history.
//!
//! Every way of moving around (search overlay, navigation pane, `:goto`,
//! `:back`) goes through the router, and the app shell reports the router's
//! location to the overlay after each event so a route change made anywhere
//! closes it.

use seek_core::Navigator;

pub const HOME: &str = "/";

#[derive(Debug, Clone)]
pub struct Router {
    location: String,
    history: Vec<String>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(HOME)
    }
}

impl Router {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            location: start.into(),
            history: Vec::new(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Move to `path`, pushing the current location onto the history.
    /// Navigating to the current location does nothing. Returns whether the
    /// location changed.
    pub fn go(&mut self, path: &str) -> bool {
        let path = normalize(path);
        if path == self.location {
            return false;
        }
        tracing::debug!(from = %self.location, to = %path, "route change");
        let previous = std::mem::replace(&mut self.location, path);
        self.history.push(previous);
        true
    }

    /// Return to the previous location. Returns whether there was one.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                tracing::debug!(from = %self.location, to = %previous, "route back");
                self.location = previous;
                true
            }
            None => false,
        }
    }
}

impl Navigator for Router {
    fn navigate_to(&mut self, path: &str) {
        self.go(path);
    }
}

/// Trim whitespace and trailing slashes, and make the path absolute.
fn normalize(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        HOME.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
