//! A [`Navigator`] that records where it was sent.

use seek_core::Navigator;

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub visited: Vec<String>,
}

impl RecordingNavigator {
    pub fn last(&self) -> Option<&str> {
        self.visited.last().map(String::as_str)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&mut self, path: &str) {
        self.visited.push(path.to_string());
    }
}
