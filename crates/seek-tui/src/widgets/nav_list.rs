//! Navigation pane — every indexed item, ordered by route, browsable without
//! searching.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Select previous entry |
//! | `↓` / `j` | Select next entry |
//! | `Enter` | Navigate to the selected entry |
//! | click | Select and navigate |

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};
use seek_core::{ItemCategory, SearchIndex, SearchableItem};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct NavListState {
    pub entries: Vec<SearchableItem>,
    pub selected: usize,
}

impl NavListState {
    pub fn new(index: &SearchIndex) -> Self {
        let mut state = Self::default();
        state.rebuild(index);
        state
    }

    /// Refill from a refreshed index, keeping the selection on the same route
    /// when it still exists.
    pub fn rebuild(&mut self, index: &SearchIndex) {
        let previous = self.entries.get(self.selected).map(|e| e.path.clone());
        self.entries = index.sorted_by_path().into_iter().cloned().collect();
        self.selected = previous
            .and_then(|path| self.entries.iter().position(|e| e.path == path))
            .unwrap_or(0);
    }

    pub fn selected_path(&self) -> Option<&str> {
        self.entries.get(self.selected).map(|e| e.path.as_str())
    }

    /// Handle a key event. Returns the route to navigate to on `Enter`.
    pub fn handle(&mut self, event: &AppEvent) -> Option<String> {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            AppEvent::Nav(Direction::Down) => {
                if self.selected + 1 < self.entries.len() {
                    self.selected += 1;
                }
                None
            }
            AppEvent::Enter => self.selected_path().map(str::to_string),
            _ => None,
        }
    }

    /// Entry position under `(column, row)` when the pane is drawn in `area`.
    pub fn hit_test(&self, area: Rect, column: u16, row: u16) -> Option<usize> {
        let inner = Block::bordered().inner(area);
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        let offset = list_offset(self.selected, inner.height as usize);
        let position = offset + (row - inner.y) as usize;
        (position < self.entries.len()).then_some(position)
    }
}

fn list_offset(selected: usize, visible: usize) -> usize {
    (selected + 1).saturating_sub(visible.max(1))
}

fn short_tag(category: ItemCategory) -> &'static str {
    match category {
        ItemCategory::Repository => "repo",
        ItemCategory::Pipeline => "pipe",
        ItemCategory::Schedule => "schd",
        ItemCategory::Sensor => "sens",
        ItemCategory::PartitionSet => "part",
        ItemCategory::Other => "page",
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct NavList<'a> {
    state: &'a NavListState,
    focused: bool,
    current: &'a str,
    theme: &'a Theme,
}

impl<'a> NavList<'a> {
    /// `current` is the router location; its entry is drawn bold.
    pub fn new(state: &'a NavListState, focused: bool, current: &'a str, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            current,
            theme,
        }
    }
}

impl Widget for NavList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered()
            .title(format!(" Workspace ({}) ", self.state.entries.len()))
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let visible = inner.height as usize;
        let offset = list_offset(self.state.selected, visible);
        for (row, (position, entry)) in self
            .state
            .entries
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let mut style = Style::default();
            if entry.path == self.current {
                style = style.patch(self.theme.prompt);
            }
            if self.focused && position == self.state.selected {
                style = style.patch(self.theme.selection);
            }
            let line = Line::from(vec![
                Span::styled(
                    format!("{} ", short_tag(entry.category)),
                    style.patch(self.theme.category_style(entry.category)),
                ),
                Span::styled(entry.label.as_str(), style),
            ]);
            let y = inner.y + row as u16;
            buf.set_style(Rect { y, height: 1, ..inner }, style);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
