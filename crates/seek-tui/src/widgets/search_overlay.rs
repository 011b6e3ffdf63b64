//! Search overlay widget — centred popup with the query line and the ranked
//! result list.
//!
//! Layout is a pure function of the terminal area ([`OverlayLayout::compute`])
//! so the app shell can hit-test mouse clicks against the same rectangles the
//! widget rendered into, without the widget keeping any state of its own.
//!
//! ```text
//! ┌ Search ─────────────────────────────┐
//! │> pipe█                     3 results│
//! │> ingest_events   pipeline  etl@data │
//! │  export_pipeline pipeline  etl@data │
//! │  ...                                │
//! └─────────────────────────────────────┘
//! ```

use crate::theme::Theme;
use crate::widgets::line_input::LineInput;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};
use seek_core::{Phase, QueryState, RankedResult};

const MIN_WIDTH: u16 = 30;
const MIN_HEIGHT: u16 = 6;
const PROMPT: &str = "> ";

// ---------------------------------------------------------------------------
// Layout + hit testing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayLayout {
    pub popup: Rect,
    /// The query line.
    pub input: Rect,
    /// One row per visible result.
    pub list: Rect,
}

impl OverlayLayout {
    pub fn compute(area: Rect, width_pct: u16, height_pct: u16) -> Self {
        let width = (area.width as u32 * width_pct.min(100) as u32 / 100) as u16;
        let height = (area.height as u32 * height_pct.min(100) as u32 / 100) as u16;
        let width = width.max(MIN_WIDTH).min(area.width);
        let height = height.max(MIN_HEIGHT).min(area.height);

        let popup = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            // Sit in the upper third, like a command palette
            y: area.y + area.height.saturating_sub(height) / 3,
            width,
            height,
        };
        let inner = Block::bordered().inner(popup);
        let input = Rect {
            height: inner.height.min(1),
            ..inner
        };
        let list = Rect {
            y: inner.y.saturating_add(1),
            height: inner.height.saturating_sub(1),
            ..inner
        };
        Self { popup, input, list }
    }

    /// Result position under the terminal cell `(column, row)`, if any.
    pub fn hit_test(&self, state: &QueryState, column: u16, row: u16) -> Option<usize> {
        if !self.list.contains(Position::new(column, row)) {
            return None;
        }
        let offset = scroll_offset(state.highlight, self.list.height as usize);
        let position = offset + (row - self.list.y) as usize;
        (position < state.results.len()).then_some(position)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.popup.contains(Position::new(column, row))
    }
}

/// First visible result so that `highlight` stays on screen.
pub fn scroll_offset(highlight: usize, visible: usize) -> usize {
    (highlight + 1).saturating_sub(visible.max(1))
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SearchPopup<'a> {
    state: &'a QueryState,
    input: &'a LineInput,
    layout: OverlayLayout,
    theme: &'a Theme,
    show_context: bool,
}

impl<'a> SearchPopup<'a> {
    pub fn new(
        state: &'a QueryState,
        input: &'a LineInput,
        layout: OverlayLayout,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            input,
            layout,
            theme,
            show_context: true,
        }
    }

    pub fn show_context(mut self, show: bool) -> Self {
        self.show_context = show;
        self
    }

    /// Absolute terminal position of the text cursor on the query line.
    pub fn cursor_position(&self) -> (u16, u16) {
        let area = self.layout.input;
        let col = PROMPT.len() as u16 + self.input.cursor_chars() as u16;
        let x = (area.x + col).min(area.right().saturating_sub(1));
        (x, area.y)
    }

    fn status(&self) -> String {
        match self.state.phase() {
            Phase::Searching => "searching…".to_string(),
            Phase::Results if self.state.results.len() == 1 => "1 result".to_string(),
            Phase::Results => format!("{} results", self.state.results.len()),
            Phase::Empty | Phase::Hidden => String::new(),
        }
    }

    fn result_line(&self, result: &RankedResult, selected: bool) -> Line<'a> {
        let row = if selected {
            self.theme.selection
        } else {
            Style::default()
        };
        let mut spans = vec![Span::styled(if selected { "> " } else { "  " }, row)];
        spans.extend(label_spans(
            &result.item.label,
            &result.matched,
            row,
            row.patch(self.theme.search_highlight),
        ));
        spans.push(Span::styled("  ", row));
        spans.push(Span::styled(
            result.item.category.to_string(),
            row.patch(self.theme.category_style(result.item.category)),
        ));
        if self.show_context {
            if let Some(context) = &result.item.context {
                spans.push(Span::styled(format!("  {context}"), row.patch(self.theme.muted)));
            }
        }
        Line::from(spans).style(row)
    }
}

/// Split `label` into spans, styling the chars at `matched` positions.
fn label_spans(label: &str, matched: &[usize], base: Style, hit: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_is_hit = false;

    for (i, c) in label.chars().enumerate() {
        let is_hit = matched.binary_search(&i).is_ok();
        if is_hit != run_is_hit && !run.is_empty() {
            let style = if run_is_hit { hit } else { base };
            spans.push(Span::styled(std::mem::take(&mut run), style));
        }
        run_is_hit = is_hit;
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, if run_is_hit { hit } else { base }));
    }
    spans
}

impl Widget for SearchPopup<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let layout = self.layout;
        Clear.render(layout.popup, buf);

        Block::bordered()
            .title(" Search ")
            .border_style(self.theme.border_overlay)
            .render(layout.popup, buf);

        if layout.input.height == 0 {
            return;
        }

        // Query line with a right-aligned status
        let query = if self.input.text.is_empty() {
            Span::styled("Search pipelines, schedules, sensors…", self.theme.muted)
        } else {
            Span::raw(self.input.text.as_str())
        };
        Paragraph::new(Line::from(vec![Span::styled(PROMPT, self.theme.prompt), query]))
            .render(layout.input, buf);
        let status = self.status();
        if !status.is_empty() {
            let width = status.chars().count() as u16;
            let x = layout.input.right().saturating_sub(width);
            buf.set_string(x, layout.input.y, &status, self.theme.muted);
        }

        let list = layout.list;
        if list.height == 0 {
            return;
        }

        let placeholder = match self.state.phase() {
            Phase::Empty => Some("Type to search the workspace".to_string()),
            Phase::Results if self.state.results.is_empty() => {
                Some(format!("No results for \"{}\"", self.state.query.trim()))
            }
            _ => None,
        };
        if let Some(text) = placeholder {
            buf.set_string(list.x + 2, list.y, text, self.theme.muted);
            return;
        }

        let visible = list.height as usize;
        let offset = scroll_offset(self.state.highlight, visible);
        for (row, (position, result)) in self
            .state
            .results
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let line = self.result_line(result, position == self.state.highlight);
            let y = list.y + row as u16;
            buf.set_style(Rect { y, height: 1, ..list }, line.style);
            buf.set_line(list.x, y, &line, list.width);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
