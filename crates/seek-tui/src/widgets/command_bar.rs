//! Vim-style command bar — a single-line overlay at the bottom of the screen.
//!
//! Activated by pressing `:` while the search overlay is closed. Displays a
//! `:` prefix followed by the typed command. Pressing `Enter` parses the
//! command; `Escape` cancels. See [`crate::commands`] for the command set.

use crate::commands::Command;
use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::line_input::LineInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// What the app shell should do after the bar handled a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarOutcome {
    /// Keep the bar open.
    Editing,
    /// Close without acting.
    Closed,
    /// Close and execute.
    Run(Command),
}

#[derive(Debug, Default)]
pub struct CommandBarState {
    /// The text typed after the `:` prefix.
    pub input: LineInput,
    /// Error message from the last failed command, cleared on the next key.
    pub error: Option<String>,
}

impl CommandBarState {
    /// Reset to a blank, error-free state. Call when opening the bar.
    pub fn clear(&mut self) {
        self.input.clear();
        self.error = None;
    }

    pub fn handle(&mut self, event: &AppEvent) -> BarOutcome {
        // Any keypress dismisses the error display so the user can edit again.
        self.error = None;

        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.clear();
                BarOutcome::Closed
            }
            AppEvent::Enter => match Command::parse(&self.input.text) {
                Ok(cmd) => {
                    tracing::debug!(command = ?cmd, "command parsed");
                    self.clear();
                    BarOutcome::Run(cmd)
                }
                Err(msg) if msg.is_empty() => {
                    self.clear();
                    BarOutcome::Closed
                }
                Err(msg) => {
                    // Show the error; bar stays open
                    self.error = Some(msg);
                    BarOutcome::Editing
                }
            },
            other => {
                self.input.handle(other);
                BarOutcome::Editing
            }
        }
    }

    /// Absolute terminal column of the text cursor within `area`.
    ///
    /// The `:` glyph occupies column 0, so the cursor starts at column 1.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        let col = 1 + self.input.cursor_chars() as u16;
        (area.x + col).min(area.right().saturating_sub(1))
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Single-row command-bar overlay. The caller passes a 1-row `Rect`.
pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let line = if let Some(ref err) = self.state.error {
            Line::from(Span::styled(
                format!("E  {err}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(vec![
                Span::styled(":", self.theme.prompt),
                Span::raw(self.state.input.text.as_str()),
            ])
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
