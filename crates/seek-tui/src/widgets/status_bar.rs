//! Status bar — the 1-line strip at the top of the screen showing where you
//! are, how much is indexed, and the main shortcuts.

use crate::event::Keymap;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBar<'a> {
    location: &'a str,
    /// `None` when no index is loaded.
    indexed: Option<usize>,
    can_go_back: bool,
    keymap: &'a Keymap,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        location: &'a str,
        indexed: Option<usize>,
        can_go_back: bool,
        keymap: &'a Keymap,
        theme: &'a Theme,
    ) -> Self {
        Self {
            location,
            indexed,
            can_go_back,
            keymap,
            theme,
        }
    }

    fn hint(&self) -> String {
        let back = if self.can_go_back { "  b:back" } else { "" };
        format!(
            " {}:search{}  {}:help  {}:quit ",
            self.keymap.open_search, back, self.keymap.help, self.keymap.quit
        )
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let indexed = match self.indexed {
            Some(1) => "1 item".to_string(),
            Some(n) => format!("{n} items"),
            None => "no index".to_string(),
        };
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", self.location),
                self.theme.prompt.add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {indexed}"), self.theme.muted),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        // Keybinding hints at the right edge
        let hint = self.hint();
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            self.theme.muted.add_modifier(Modifier::DIM),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(indexed: Option<usize>, can_go_back: bool) -> String {
        let keymap = Keymap::default();
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new("/runs", indexed, can_go_back, &keymap, &theme).render(area, &mut buf);
        (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn shows_location_and_count() {
        let row = render(Some(12), false);
        assert!(row.starts_with(" /runs "));
        assert!(row.contains("12 items"));
        assert!(row.contains("/:search"));
        assert!(!row.contains("b:back"));
    }

    #[test]
    fn back_hint_only_with_history() {
        assert!(render(Some(1), true).contains("b:back"));
        assert!(render(None, false).contains("no index"));
    }
}
