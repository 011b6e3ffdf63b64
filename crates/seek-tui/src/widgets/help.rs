//! Help popup — centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::event::Keymap;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

pub struct HelpPopup<'a> {
    keymap: &'a Keymap,
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(keymap: &'a Keymap, theme: &'a Theme) -> Self {
        Self { keymap, theme }
    }

    fn bindings(&self) -> Vec<(String, &'static str)> {
        let k = self.keymap;
        vec![
            (format!("{}  /  Ctrl+c", k.quit), "Quit"),
            (k.open_search.to_string(), "Open the search overlay"),
            ("↑ k  /  ↓ j".to_string(), "Move through the workspace list"),
            ("Enter".to_string(), "Go to the selected entry"),
            ("b".to_string(), "Go back"),
            (k.command.to_string(), "Open the command bar"),
            (k.help.to_string(), "Toggle this help popup"),
            (String::new(), ""),
            ("In the search overlay".to_string(), ""),
            ("↑  /  Ctrl+p".to_string(), "Highlight previous result"),
            ("↓  /  Ctrl+n".to_string(), "Highlight next result"),
            ("Enter  /  click".to_string(), "Go to the highlighted result"),
            ("Escape".to_string(), "Close and clear the query"),
        ]
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bindings = self.bindings();
        let popup = centered_rect(72, bindings.len() as u16 + 2, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(format!(" seek — keybindings ({} to close) ", self.keymap.help))
            .border_style(self.theme.border_overlay);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines: Vec<Line> = bindings
            .into_iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<22}", key),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(desc, self.theme.muted),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
