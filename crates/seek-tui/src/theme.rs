//! Colour theme for the seek TUI.
//!
//! Themes are defined as TOML files. Both built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Call [`Theme::load_default`] at startup and pass the result through
//! the application as a shared reference.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use seek_core::ItemCategory;
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types — mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
    overlay: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawSearch {
    highlight: RawStyle,
    selection: RawStyle,
    prompt: RawStyle,
    muted: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawCategories {
    repository: RawStyle,
    pipeline: RawStyle,
    schedule: RawStyle,
    sensor: RawStyle,
    partition_set: RawStyle,
    other: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    borders: RawBorders,
    search: RawSearch,
    categories: RawCategories,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values.
#[derive(Debug, Clone)]
pub struct Theme {
    pub border_focused: Style,
    pub border_unfocused: Style,
    /// Border of the search overlay popup.
    pub border_overlay: Style,

    /// Applied to the label characters that matched the query.
    pub search_highlight: Style,
    /// Row style of the highlighted result / selected navigation entry.
    pub selection: Style,
    /// The `>` prompt in front of the query.
    pub prompt: Style,
    /// Placeholders, hints and secondary text.
    pub muted: Style,

    pub category_repository: Style,
    pub category_pipeline: Style,
    pub category_schedule: Style,
    pub category_sensor: Style,
    pub category_partition_set: Style,
    pub category_other: Style,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed, which the theme tests rule out.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Look up a built-in theme by name. Unknown names fall back to the default.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            _ => Self::load_default(),
        }
    }

    /// Parse a theme from a TOML string.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            border_overlay: raw.borders.overlay.into_style(),
            search_highlight: raw.search.highlight.into_style(),
            selection: raw.search.selection.into_style(),
            prompt: raw.search.prompt.into_style(),
            muted: raw.search.muted.into_style(),
            category_repository: raw.categories.repository.into_style(),
            category_pipeline: raw.categories.pipeline.into_style(),
            category_schedule: raw.categories.schedule.into_style(),
            category_sensor: raw.categories.sensor.into_style(),
            category_partition_set: raw.categories.partition_set.into_style(),
            category_other: raw.categories.other.into_style(),
        })
    }

    pub fn category_style(&self, category: ItemCategory) -> Style {
        match category {
            ItemCategory::Repository => self.category_repository,
            ItemCategory::Pipeline => self.category_pipeline,
            ItemCategory::Schedule => self.category_schedule,
            ItemCategory::Sensor => self.category_sensor,
            ItemCategory::PartitionSet => self.category_partition_set,
            ItemCategory::Other => self.category_other,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_loads() {
        let theme = Theme::load_default();
        assert_ne!(theme.border_focused, Style::default());
        assert_ne!(theme.search_highlight, Style::default());
        assert_ne!(theme.selection, Style::default());
    }

    #[test]
    fn gruvbox_dark_theme_loads() {
        let theme = Theme::load_gruvbox_dark();
        assert_eq!(theme.border_focused.fg, Some(Color::Rgb(0xfa, 0xbd, 0x2f)));
        assert_ne!(theme.search_highlight, Style::default());
    }

    #[test]
    fn by_name_falls_back_to_default() {
        let theme = Theme::by_name("solarized");
        assert_eq!(theme.border_focused, Theme::load_default().border_focused);
        let theme = Theme::by_name("Gruvbox");
        assert_eq!(theme.border_focused, Theme::load_gruvbox_dark().border_focused);
    }

    #[test]
    fn categories_are_distinguishable() {
        let theme = Theme::load_default();
        assert_ne!(
            theme.category_style(ItemCategory::Pipeline),
            theme.category_style(ItemCategory::Schedule)
        );
    }

    #[test]
    fn parse_hex_color() {
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
    }

    #[test]
    fn parse_indexed_color() {
        assert_eq!(parse_color("indexed:42"), Some(Color::Indexed(42)));
    }

    #[test]
    fn parse_unknown_color_returns_none() {
        assert_eq!(parse_color("chartreuse"), None);
    }
}
