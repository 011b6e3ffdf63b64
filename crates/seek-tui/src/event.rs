//! Semantic application events — crossterm input mapped to a widget-agnostic
//! vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! In the main event loop, call [`to_app_event`] (or [`to_app_event_insert`]
//! while a text input has focus) on every [`crossterm::event::Event`] and
//! match on the returned [`AppEvent`].
//!
//! # Keybindings
//!
//! `/`, `?`, `:` and `q` come from the `[keybindings]` config section via
//! [`Keymap`]; the rest are fixed.
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `/`                     | `OpenSearch`               |
//! | `?`                     | `Help`                     |
//! | `:`                     | `Command`                  |
//! | `b`                     | `Back`                     |
//! | `↑` / `k` / `Ctrl+p`    | `Nav(Up)`                  |
//! | `↓` / `j` / `Ctrl+n`    | `Nav(Down)`                |
//! | `←` / `→`               | `Nav(Left)` / `Nav(Right)` |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | `Esc`                   | `Escape`                   |
//! | left mouse button       | `Click { column, row }`    |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! While the search overlay or the command bar is focused, every printable
//! character is forwarded as `Char`, including the shortcut keys above. Only
//! `Ctrl+c`, arrows, `Ctrl+p`/`Ctrl+n`, `Enter`, `Esc` and `Backspace` keep
//! their special meaning.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
use seek_core::config::KeybindingsConfig;

/// Cardinal direction for list navigation and text-cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Open the search overlay.
    OpenSearch,
    /// Toggle the help popup.
    Help,
    /// Open the `:` command bar.
    Command,
    /// Go back to the previous location.
    Back,
    Nav(Direction),
    /// A printable character forwarded to the active text input.
    Char(char),
    Backspace,
    Enter,
    Escape,
    /// Left mouse button pressed at the given terminal cell.
    Click { column: u16, row: u16 },
    Resize(u16, u16),
}

/// The configurable single-key shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keymap {
    pub open_search: char,
    pub help: char,
    pub command: char,
    pub quit: char,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            open_search: '/',
            help: '?',
            command: ':',
            quit: 'q',
        }
    }
}

impl Keymap {
    /// Build from config, keeping the default for any binding that is not
    /// exactly one character.
    pub fn from_config(cfg: &KeybindingsConfig) -> Self {
        let defaults = Self::default();
        Self {
            open_search: single_char("open_search", &cfg.open_search, defaults.open_search),
            help: single_char("help", &cfg.help, defaults.help),
            command: single_char("command", &cfg.command, defaults.command),
            quit: single_char("quit", &cfg.quit, defaults.quit),
        }
    }
}

fn single_char(name: &str, value: &str, fallback: char) -> char {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            tracing::warn!(binding = name, value, "keybinding must be a single key, using default");
            fallback
        }
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal / navigation mode).
///
/// Returns `None` for events with no meaning for the application.
pub fn to_app_event(event: Event, keymap: &Keymap) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key, keymap),
        Event::Mouse(mouse) => map_mouse(mouse.kind, mouse.column, mouse.row),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input ("insert")
/// mode.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        Event::Mouse(mouse) => map_mouse(mouse.kind, mouse.column, mouse.row),
        _ => None,
    }
}

fn map_mouse(kind: MouseEventKind, column: u16, row: u16) -> Option<AppEvent> {
    match kind {
        MouseEventKind::Down(MouseButton::Left) => Some(AppEvent::Click { column, row }),
        _ => None,
    }
}

fn map_key(key: KeyEvent, keymap: &Keymap) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    let plain = key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Char('p') if key.modifiers == Mod::CONTROL => Some(AppEvent::Nav(Direction::Up)),
        Char('n') if key.modifiers == Mod::CONTROL => Some(AppEvent::Nav(Direction::Down)),

        // Shortcut chars may arrive with or without SHIFT (`?`, `:`)
        Char(c) if plain && c == keymap.quit => Some(AppEvent::Quit),
        Char(c) if plain && c == keymap.open_search => Some(AppEvent::OpenSearch),
        Char(c) if plain && c == keymap.help => Some(AppEvent::Help),
        Char(c) if plain && c == keymap.command => Some(AppEvent::Command),
        Char('b') if key.modifiers == Mod::NONE => Some(AppEvent::Back),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if plain => Some(AppEvent::Char(c)),

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        // Ctrl+c always quits, even while typing
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Char('p') if key.modifiers == Mod::CONTROL => Some(AppEvent::Nav(Direction::Up)),
        Char('n') if key.modifiers == Mod::CONTROL => Some(AppEvent::Nav(Direction::Down)),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
