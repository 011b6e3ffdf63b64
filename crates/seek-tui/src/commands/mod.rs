//! `:` commands — parsing and execution.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `goto <path>` | Navigate to a location |
//! | `back` | Go back to the previous location |
//! | `reload` | Re-read the workspace snapshot |
//! | `search <text>` | Open the search overlay pre-filled with `text` |

use crate::{app::AppState, theme::Theme};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    Goto(String),
    Back,
    Reload,
    Search(String),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "back" => Ok(Command::Back),
            "reload" => Ok(Command::Reload),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "goto" => {
                if rest.is_empty() {
                    Err("usage: goto <path>".to_string())
                } else {
                    Ok(Command::Goto(rest.to_string()))
                }
            }
            // An empty search just opens the overlay
            "search" => Ok(Command::Search(rest.to_string())),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
        }
        Command::Goto(path) => {
            s.router.go(&path);
        }
        Command::Back => {
            s.router.back();
        }
        Command::Reload => {
            s.reload();
        }
        Command::Search(text) => {
            s.overlay.set_query(text);
            s.overlay.open();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("q", Command::Quit)]
    #[case("quit", Command::Quit)]
    #[case("  quit  ", Command::Quit)]
    #[case("help", Command::Help)]
    #[case("back", Command::Back)]
    #[case("reload", Command::Reload)]
    #[case("theme gruvbox", Command::Theme("gruvbox".to_string()))]
    #[case("goto /workspace/etl@prod", Command::Goto("/workspace/etl@prod".to_string()))]
    #[case("search daily rollup", Command::Search("daily rollup".to_string()))]
    #[case("search", Command::Search(String::new()))]
    fn parses(#[case] input: &str, #[case] expected: Command) {
        assert_eq!(Command::parse(input), Ok(expected));
    }

    #[rstest]
    #[case("theme")]
    #[case("goto")]
    #[case("goto   ")]
    fn missing_argument_is_usage_error(#[case] input: &str) {
        let err = Command::parse(input).unwrap_err();
        assert!(err.starts_with("usage:"), "{err}");
    }

    #[test]
    fn parse_empty_returns_sentinel_err() {
        assert_eq!(Command::parse(""), Err(String::new()));
        assert_eq!(Command::parse("  "), Err(String::new()));
    }

    #[test]
    fn parse_unknown() {
        let err = Command::parse("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));
    }
}
