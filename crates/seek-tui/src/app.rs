//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! Each turn of the loop resolves the overlay's pending search
//! ([`SearchOverlay::tick`]), reports the router location to the overlay,
//! draws, and then waits up to 16ms for input.

use crate::{
    commands::execute_command,
    event::{self, AppEvent, Direction, Keymap},
    router::Router,
    theme::Theme,
    watch::WorkspaceWatcher,
    widgets::{
        command_bar::{BarOutcome, CommandBar, CommandBarState},
        help::HelpPopup,
        line_input::LineInput,
        location::LocationView,
        nav_list::{NavList, NavListState},
        search_overlay::{OverlayLayout, SearchPopup},
        status_bar::StatusBar,
    },
};
use crossterm::{
    event::{self as ct_event, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use seek_core::{config::Config, SearchIndex, SearchOverlay, SkimMatcher, Step};
use std::{cell::Cell, io, path::PathBuf, time::Duration};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

/// Which widget receives keys when the search overlay is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Nav,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub config: Config,
    pub theme: Theme,
    pub keymap: Keymap,
    pub router: Router,
    pub overlay: SearchOverlay<SkimMatcher>,
    /// Editing buffer for the overlay query; the overlay owns the query
    /// itself, this only adds a cursor.
    pub search_input: LineInput,
    pub nav: NavListState,
    pub command_bar: CommandBarState,
    pub focus: Focus,
    pub show_help: bool,
    pub quit: bool,
    /// Snapshot file the index was loaded from, `None` for the demo workspace.
    pub workspace: Option<PathBuf>,
    pub watcher: Option<WorkspaceWatcher>,
    /// Terminal area of the last frame, for mouse hit-testing.
    pub last_area: Cell<Rect>,
}

impl AppState {
    /// Re-read the workspace and hand the fresh index to the overlay and the
    /// navigation pane. An unreadable snapshot leaves the app without an index.
    pub fn reload(&mut self) {
        let index = load_or_warn(self.workspace.as_deref());
        tracing::debug!(
            items = index.as_ref().map(SearchIndex::len),
            "workspace reloaded"
        );
        self.nav
            .rebuild(index.as_ref().unwrap_or(&SearchIndex::default()));
        self.overlay.replace_index(index);
    }

    /// Keep the query buffer in step with the overlay, which clears its
    /// query on close and may be pre-seeded by `:search`.
    fn sync_search_input(&mut self) {
        let query = &self.overlay.state().query;
        if self.search_input.text != *query {
            let query = query.clone();
            self.search_input.set(&query);
        }
    }

    fn overlay_layout(&self) -> OverlayLayout {
        OverlayLayout::compute(
            self.last_area.get(),
            self.config.ui.overlay_width_pct,
            self.config.ui.overlay_height_pct,
        )
    }
}

fn load_or_warn(path: Option<&std::path::Path>) -> Option<SearchIndex> {
    match crate::load_index(path) {
        Ok(index) => Some(index),
        Err(e) => {
            tracing::warn!(error = %e, "workspace unavailable");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(config: Config, theme: Theme, workspace: Option<PathBuf>, watch: bool) -> Self {
        let index = load_or_warn(workspace.as_deref());
        let nav = NavListState::new(index.as_ref().unwrap_or(&SearchIndex::default()));
        let matcher = SkimMatcher::new(config.search.case).with_limit(config.search.max_results);
        let mut overlay = SearchOverlay::new(index, matcher);

        let router = Router::default();
        overlay.observe_location(router.location());

        let watcher = match &workspace {
            Some(path) if watch => WorkspaceWatcher::new(path)
                .map_err(|e| tracing::warn!(error = %e, "cannot watch workspace"))
                .ok(),
            _ => None,
        };

        let state = AppState {
            keymap: Keymap::from_config(&config.keybindings),
            config,
            theme,
            router,
            overlay,
            search_input: LineInput::default(),
            nav,
            command_bar: CommandBarState::default(),
            focus: Focus::Nav,
            show_help: false,
            quit: false,
            workspace,
            watcher,
            last_area: Cell::new(Rect::default()),
        };

        App { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            let changed = self
                .state
                .watcher
                .as_ref()
                .is_some_and(WorkspaceWatcher::poll_changed);
            if changed {
                tracing::debug!("workspace snapshot changed on disk");
                self.state.reload();
            }
            self.tick();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                let raw = ct_event::read()?;
                if let Event::Key(key) = &raw {
                    if key.kind != ct_event::KeyEventKind::Press {
                        continue;
                    }
                }
                // Use insert-mode mapping when a text input is focused
                let app_event = if self.is_insert_mode() {
                    event::to_app_event_insert(raw)
                } else {
                    event::to_app_event(raw, &self.state.keymap)
                };
                if let Some(ev) = app_event {
                    tracing::debug!(
                        focus = ?self.state.focus,
                        overlay = ?self.state.overlay.phase(),
                        event = ?ev,
                        "input event"
                    );
                    self.handle(ev);
                }
            }
        }
        Ok(())
    }

    /// Run the overlay's pending search and report the current location.
    pub fn tick(&mut self) {
        let s = &mut self.state;
        s.overlay.tick();
        s.overlay.observe_location(s.router.location());
    }

    fn is_insert_mode(&self) -> bool {
        self.state.overlay.is_visible() || self.state.focus == Focus::Command
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        if event == AppEvent::Quit {
            tracing::debug!("quit");
            s.quit = true;
            return;
        }

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            if matches!(event, AppEvent::Help | AppEvent::Escape) {
                tracing::debug!("help popup closed");
                s.show_help = false;
            }
            return;
        }

        if s.focus == Focus::Command {
            match s.command_bar.handle(&event) {
                BarOutcome::Editing => {}
                BarOutcome::Closed => s.focus = Focus::Nav,
                BarOutcome::Run(cmd) => {
                    tracing::debug!(command = ?cmd, "executing command");
                    s.focus = Focus::Nav;
                    execute_command(s, cmd);
                }
            }
        } else if s.overlay.is_visible() {
            handle_overlay(s, event);
        } else {
            handle_main(s, event);
        }

        s.overlay.observe_location(s.router.location());
        s.sync_search_input();
    }
}

/// Keys while the search overlay is open.
fn handle_overlay(s: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Escape => s.overlay.close(),
        AppEvent::Nav(Direction::Up) => s.overlay.move_highlight(Step::Up),
        AppEvent::Nav(Direction::Down) => s.overlay.move_highlight(Step::Down),
        AppEvent::Enter => {
            s.overlay.confirm_selection(&mut s.router);
        }
        AppEvent::Click { column, row } => {
            let layout = s.overlay_layout();
            if let Some(position) = layout.hit_test(s.overlay.state(), column, row) {
                s.overlay.select(position, &mut s.router);
            } else if !layout.contains(column, row) && !click_nav(s, column, row) {
                s.overlay.close();
            }
        }
        other => {
            if s.search_input.handle(&other) {
                s.overlay.set_query(s.search_input.text.clone());
            }
        }
    }
}

/// Keys while nothing is layered over the dashboard.
fn handle_main(s: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::OpenSearch => s.overlay.open(),
        AppEvent::Help => {
            tracing::debug!("help popup opened");
            s.show_help = true;
        }
        AppEvent::Command => {
            tracing::debug!("entering command mode");
            s.command_bar.clear();
            s.focus = Focus::Command;
        }
        AppEvent::Back => {
            s.router.back();
        }
        AppEvent::Click { column, row } => {
            let screen = Screen::compute(s.last_area.get(), s.config.ui.nav_pane_width_pct);
            if row == screen.status.y && screen.status.height > 0 {
                s.overlay.open();
                return;
            }
            click_nav(s, column, row);
        }
        // Terminal resize is handled automatically by ratatui
        AppEvent::Resize(_, _) => {}
        other => {
            if let Some(path) = s.nav.handle(&other) {
                s.router.go(&path);
            }
        }
    }
}

/// Select and navigate to the nav row under the pointer. Returns whether a
/// row was hit.
fn click_nav(s: &mut AppState, column: u16, row: u16) -> bool {
    let screen = Screen::compute(s.last_area.get(), s.config.ui.nav_pane_width_pct);
    let Some(position) = s.nav.hit_test(screen.nav, column, row) else {
        return false;
    };
    s.nav.selected = position;
    if let Some(path) = s.nav.selected_path() {
        let path = path.to_string();
        s.router.go(&path);
    }
    true
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Dashboard regions: 1-line status bar over a navigation | location split.
struct Screen {
    status: Rect,
    nav: Rect,
    location: Rect,
}

impl Screen {
    fn compute(area: Rect, nav_pct: u16) -> Self {
        let vert = Layout::default()
            .direction(LayoutDir::Vertical)
            .constraints([Constraint::Length(1), Constraint::Fill(1)])
            .split(area);
        let horiz = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Percentage(nav_pct.min(100)), Constraint::Fill(1)])
            .split(vert[1]);
        Self {
            status: vert[0],
            nav: horiz[0],
            location: horiz[1],
        }
    }
}

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    state.last_area.set(area);
    let screen = Screen::compute(area, state.config.ui.nav_pane_width_pct);
    let location = state.router.location();
    let overlay_open = state.overlay.is_visible();

    frame.render_widget(
        StatusBar::new(
            location,
            state.overlay.index().map(SearchIndex::len),
            state.router.can_go_back(),
            &state.keymap,
            &state.theme,
        ),
        screen.status,
    );
    frame.render_widget(
        NavList::new(
            &state.nav,
            state.focus == Focus::Nav && !overlay_open,
            location,
            &state.theme,
        ),
        screen.nav,
    );
    frame.render_widget(
        LocationView::new(location, state.overlay.index(), &state.theme),
        screen.location,
    );

    if overlay_open {
        let popup = SearchPopup::new(
            state.overlay.state(),
            &state.search_input,
            state.overlay_layout(),
            &state.theme,
        )
        .show_context(state.config.ui.show_context);
        let cursor = popup.cursor_position();
        frame.render_widget(popup, area);
        frame.set_cursor_position(cursor);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.keymap, &state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1.min(area.height),
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};
    use seek_core::Phase;

    fn app() -> App {
        App::new(Config::defaults(), Theme::load_default(), None, false)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle(AppEvent::Char(c));
        }
    }

    fn render(app: &App) {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app.state())).unwrap();
    }

    #[test]
    fn typing_searches_on_next_tick() {
        let mut app = app();
        app.handle(AppEvent::OpenSearch);
        type_text(&mut app, "ingest");
        assert_eq!(app.state().overlay.phase(), Phase::Searching);
        app.tick();
        assert_eq!(app.state().overlay.phase(), Phase::Results);
        assert!(!app.state().overlay.state().results.is_empty());
    }

    #[test]
    fn enter_navigates_and_closes() {
        let mut app = app();
        app.handle(AppEvent::OpenSearch);
        type_text(&mut app, "ingest_events");
        app.tick();
        let expected = app.state().overlay.state().highlighted().unwrap().item.path.clone();
        app.handle(AppEvent::Enter);
        assert_eq!(app.state().router.location(), expected);
        assert!(!app.state().overlay.is_visible());
        assert!(app.state().search_input.text.is_empty());
    }

    #[test]
    fn shortcut_keys_type_into_the_overlay() {
        let mut app = app();
        app.handle(AppEvent::OpenSearch);
        // In insert mode `q` arrives as a character, not Quit
        app.handle(AppEvent::Char('q'));
        assert!(!app.state().quit);
        assert_eq!(app.state().overlay.state().query, "q");
    }

    #[test]
    fn escape_closes_and_clears() {
        let mut app = app();
        app.handle(AppEvent::OpenSearch);
        type_text(&mut app, "rollup");
        app.handle(AppEvent::Escape);
        assert!(!app.state().overlay.is_visible());
        assert_eq!(app.state().overlay.state().query, "");
        assert_eq!(app.state().search_input.text, "");
    }

    #[test]
    fn goto_command_moves_and_back_returns() {
        let mut app = app();
        app.handle(AppEvent::Command);
        type_text(&mut app, "goto /runs");
        app.handle(AppEvent::Enter);
        assert_eq!(app.state().focus, Focus::Nav);
        assert_eq!(app.state().router.location(), "/runs");
        app.handle(AppEvent::Back);
        assert_eq!(app.state().router.location(), "/");
    }

    #[test]
    fn search_command_preseeds_query() {
        let mut app = app();
        app.handle(AppEvent::Command);
        type_text(&mut app, "search nightly");
        app.handle(AppEvent::Enter);
        assert!(app.state().overlay.is_visible());
        assert_eq!(app.state().overlay.state().query, "nightly");
        assert_eq!(app.state().search_input.text, "nightly");
    }

    #[test]
    fn nav_list_enter_navigates() {
        let mut app = app();
        app.handle(AppEvent::Nav(Direction::Down));
        let expected = app.state().nav.selected_path().unwrap().to_string();
        app.handle(AppEvent::Enter);
        assert_eq!(app.state().router.location(), expected);
    }

    #[test]
    fn clicking_a_result_navigates() {
        let mut app = app();
        render(&app);
        app.handle(AppEvent::OpenSearch);
        type_text(&mut app, "ingest");
        app.tick();
        let layout = app.state().overlay_layout();
        let second = app.state().overlay.state().results[1].item.path.clone();
        app.handle(AppEvent::Click {
            column: layout.list.x + 2,
            row: layout.list.y + 1,
        });
        assert_eq!(app.state().router.location(), second);
        assert!(!app.state().overlay.is_visible());
    }

    #[test]
    fn clicking_the_status_bar_opens_search() {
        let mut app = app();
        render(&app);
        app.handle(AppEvent::Click { column: 5, row: 0 });
        assert!(app.state().overlay.is_visible());
    }

    #[test]
    fn clicking_outside_the_overlay_closes_it() {
        let mut app = app();
        render(&app);
        app.handle(AppEvent::OpenSearch);
        app.handle(AppEvent::Click { column: 0, row: 39 });
        assert!(!app.state().overlay.is_visible());
        assert_eq!(app.state().router.location(), "/");
    }

    #[test]
    fn clicking_the_nav_pane_under_the_overlay_navigates_and_closes() {
        let mut app = app();
        render(&app);
        app.handle(AppEvent::OpenSearch);
        type_text(&mut app, "ingest");
        app.tick();
        // Row 5 is the fourth nav entry, left of the centred popup
        assert!(!app.state().overlay_layout().contains(2, 5));
        let expected = app.state().nav.entries[3].path.clone();
        app.handle(AppEvent::Click { column: 2, row: 5 });
        assert_eq!(app.state().router.location(), expected);
        assert_eq!(app.state().nav.selected, 3);
        assert!(!app.state().overlay.is_visible());
        assert_eq!(app.state().overlay.state().query, "");
        assert!(app.state().search_input.text.is_empty());
    }

    #[test]
    fn draws_the_overlay_on_a_one_row_terminal() {
        let mut app = app();
        app.handle(AppEvent::OpenSearch);
        type_text(&mut app, "ingest");
        app.tick();
        assert_eq!(app.state().overlay.phase(), Phase::Results);
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal.draw(|frame| draw(frame, app.state())).unwrap();
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = app();
        app.handle(AppEvent::Help);
        app.handle(AppEvent::OpenSearch);
        assert!(!app.state().overlay.is_visible());
        app.handle(AppEvent::Escape);
        assert!(!app.state().show_help);
    }

    #[test]
    fn reload_without_snapshot_file_keeps_demo_index() {
        let mut app = app();
        let before = app.state().overlay.index().map(SearchIndex::len);
        app.state.reload();
        assert_eq!(app.state().overlay.index().map(SearchIndex::len), before);
    }

    #[test]
    fn missing_snapshot_means_no_index() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(
            Config::defaults(),
            Theme::load_default(),
            Some(dir.path().join("missing.json")),
            false,
        );
        assert!(app.state().overlay.index().is_none());
        assert!(app.state().nav.entries.is_empty());
    }

    #[test]
    fn draws_every_layer_without_panicking() {
        let mut app = app();
        app.handle(AppEvent::OpenSearch);
        type_text(&mut app, "pipe");
        app.tick();
        render(&app);
        app.handle(AppEvent::Escape);
        app.handle(AppEvent::Help);
        render(&app);
        app.handle(AppEvent::Escape);
        app.handle(AppEvent::Command);
        render(&app);
    }
}
