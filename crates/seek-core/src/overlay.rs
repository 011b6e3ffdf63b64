//! Search overlay — the modal query box, its ranked results and the highlight.
//!
//! State lives in a plain [`QueryState`] value and only ever changes through
//! [`reduce`], a pure transition function over [`Action`]. [`SearchOverlay`]
//! wraps the reducer and performs the side effects: running the [`Matcher`]
//! against the current [`SearchIndex`] and asking a [`Navigator`] to move to
//! a confirmed result.
//!
//! # Phases
//!
//! ```text
//!            open                 set_query            tick
//!  Hidden ─────────► Empty ──────────────────► Searching ─────► Results
//!    ▲                 │                          ▲               │
//!    │                 └──── set_query ───────────┴── set_query ──┘
//!    └──── close / escape / confirm / route change (from any visible phase)
//! ```
//!
//! # Invariants
//!
//! - `highlight < results.len()` whenever `results` is non-empty, and
//!   `highlight == 0` when it is empty.
//! - `highlight` is reset to 0 on every query change and whenever results
//!   arrive.
//! - Closing always clears the query and the results.
//! - Results are only applied if they were computed for the current query:
//!   each query change bumps `generation`, and a completion carrying an older
//!   generation is dropped.

use crate::index::SearchIndex;
use crate::search::{Matcher, SkimMatcher};
use crate::types::RankedResult;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Observable phase of the overlay, derived from [`QueryState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    /// Visible with an empty query; nothing to show yet.
    Empty,
    /// The query changed and its results have not been computed yet.
    Searching,
    /// Results for the current query are in place (possibly none).
    Results,
}

/// Direction for cycling the highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub visible: bool,
    pub query: String,
    /// A search for `query` is pending.
    pub searching: bool,
    /// Ranked results, best first.
    pub results: Vec<RankedResult>,
    /// Position of the keyboard-selected result within `results`.
    pub highlight: usize,
    /// Bumped on every query change and on close.
    pub generation: u64,
}

impl QueryState {
    pub fn phase(&self) -> Phase {
        if !self.visible {
            Phase::Hidden
        } else if self.searching {
            Phase::Searching
        } else if self.query.trim().is_empty() {
            Phase::Empty
        } else {
            Phase::Results
        }
    }

    pub fn highlighted(&self) -> Option<&RankedResult> {
        self.results.get(self.highlight)
    }
}

// ---------------------------------------------------------------------------
// Reducer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show the overlay. A prior query is kept.
    Open,
    /// Replace the query text and mark a search as pending.
    SetQuery(String),
    /// Results computed for the query at `generation`.
    SearchCompleted {
        generation: u64,
        results: Vec<RankedResult>,
    },
    /// Cycle the highlight, wrapping at both ends.
    MoveHighlight(Step),
    /// Highlight an absolute position (pointer hover / click).
    Highlight(usize),
    /// Hide the overlay and clear the query and results.
    Close,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Open => "open",
            Action::SetQuery(_) => "set_query",
            Action::SearchCompleted { .. } => "search_completed",
            Action::MoveHighlight(_) => "move_highlight",
            Action::Highlight(_) => "highlight",
            Action::Close => "close",
        }
    }
}

/// Pure transition function from `(state, action)` to the next state.
pub fn reduce(mut state: QueryState, action: Action) -> QueryState {
    match action {
        Action::Open => {
            state.visible = true;
        }
        Action::SetQuery(text) => {
            state.query = text;
            state.searching = true;
            state.highlight = 0;
            state.generation = state.generation.wrapping_add(1);
        }
        Action::SearchCompleted {
            generation,
            results,
        } => {
            if !state.searching || generation != state.generation {
                return state;
            }
            state.results = results;
            state.searching = false;
            state.highlight = 0;
        }
        Action::MoveHighlight(step) => {
            let len = state.results.len();
            if len == 0 {
                return state;
            }
            state.highlight = match step {
                Step::Up => (state.highlight + len - 1) % len,
                Step::Down => (state.highlight + 1) % len,
            };
        }
        Action::Highlight(position) => {
            if position < state.results.len() {
                state.highlight = position;
            }
        }
        Action::Close => {
            state.visible = false;
            state.query.clear();
            state.results.clear();
            state.searching = false;
            state.highlight = 0;
            state.generation = state.generation.wrapping_add(1);
        }
    }
    state
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Navigation capability provided by the host (a router, a browser history).
pub trait Navigator {
    fn navigate_to(&mut self, path: &str);
}

impl Navigator for Vec<String> {
    fn navigate_to(&mut self, path: &str) {
        self.push(path.to_string());
    }
}

/// The overlay controller: reducer state plus the index and matcher it
/// searches with.
pub struct SearchOverlay<M = SkimMatcher> {
    state: QueryState,
    index: Option<SearchIndex>,
    matcher: M,
    /// Last location observed via [`SearchOverlay::observe_location`].
    location: Option<String>,
}

impl<M: Matcher> SearchOverlay<M> {
    /// `index` is `None` when the data source is unavailable; every search
    /// then yields no results.
    pub fn new(index: Option<SearchIndex>, matcher: M) -> Self {
        Self {
            state: QueryState::default(),
            index,
            matcher,
            location: None,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn index(&self) -> Option<&SearchIndex> {
        self.index.as_ref()
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    pub fn dispatch(&mut self, action: Action) {
        let name = action.name();
        let before = self.state.phase();
        self.state = reduce(std::mem::take(&mut self.state), action);
        tracing::debug!(
            action = name,
            from = ?before,
            to = ?self.state.phase(),
            highlight = self.state.highlight,
            results = self.state.results.len(),
            "overlay transition"
        );
    }

    pub fn open(&mut self) {
        self.dispatch(Action::Open);
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.dispatch(Action::SetQuery(text.into()));
    }

    pub fn close(&mut self) {
        self.dispatch(Action::Close);
    }

    pub fn move_highlight(&mut self, step: Step) {
        self.dispatch(Action::MoveHighlight(step));
    }

    /// Rank the current index against `text` without touching overlay state.
    pub fn run_search(&self, text: &str) -> Vec<RankedResult> {
        match &self.index {
            Some(index) => self.matcher.search(index, text),
            None => Vec::new(),
        }
    }

    /// Resolve a pending search, if any. Returns whether one ran.
    ///
    /// The host calls this once per turn of its event loop, so a query edit
    /// is searched on the next tick and only the latest edit is ever searched.
    pub fn tick(&mut self) -> bool {
        if !self.state.searching {
            return false;
        }
        let results = self.run_search(&self.state.query);
        let generation = self.state.generation;
        self.dispatch(Action::SearchCompleted {
            generation,
            results,
        });
        true
    }

    /// Close and navigate to the highlighted result. Returns the path
    /// navigated to, or `None` (overlay untouched) when the overlay is hidden
    /// or nothing is highlighted.
    pub fn confirm_selection(&mut self, navigator: &mut dyn Navigator) -> Option<String> {
        if !self.state.visible {
            return None;
        }
        self.tick();
        let path = self.state.highlighted()?.path().to_string();
        self.close();
        tracing::debug!(path = %path, "overlay: navigating to selection");
        navigator.navigate_to(&path);
        Some(path)
    }

    /// Pointer selection: highlight `position`, then confirm it.
    pub fn select(&mut self, position: usize, navigator: &mut dyn Navigator) -> Option<String> {
        if !self.state.visible {
            return None;
        }
        self.tick();
        if position >= self.state.results.len() {
            return None;
        }
        self.dispatch(Action::Highlight(position));
        self.confirm_selection(navigator)
    }

    /// Report the host's current location. A change observed while the
    /// overlay is visible closes it. Returns whether it closed.
    pub fn observe_location(&mut self, location: &str) -> bool {
        let changed = match self.location.as_deref() {
            Some(previous) => previous != location,
            None => false,
        };
        if self.location.as_deref() != Some(location) {
            self.location = Some(location.to_string());
        }
        if changed && self.state.visible {
            tracing::debug!(location, "overlay: route changed, closing");
            self.close();
            return true;
        }
        false
    }

    /// Swap in a refreshed index. A non-blank query is searched again against
    /// it on the next tick.
    pub fn replace_index(&mut self, index: Option<SearchIndex>) {
        self.index = index;
        if !self.state.query.trim().is_empty() {
            let query = self.state.query.clone();
            self.set_query(query);
        }
    }
}

impl Default for SearchOverlay<SkimMatcher> {
    fn default() -> Self {
        Self::new(None, SkimMatcher::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
