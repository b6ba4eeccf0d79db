//! View state machine
//!
//! Owns everything the live view remembers across refreshes: sort and filter
//! state, the selection, the scroll offset, and a pending confirmation. The
//! displayed list is always `filter(sort(raw))` for the current state; it is
//! recomputed wholesale whenever a snapshot arrives or sort/filter change,
//! never patched in place.
//!
//! The state is owned exclusively by the event loop. Keys come in as
//! abstract [`Key`] identities; the returned [`Reaction`] tells the loop
//! what to do next (render, fetch a snapshot, dispatch an action, quit).

use crate::core::{filter_records, sort_records, ProcessRecord, Settings, SortField};
use crate::platform::SourceResult;

use super::keys::Key;

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    FilterEditing,
    Confirming,
}

/// Destructive action awaiting confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Kill,
    Terminate,
    Restart,
}

impl ActionKind {
    pub fn verb(self) -> &'static str {
        match self {
            ActionKind::Kill => "Kill",
            ActionKind::Terminate => "Terminate",
            ActionKind::Restart => "Restart",
        }
    }
}

/// Captured target of a confirmation gate
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAction {
    pub pid: i32,
    pub command: String,
    pub kind: ActionKind,
}

/// What the event loop should do after a key was handled
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    /// Nothing changed
    Ignored,
    /// Redraw only, no data refetch
    Render,
    /// Recompose happened from retained data; a fresh snapshot is wanted too
    Refresh,
    /// Confirmed action to dispatch, followed by a refresh
    Dispatch(PendingAction),
    /// Leave the event loop
    Quit,
}

/// Live view state (main-loop-only, process lifetime)
#[derive(Debug)]
pub struct ViewState {
    sort_field: SortField,
    sort_ascending: bool,
    filter_text: String,
    mode: Mode,
    selected: usize,
    scroll_v: usize,
    pending: Option<PendingAction>,
    readonly: bool,
    /// Last successfully fetched raw snapshot
    raw: Vec<ProcessRecord>,
    /// Derived: filter(sort(raw)), recomputed on every rebuild
    displayed: Vec<ProcessRecord>,
}

impl ViewState {
    /// Default view: CPU descending, filter from settings if given
    pub fn new(settings: &Settings) -> Self {
        ViewState {
            sort_field: SortField::Cpu,
            sort_ascending: false,
            filter_text: settings.filter.clone().unwrap_or_default(),
            mode: Mode::Normal,
            selected: 0,
            scroll_v: 0,
            pending: None,
            readonly: settings.readonly,
            raw: Vec::new(),
            displayed: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_ascending(&self) -> bool {
        self.sort_ascending
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll_v(&self) -> usize {
        self.scroll_v
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn displayed(&self) -> &[ProcessRecord] {
        &self.displayed
    }

    pub fn total(&self) -> usize {
        self.raw.len()
    }

    /// Swap in a fresh snapshot and reconcile selection and scroll
    pub fn apply_snapshot(&mut self, raw: Vec<ProcessRecord>, viewport: usize) {
        self.raw = raw;
        self.rebuild(viewport);
    }

    /// Apply the outcome of a snapshot fetch. A failed fetch leaves the
    /// retained snapshot and the derived view untouched. Returns whether a
    /// fresh snapshot was applied.
    pub fn apply_result(&mut self, result: SourceResult, viewport: usize) -> bool {
        match result {
            Ok(raw) => {
                self.apply_snapshot(raw, viewport);
                true
            }
            Err(_) => false,
        }
    }

    /// Recompute the displayed list from the retained snapshot
    fn rebuild(&mut self, viewport: usize) {
        let mut list = self.raw.clone();
        sort_records(&mut list, self.sort_field, self.sort_ascending);
        self.displayed = filter_records(list, &self.filter_text);

        if self.displayed.is_empty() {
            self.selected = 0;
            self.scroll_v = 0;
        } else {
            self.selected = self.selected.min(self.displayed.len() - 1);
            self.ensure_visible(viewport);
        }
    }

    /// Clamp selection, then re-derive the scroll offset so the selection
    /// stays inside the viewport (scroll follows selection)
    fn set_selected(&mut self, index: isize, viewport: usize) {
        let max = self.displayed.len().saturating_sub(1) as isize;
        self.selected = index.clamp(0, max) as usize;
        self.ensure_visible(viewport);
    }

    fn ensure_visible(&mut self, viewport: usize) {
        if viewport == 0 {
            self.scroll_v = 0;
            return;
        }
        if self.selected < self.scroll_v {
            self.scroll_v = self.selected;
        } else if self.selected >= self.scroll_v + viewport {
            self.scroll_v = self.selected + 1 - viewport;
        }
        let max_scroll = self.displayed.len().saturating_sub(viewport);
        self.scroll_v = self.scroll_v.min(max_scroll);
    }

    /// Handle one key. `viewport` is the current number of visible rows.
    pub fn on_key(&mut self, key: Key, viewport: usize) -> Reaction {
        if key == Key::ForceQuit {
            return Reaction::Quit;
        }
        match self.mode {
            Mode::Confirming => self.on_key_confirming(key),
            Mode::FilterEditing => self.on_key_filter_editing(key, viewport),
            Mode::Normal => self.on_key_normal(key, viewport),
        }
    }

    fn on_key_confirming(&mut self, key: Key) -> Reaction {
        // Only accept or cancel while the gate is up
        let pending = self.pending.take();
        self.mode = Mode::Normal;
        match (key, pending) {
            (Key::Char('y'), Some(action)) => Reaction::Dispatch(action),
            _ => Reaction::Render,
        }
    }

    fn on_key_filter_editing(&mut self, key: Key, viewport: usize) -> Reaction {
        match key {
            Key::Enter => {
                // Commit: keep the text, leave editing
                self.mode = Mode::Normal;
                self.rebuild(viewport);
                Reaction::Refresh
            }
            Key::Escape => {
                self.filter_text.clear();
                self.mode = Mode::Normal;
                self.rebuild(viewport);
                Reaction::Refresh
            }
            Key::Backspace => {
                self.filter_text.pop();
                self.rebuild(viewport);
                Reaction::Refresh
            }
            Key::Char(c) => {
                self.filter_text.push(c);
                self.rebuild(viewport);
                Reaction::Refresh
            }
            _ => Reaction::Ignored,
        }
    }

    fn on_key_normal(&mut self, key: Key, viewport: usize) -> Reaction {
        let half = (viewport / 2) as isize;
        match key {
            Key::Up => {
                self.set_selected(self.selected as isize - 1, viewport);
                Reaction::Render
            }
            Key::Down => {
                self.set_selected(self.selected as isize + 1, viewport);
                Reaction::Render
            }
            Key::HalfPageUp => {
                self.set_selected(self.selected as isize - half, viewport);
                Reaction::Render
            }
            Key::HalfPageDown => {
                self.set_selected(self.selected as isize + half, viewport);
                Reaction::Render
            }
            Key::Top => {
                self.set_selected(0, viewport);
                Reaction::Render
            }
            Key::Bottom => {
                self.set_selected(self.displayed.len() as isize - 1, viewport);
                Reaction::Render
            }
            Key::Char('k') => self.on_key_normal(Key::Up, viewport),
            Key::Char('j') => self.on_key_normal(Key::Down, viewport),
            Key::Char('g') => self.on_key_normal(Key::Top, viewport),
            Key::Char('G') => self.on_key_normal(Key::Bottom, viewport),
            Key::Char('/') => {
                // Existing text is kept for further editing
                self.mode = Mode::FilterEditing;
                Reaction::Render
            }
            Key::Char('s') => {
                self.sort_field = self.sort_field.next();
                self.sort_ascending = self.sort_field.default_ascending();
                self.rebuild(viewport);
                Reaction::Refresh
            }
            Key::Char('I') => {
                self.sort_ascending = !self.sort_ascending;
                self.rebuild(viewport);
                Reaction::Refresh
            }
            Key::Char('x') => self.arm(ActionKind::Kill),
            Key::Char('t') => self.arm(ActionKind::Terminate),
            Key::Char('r') => self.arm(ActionKind::Restart),
            Key::Char('q') => Reaction::Quit,
            _ => Reaction::Ignored,
        }
    }

    /// Raise the confirmation gate for the selected record
    fn arm(&mut self, kind: ActionKind) -> Reaction {
        if self.readonly {
            return Reaction::Ignored;
        }
        match self.displayed.get(self.selected) {
            Some(record) => {
                self.pending = Some(PendingAction {
                    pid: record.pid,
                    command: record.cmdline.clone(),
                    kind,
                });
                self.mode = Mode::Confirming;
                Reaction::Render
            }
            None => Reaction::Ignored,
        }
    }
}
