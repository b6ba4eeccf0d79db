//! ScreenManager - the main event loop
//!
//! Single-threaded owner of the view state. Each iteration harvests any
//! completed snapshot fetch, schedules the periodic refresh, redraws, and
//! handles at most one key. Snapshot fetches run on a worker thread through
//! [`SnapshotScanner`]; everything else happens here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use chrono::Local;

use crate::core::Settings;
use crate::platform::{self, SignalKind, SnapshotScanner};

use super::crt::{ColorElement, Crt};
use super::function_bar::FunctionBar;
use super::keys::{self, Key};
use super::main_panel::MainPanel;
use super::view_state::{ActionKind, Mode, PendingAction, Reaction, ViewState};

/// Key read timeout; also bounds the latency of harvest and redraw
const INPUT_TIMEOUT_MS: i32 = 100;

/// How much of a long command line the confirmation banner shows
const CONFIRM_COMMAND_CHARS: usize = 40;

pub struct ScreenManager {
    settings: Settings,
    view: ViewState,
    panel: MainPanel,
    function_bar: FunctionBar,
    scanner: SnapshotScanner,
    last_refresh_request: Instant,
    /// Wall-clock time of the last applied snapshot, for the status area
    refreshed_at: String,
    iterations_remaining: i64,
}

impl ScreenManager {
    pub fn new(settings: Settings) -> Self {
        let view = ViewState::new(&settings);
        let iterations_remaining = settings.max_iterations;
        ScreenManager {
            settings,
            view,
            panel: MainPanel::new(),
            function_bar: FunctionBar::new(),
            scanner: SnapshotScanner::new(),
            last_refresh_request: Instant::now(),
            refreshed_at: String::new(),
            iterations_remaining,
        }
    }

    /// Run until quit, shutdown signal, or the iteration budget is spent
    pub fn run(&mut self, crt: &mut Crt, running: &AtomicBool) {
        crt.set_input_timeout(INPUT_TIMEOUT_MS);
        self.request_refresh();

        while running.load(Ordering::SeqCst) {
            if self.iterations_remaining == 0 {
                break;
            }

            self.harvest(MainPanel::viewport_height(crt));
            self.maybe_schedule_refresh();
            self.draw(crt);

            let Some(ch) = crt.read_key() else { continue };
            let Some(key) = keys::translate(ch) else { continue };
            if key == Key::Resize {
                crt.update_size();
                continue;
            }
            match self.view.on_key(key, MainPanel::viewport_height(crt)) {
                Reaction::Quit => break,
                Reaction::Refresh => self.request_refresh(),
                Reaction::Dispatch(action) => {
                    Self::dispatch(action);
                    self.request_refresh();
                }
                Reaction::Render | Reaction::Ignored => {}
            }
        }
    }

    /// Apply a completed snapshot fetch, if one is ready. A failed fetch
    /// leaves the previous view untouched and does not count against the
    /// iteration budget.
    fn harvest(&mut self, viewport: usize) {
        let Some(result) = self.scanner.try_take() else {
            return;
        };
        if self.view.apply_result(result, viewport) {
            self.refreshed_at = Local::now().format("%H:%M:%S").to_string();
            if self.iterations_remaining > 0 {
                self.iterations_remaining -= 1;
            }
        }
    }

    /// Periodic refresh, suppressed while the user is mid-interaction
    fn maybe_schedule_refresh(&mut self) {
        if self.view.mode() != Mode::Normal {
            return;
        }
        let interval = Duration::from_millis(self.settings.refresh_interval_ms());
        if self.last_refresh_request.elapsed() >= interval {
            self.request_refresh();
        }
    }

    /// Start a snapshot fetch; dropped (not queued) if one is in flight
    fn request_refresh(&mut self) {
        if self.scanner.start(platform::snapshot) {
            self.last_refresh_request = Instant::now();
        }
    }

    /// Fire the confirmed action. Outcomes are never reported; the next
    /// refresh shows whatever actually happened.
    fn dispatch(action: PendingAction) {
        match action.kind {
            ActionKind::Kill => {
                let _ = platform::send_signal(action.pid, SignalKind::Kill);
            }
            ActionKind::Terminate => {
                let _ = platform::send_signal(action.pid, SignalKind::Terminate);
            }
            ActionKind::Restart => platform::restart(action.pid, action.command),
        }
    }

    fn draw(&self, crt: &Crt) {
        crt.clear();
        self.panel.draw(crt, &self.view);

        let y = crt.height() - 1;
        match self.view.mode() {
            Mode::Normal => {
                self.draw_status_bar(crt, y);
                crt.show_cursor(false);
            }
            Mode::FilterEditing => {
                self.draw_filter_bar(crt, y);
                crt.show_cursor(true);
            }
            Mode::Confirming => {
                self.draw_confirm_bar(crt, y);
                crt.show_cursor(false);
            }
        }
        crt.refresh();
    }

    /// Key hints on the left, "shown/total clock" on the right
    fn draw_status_bar(&self, crt: &Crt, y: i32) {
        let end_x = self.function_bar.draw_return_x(crt, y);

        let status = format!(
            "{}/{}  {}",
            self.view.displayed().len(),
            self.view.total(),
            self.refreshed_at,
        );
        let x = crt.width() - status.len() as i32 - 1;
        if x > end_x {
            crt.attrset(crt.color(ColorElement::FunctionBar));
            crt.mv(y, x);
            crt.addstr_raw(&status);
            crt.attrset(ncurses::A_NORMAL);
        }
    }

    /// Live filter entry line, cursor left after the text
    fn draw_filter_bar(&self, crt: &Crt, y: i32) {
        let bar_color = crt.color(ColorElement::FunctionBar);
        let key_color = crt.color(ColorElement::FunctionKey);

        crt.attrset(bar_color);
        crt.hline(y, 0, ' ' as u32, crt.width());
        crt.mv(y, 0);

        crt.attrset(key_color);
        crt.addstr_raw("Enter ");
        crt.attrset(bar_color);
        crt.addstr_raw("Done  ");
        crt.attrset(key_color);
        crt.addstr_raw("Esc ");
        crt.attrset(bar_color);
        crt.addstr_raw("Clear  ");
        crt.addstr_raw(" Filter: ");
        crt.addstr_raw(self.view.filter_text());
        crt.attrset(ncurses::A_NORMAL);
    }

    /// Confirmation gate banner for the pending action
    fn draw_confirm_bar(&self, crt: &Crt, y: i32) {
        let attr = crt.color(ColorElement::ConfirmBanner);
        crt.attrset(attr);
        crt.hline(y, 0, ' ' as u32, crt.width());
        crt.mv(y, 0);

        if let Some(action) = self.view.pending() {
            let command: String = action.command.chars().take(CONFIRM_COMMAND_CHARS).collect();
            let banner = format!(
                "{} {} ({})?  y confirms, any other key cancels",
                action.kind.verb(),
                action.pid,
                command,
            );
            let width = crt.width() as usize;
            let banner: String = banner.chars().take(width).collect();
            crt.addstr_raw(&banner);
        }
        crt.attrset(ncurses::A_NORMAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SourceError;
    use std::thread;

    fn manager(max_iterations: i64) -> ScreenManager {
        let mut settings = Settings::new();
        settings.max_iterations = max_iterations;
        ScreenManager::new(settings)
    }

    fn wait_for_fetch(sm: &ScreenManager) {
        while sm.scanner.is_running() {
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_harvest_applies_successful_fetch() {
        let mut sm = manager(2);
        assert!(sm
            .scanner
            .start(|| Ok(vec![crate::core::parse_line("1 0 0.0 0.0 S ?? /sbin/init").unwrap()])));
        wait_for_fetch(&sm);

        sm.harvest(10);
        assert_eq!(sm.view.displayed().len(), 1);
        assert_eq!(sm.iterations_remaining, 1);
        assert!(!sm.refreshed_at.is_empty());
    }

    #[test]
    fn test_harvest_keeps_view_and_budget_on_failed_fetch() {
        let mut sm = manager(3);
        sm.view.apply_snapshot(
            vec![crate::core::parse_line("1 0 0.0 0.0 S ?? /sbin/init").unwrap()],
            10,
        );

        assert!(sm.scanner.start(|| {
            Err(SourceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "ps missing",
            )))
        }));
        wait_for_fetch(&sm);

        sm.harvest(10);
        assert_eq!(sm.view.displayed().len(), 1, "previous view retained");
        assert_eq!(sm.iterations_remaining, 3, "error cycles are not completed refreshes");
        assert!(sm.refreshed_at.is_empty());

        // The slot is free again, so the next periodic tick can retry
        assert!(sm.scanner.start(|| Ok(Vec::new())));
    }
}
