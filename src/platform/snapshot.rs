//! Background snapshot worker
//!
//! At most one snapshot fetch runs at a time. Requesting a refresh while one
//! is in flight drops the request rather than queueing it; the next periodic
//! tick retries. The event loop polls `try_take` between keystrokes, so a
//! slow `ps` never stalls input handling. On shutdown a running worker is
//! simply abandoned.

use std::thread::{self, JoinHandle};

use super::source::SourceResult;

/// One-slot background fetch handle
#[derive(Debug, Default)]
pub struct SnapshotScanner {
    handle: Option<JoinHandle<SourceResult>>,
}

impl SnapshotScanner {
    pub fn new() -> Self {
        SnapshotScanner { handle: None }
    }

    /// Whether a fetch is currently in flight
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start a fetch unless one is already in flight. Returns whether the
    /// request was accepted.
    pub fn start<F>(&mut self, fetch: F) -> bool
    where
        F: FnOnce() -> SourceResult + Send + 'static,
    {
        if self.is_running() {
            return false;
        }
        // A finished but unharvested result also blocks: it must be taken
        // before the next fetch so cycles stay serialized.
        if self.handle.is_some() {
            return false;
        }
        self.handle = Some(thread::spawn(fetch));
        true
    }

    /// Take the completed result, if any (non-blocking)
    pub fn try_take(&mut self) -> Option<SourceResult> {
        if self.handle.as_ref().is_some_and(|h| h.is_finished()) {
            return self.handle.take().and_then(|h| h.join().ok());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_scanner_lifecycle() {
        let mut scanner = SnapshotScanner::new();
        assert!(!scanner.is_running());
        assert!(scanner.try_take().is_none());

        assert!(scanner.start(|| Ok(Vec::new())));

        // Wait for completion
        std::thread::sleep(Duration::from_millis(20));
        let result = scanner.try_take();
        assert!(matches!(result, Some(Ok(ref v)) if v.is_empty()));

        // Result consumed, slot free again
        assert!(scanner.try_take().is_none());
        assert!(!scanner.is_running());
    }

    #[test]
    fn test_scanner_drops_request_while_busy() {
        let mut scanner = SnapshotScanner::new();

        assert!(scanner.start(|| {
            std::thread::sleep(Duration::from_millis(80));
            Ok(Vec::new())
        }));

        // Second request while the first is in flight is dropped
        assert!(!scanner.start(|| {
            Ok(vec![crate::core::parse_line("1 0 0.0 0.0 S ?? /sbin/init").unwrap()])
        }));

        std::thread::sleep(Duration::from_millis(120));
        let result = scanner.try_take().unwrap().unwrap();
        assert!(result.is_empty(), "only the first fetch may complete");
    }

    #[test]
    fn test_unharvested_result_blocks_next_fetch() {
        let mut scanner = SnapshotScanner::new();
        assert!(scanner.start(|| Ok(Vec::new())));
        std::thread::sleep(Duration::from_millis(20));

        // Finished but not yet taken: a new fetch must still be refused
        assert!(!scanner.start(|| Ok(Vec::new())));
        assert!(scanner.try_take().is_some());
        assert!(scanner.start(|| Ok(Vec::new())));
    }
}
