//! Runtime settings
//!
//! Assembled from command line flags at startup. Nothing is persisted; the
//! dashboard keeps all state in memory for the lifetime of the process.

/// Color scheme selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Default,
    Monochrome,
}

/// User configuration
#[derive(Debug, Clone)]
pub struct Settings {
    /// Delay between refreshes, in tenths of seconds (clamped to 1..=100)
    pub delay: u32,

    /// Initial filter text
    pub filter: Option<String>,

    /// Color scheme
    pub color_scheme: ColorScheme,

    /// Disable all process-changing features (kill/terminate/restart)
    pub readonly: bool,

    /// Exit after this many completed refresh cycles (-1 = run forever)
    pub max_iterations: i64,
}

impl Settings {
    pub fn new() -> Self {
        Settings {
            delay: 20,
            filter: None,
            color_scheme: ColorScheme::Default,
            readonly: false,
            max_iterations: -1,
        }
    }

    /// Refresh interval in milliseconds
    pub fn refresh_interval_ms(&self) -> u64 {
        self.delay as u64 * 100
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new()
    }
}
