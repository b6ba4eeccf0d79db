//! CRT - Terminal abstraction using ncurses
//!
//! Thin wrapper over the ncurses primitives this UI needs: init/teardown,
//! a small palette of named color attributes, non-blocking key reads.

use ncurses::CURSOR_VISIBILITY::{CURSOR_INVISIBLE, CURSOR_VISIBLE};
use ncurses::*;

use crate::core::ColorScheme;

pub const KEY_F10: i32 = KEY_F0 + 10;

/// Direction markers for the active sort column header
pub const SORT_ASC_MARKER: &str = "^";
pub const SORT_DESC_MARKER: &str = "v";

/// Color elements for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ColorElement {
    ResetColor = 0,
    DefaultColor,
    FunctionBar,
    FunctionKey,
    PanelHeader,
    PanelSelection,
    ConfirmBanner,
    Shadow,
    HighLoad,
    CriticalLoad,
    RunState,
    DeadState,
    LastColorElement,
}

// Named color pair indices (pair 0 is the terminal default and cannot be
// redefined, so numbering starts at 1)
const PAIR_BLACK_CYAN: i16 = 1;
const PAIR_CYAN_BLACK: i16 = 2;
const PAIR_RED_BLACK: i16 = 3;
const PAIR_GREEN_BLACK: i16 = 4;
const PAIR_YELLOW_BLACK: i16 = 5;
const PAIR_GRAY_BLACK: i16 = 6;

/// CRT - Terminal handler
pub struct Crt {
    colors: Vec<attr_t>,
    screen_width: i32,
    screen_height: i32,
}

impl Crt {
    /// Initialize the terminal. Failure here is the only fatal error in the
    /// program; the caller aborts with a message on stderr.
    pub fn new(color_scheme: ColorScheme) -> anyhow::Result<Self> {
        // Initialize locale so ncurses handles wide characters (must be done
        // before initscr)
        unsafe {
            libc::setlocale(libc::LC_CTYPE, b"\0".as_ptr() as *const libc::c_char);
        }

        initscr();
        noecho();
        cbreak();
        curs_set(CURSOR_INVISIBLE);
        keypad(stdscr(), true);

        if has_colors() {
            start_color();
            use_default_colors();
        }

        let mut crt = Crt {
            colors: vec![A_NORMAL; ColorElement::LastColorElement as usize],
            screen_width: 0,
            screen_height: 0,
        };
        crt.update_size();

        if crt.screen_width <= 0 || crt.screen_height <= 0 {
            endwin();
            anyhow::bail!("failed to initialize terminal");
        }

        let scheme = if has_colors() {
            color_scheme
        } else {
            ColorScheme::Monochrome
        };
        match scheme {
            ColorScheme::Default => crt.setup_default(),
            ColorScheme::Monochrome => crt.setup_monochrome(),
        }

        Ok(crt)
    }

    fn setup_default(&mut self) {
        init_pair(PAIR_BLACK_CYAN, COLOR_BLACK, COLOR_CYAN);
        init_pair(PAIR_CYAN_BLACK, COLOR_CYAN, -1);
        init_pair(PAIR_RED_BLACK, COLOR_RED, -1);
        init_pair(PAIR_GREEN_BLACK, COLOR_GREEN, -1);
        init_pair(PAIR_YELLOW_BLACK, COLOR_YELLOW, -1);
        // Dark gray needs the extended palette; fall back to bold black
        let gray_fg = if COLORS() > 8 { 8 } else { COLOR_BLACK };
        init_pair(PAIR_GRAY_BLACK, gray_fg, -1);

        self.colors[ColorElement::ResetColor as usize] = A_NORMAL;
        self.colors[ColorElement::DefaultColor as usize] = A_NORMAL;
        self.colors[ColorElement::FunctionBar as usize] = COLOR_PAIR(PAIR_BLACK_CYAN);
        self.colors[ColorElement::FunctionKey as usize] = A_NORMAL;
        self.colors[ColorElement::PanelHeader as usize] = COLOR_PAIR(PAIR_BLACK_CYAN);
        self.colors[ColorElement::PanelSelection as usize] = COLOR_PAIR(PAIR_BLACK_CYAN);
        self.colors[ColorElement::ConfirmBanner as usize] = COLOR_PAIR(PAIR_RED_BLACK) | A_BOLD;
        self.colors[ColorElement::Shadow as usize] = COLOR_PAIR(PAIR_GRAY_BLACK) | A_BOLD;
        self.colors[ColorElement::HighLoad as usize] = COLOR_PAIR(PAIR_YELLOW_BLACK);
        self.colors[ColorElement::CriticalLoad as usize] = COLOR_PAIR(PAIR_RED_BLACK) | A_BOLD;
        self.colors[ColorElement::RunState as usize] = COLOR_PAIR(PAIR_GREEN_BLACK);
        self.colors[ColorElement::DeadState as usize] = COLOR_PAIR(PAIR_RED_BLACK);
    }

    fn setup_monochrome(&mut self) {
        // Terminal attributes instead of colors
        for color in &mut self.colors {
            *color = A_NORMAL;
        }
        self.colors[ColorElement::FunctionBar as usize] = A_REVERSE;
        self.colors[ColorElement::PanelHeader as usize] = A_REVERSE;
        self.colors[ColorElement::PanelSelection as usize] = A_REVERSE;
        self.colors[ColorElement::ConfirmBanner as usize] = A_BOLD | A_REVERSE;
        self.colors[ColorElement::Shadow as usize] = A_DIM;
        self.colors[ColorElement::HighLoad as usize] = A_BOLD;
        self.colors[ColorElement::CriticalLoad as usize] = A_BOLD;
        self.colors[ColorElement::RunState as usize] = A_BOLD;
        self.colors[ColorElement::DeadState as usize] = A_BOLD;
    }

    /// Get the attribute for a color element
    pub fn color(&self, element: ColorElement) -> attr_t {
        self.colors
            .get(element as usize)
            .copied()
            .unwrap_or(A_NORMAL)
    }

    /// Update screen dimensions
    pub fn update_size(&mut self) {
        getmaxyx(stdscr(), &mut self.screen_height, &mut self.screen_width);
    }

    pub fn width(&self) -> i32 {
        self.screen_width
    }

    pub fn height(&self) -> i32 {
        self.screen_height
    }

    /// Set the blocking timeout for key reads, in milliseconds
    pub fn set_input_timeout(&self, ms: i32) {
        ncurses::timeout(ms);
    }

    /// Read a key from input; None on timeout
    pub fn read_key(&self) -> Option<i32> {
        let ch = getch();
        if ch == ERR {
            None
        } else {
            Some(ch)
        }
    }

    pub fn clear(&self) {
        clear();
    }

    pub fn refresh(&self) {
        refresh();
    }

    pub fn mv(&self, y: i32, x: i32) {
        mv(y, x);
    }

    pub fn attrset(&self, attr: attr_t) {
        attrset(attr);
    }

    pub fn addstr_raw(&self, text: &str) {
        let _ = addstr(text);
    }

    /// Fill n cells starting at (y, x) with a character
    pub fn hline(&self, y: i32, x: i32, ch: u32, n: i32) {
        mv(y, x);
        hline(ch, n);
    }

    pub fn show_cursor(&self, visible: bool) {
        if visible {
            curs_set(CURSOR_VISIBLE);
        } else {
            curs_set(CURSOR_INVISIBLE);
        }
    }

    /// Restore the terminal
    pub fn done(&self) {
        curs_set(CURSOR_VISIBLE);
        endwin();
    }
}

impl Drop for Crt {
    fn drop(&mut self) {
        self.done();
    }
}
