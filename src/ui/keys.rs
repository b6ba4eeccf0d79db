//! Keyboard translation
//!
//! Raw ncurses keycodes are translated to abstract key identities once, at
//! the edge; the view state machine never sees raw bytes.

use ncurses::{
    KEY_BACKSPACE, KEY_DOWN, KEY_END, KEY_ENTER, KEY_HOME, KEY_NPAGE, KEY_PPAGE, KEY_RESIZE,
    KEY_UP,
};

use super::crt::KEY_F10;

const KEY_CTRL_D: i32 = 4;
const KEY_CTRL_U: i32 = 21;
const KEY_ESC: i32 = 27;

/// Abstract key identities consumed by the view state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    HalfPageUp,
    HalfPageDown,
    Top,
    Bottom,
    Enter,
    Escape,
    Backspace,
    /// Quit from any state (F10)
    ForceQuit,
    Resize,
    /// Printable character; mode keys ('/', 's', 'q', ...) arrive as these
    Char(char),
}

/// Translate a raw keycode; unknown codes are dropped
pub fn translate(ch: i32) -> Option<Key> {
    match ch {
        KEY_UP => Some(Key::Up),
        KEY_DOWN => Some(Key::Down),
        KEY_PPAGE | KEY_CTRL_U => Some(Key::HalfPageUp),
        KEY_NPAGE | KEY_CTRL_D => Some(Key::HalfPageDown),
        KEY_HOME => Some(Key::Top),
        KEY_END => Some(Key::Bottom),
        10 | 13 | KEY_ENTER => Some(Key::Enter),
        KEY_ESC => Some(Key::Escape),
        KEY_BACKSPACE | 127 | 8 => Some(Key::Backspace),
        KEY_RESIZE => Some(Key::Resize),
        x if x == KEY_F10 => Some(Key::ForceQuit),
        c if (32..127).contains(&c) => char::from_u32(c as u32).map(Key::Char),
        _ => None,
    }
}
