//! UI module
//!
//! This module contains all UI-related components:
//! - CRT: Terminal abstraction using ncurses
//! - Key translation from raw keycodes to abstract identities
//! - ViewState: the live view state machine
//! - MainPanel: the process table painter
//! - FunctionBar: key hints at the bottom of the screen
//! - ScreenManager: the main event loop

mod crt;
mod function_bar;
mod keys;
mod main_panel;
mod screen_manager;
mod view_state;

pub use crt::*;
pub use function_bar::*;
pub use keys::*;
pub use main_panel::*;
pub use screen_manager::*;
pub use view_state::*;
