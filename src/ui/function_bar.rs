//! FunctionBar - key/label hints at the bottom of the screen
//!
//! Keys use the FUNCTION_KEY attribute, labels the FUNCTION_BAR attribute,
//! drawn as consecutive pairs with no padding between them.

use ncurses::A_NORMAL;

use super::crt::ColorElement;
use super::Crt;

/// Default key hints for the process view
const DEFAULT_FUNCTIONS: [(&str, &str); 7] = [
    ("/", "Filter "),
    ("s", "Sort  "),
    ("I", "Invert "),
    ("x", "Kill  "),
    ("t", "Term  "),
    ("r", "Restart "),
    ("q", "Quit  "),
];

/// Function bar at the bottom of the screen
#[derive(Debug, Clone)]
pub struct FunctionBar {
    functions: Vec<(String, String)>,
}

impl FunctionBar {
    pub fn new() -> Self {
        FunctionBar {
            functions: DEFAULT_FUNCTIONS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Draw the bar and return the ending x position, so callers can append
    /// extra content (like the status area) after the key hints
    pub fn draw_return_x(&self, crt: &Crt, y: i32) -> i32 {
        let width = crt.width();
        let bar_color = crt.color(ColorElement::FunctionBar);
        let key_color = crt.color(ColorElement::FunctionKey);

        // Fill the entire line with the bar color first
        crt.attrset(bar_color);
        crt.hline(y, 0, ' ' as u32, width);

        let mut x = 0i32;
        crt.mv(y, 0);
        for (key, label) in &self.functions {
            if x >= width {
                break;
            }
            crt.attrset(key_color);
            crt.addstr_raw(key);
            x += key.len() as i32;

            crt.attrset(bar_color);
            crt.addstr_raw(label);
            x += label.len() as i32;
        }
        crt.attrset(A_NORMAL);
        x
    }
}

impl Default for FunctionBar {
    fn default() -> Self {
        FunctionBar::new()
    }
}
