//! Process table painter
//!
//! Draws the header row, the visible slice of the displayed list, and the
//! per-row highlighting. Layout is a fixed prefix of numeric columns with
//! the command taking the rest of the line:
//!
//! ```text
//!     PID   PPID  CPU%v MEM% STATE     Command
//!     312      1  12.5  0.8 sleeping  /usr/sbin/syslogd -s
//! ```

use ncurses::{A_BOLD, A_NORMAL};

use crate::core::{ProcessRecord, ProcessState, SortField};

use super::crt::{ColorElement, Crt, SORT_ASC_MARKER, SORT_DESC_MARKER};
use super::view_state::ViewState;

// Column widths for the fixed prefix; each cell is followed by one space
const PID_WIDTH: usize = 7;
const PPID_WIDTH: usize = 7;
const PERCENT_WIDTH: usize = 5;
const STATE_WIDTH: usize = 9;
const PREFIX_WIDTH: usize = PID_WIDTH + PPID_WIDTH + 2 * PERCENT_WIDTH + STATE_WIDTH + 5;

/// Stateless painter for the process table
#[derive(Debug, Default)]
pub struct MainPanel;

impl MainPanel {
    pub fn new() -> Self {
        MainPanel
    }

    /// Number of table rows that fit between the header and the bottom bar
    pub fn viewport_height(crt: &Crt) -> usize {
        (crt.height() - 2).max(0) as usize
    }

    /// Draw the header and all visible rows
    pub fn draw(&self, crt: &Crt, view: &ViewState) {
        self.draw_header(crt, view);

        let viewport = Self::viewport_height(crt);
        let width = crt.width() as usize;
        let selection_attr = crt.color(ColorElement::PanelSelection);

        for slot in 0..viewport {
            let index = view.scroll_v() + slot;
            let y = 1 + slot as i32;
            crt.mv(y, 0);
            match view.displayed().get(index) {
                Some(record) if index == view.selected() => {
                    // Selected row is painted flat in the selection color
                    crt.attrset(selection_attr);
                    let mut line = Self::format_row(record, width);
                    let pad = width.saturating_sub(line.chars().count());
                    line.extend(std::iter::repeat(' ').take(pad));
                    crt.addstr_raw(&line);
                }
                Some(record) => self.draw_row(crt, record, width),
                None => {
                    crt.attrset(crt.color(ColorElement::DefaultColor));
                    crt.hline(y, 0, ' ' as u32, crt.width());
                }
            }
        }
        crt.attrset(A_NORMAL);
    }

    fn draw_header(&self, crt: &Crt, view: &ViewState) {
        let header_attr = crt.color(ColorElement::PanelHeader);
        crt.attrset(header_attr);
        crt.hline(0, 0, ' ' as u32, crt.width());
        crt.mv(0, 0);

        for (field, cell) in Self::header_cells(view) {
            if field == Some(view.sort_field()) {
                crt.attrset(header_attr | A_BOLD);
            } else {
                crt.attrset(header_attr);
            }
            crt.addstr_raw(&cell);
        }
        crt.attrset(A_NORMAL);
    }

    /// Header cells in draw order; the active sort column carries a
    /// direction marker
    fn header_cells(view: &ViewState) -> Vec<(Option<SortField>, String)> {
        let mark = |field: SortField| -> String {
            let title = field.title();
            if view.sort_field() == field {
                let marker = if view.sort_ascending() {
                    SORT_ASC_MARKER
                } else {
                    SORT_DESC_MARKER
                };
                format!("{title}{marker}")
            } else {
                title.to_string()
            }
        };

        vec![
            (Some(SortField::Pid), format!("{:>PID_WIDTH$} ", mark(SortField::Pid))),
            (None, format!("{:>PPID_WIDTH$} ", "PPID")),
            (Some(SortField::Cpu), format!("{:>PERCENT_WIDTH$} ", mark(SortField::Cpu))),
            (Some(SortField::Mem), format!("{:>PERCENT_WIDTH$} ", mark(SortField::Mem))),
            (Some(SortField::State), format!("{:<STATE_WIDTH$} ", mark(SortField::State))),
            (Some(SortField::Command), mark(SortField::Command)),
        ]
    }

    /// Draw one non-selected row with per-cell highlighting
    fn draw_row(&self, crt: &Crt, record: &ProcessRecord, width: usize) {
        let default_attr = crt.color(ColorElement::DefaultColor);

        crt.attrset(default_attr);
        crt.addstr_raw(&format!("{:>PID_WIDTH$} ", record.pid));
        crt.addstr_raw(&format!("{:>PPID_WIDTH$} ", record.ppid));

        crt.attrset(Self::percent_attr(crt, record.percent_cpu));
        crt.addstr_raw(&format!("{:>PERCENT_WIDTH$.1} ", record.percent_cpu));
        crt.attrset(Self::percent_attr(crt, record.percent_mem));
        crt.addstr_raw(&format!("{:>PERCENT_WIDTH$.1} ", record.percent_mem));

        crt.attrset(Self::state_attr(crt, record));
        crt.addstr_raw(&format!("{:<STATE_WIDTH$} ", record.state_label()));

        crt.attrset(default_attr);
        let room = width.saturating_sub(PREFIX_WIDTH);
        let mut command: String = record.cmdline.chars().take(room).collect();
        let pad = room.saturating_sub(command.chars().count());
        command.extend(std::iter::repeat(' ').take(pad));
        crt.addstr_raw(&command);
    }

    /// Whole row as one flat string (used for the selected row)
    fn format_row(record: &ProcessRecord, width: usize) -> String {
        let line = format!(
            "{:>PID_WIDTH$} {:>PPID_WIDTH$} {:>PERCENT_WIDTH$.1} {:>PERCENT_WIDTH$.1} {:<STATE_WIDTH$} {}",
            record.pid,
            record.ppid,
            record.percent_cpu,
            record.percent_mem,
            record.state_label(),
            record.cmdline,
        );
        line.chars().take(width).collect()
    }

    fn percent_attr(crt: &Crt, value: f32) -> ncurses::attr_t {
        if value >= 90.0 {
            crt.color(ColorElement::CriticalLoad)
        } else if value >= 50.0 {
            crt.color(ColorElement::HighLoad)
        } else if value < 0.05 {
            crt.color(ColorElement::Shadow)
        } else {
            crt.color(ColorElement::DefaultColor)
        }
    }

    fn state_attr(crt: &Crt, record: &ProcessRecord) -> ncurses::attr_t {
        match ProcessState::from_code(&record.state) {
            ProcessState::Running => crt.color(ColorElement::RunState),
            ProcessState::Zombie | ProcessState::Waiting => crt.color(ColorElement::DeadState),
            _ => crt.color(ColorElement::DefaultColor),
        }
    }
}
