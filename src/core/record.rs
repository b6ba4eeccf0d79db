//! Process records sampled from the system process table
//!
//! This module contains the ProcessRecord struct, the parser that turns one
//! line of `ps` output into a record, and the background-process keep policy.

use std::fmt;

/// Sentinel printed by `ps` when a process has no controlling terminal
pub const NO_TTY: &str = "??";

/// Process state derived from the first character of the raw status token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessState {
    Running,
    Sleeping,
    Idle,
    Stopped,
    Waiting,
    Zombie,
    Paging,
    Dead,
    Unknown,
}

impl ProcessState {
    /// Classify a raw status token (e.g. "R", "Ss", "Z") by its first character
    pub fn from_code(code: &str) -> ProcessState {
        match code.chars().next() {
            Some('R') => ProcessState::Running,
            Some('S') | Some('s') => ProcessState::Sleeping,
            Some('I') => ProcessState::Idle,
            Some('T') | Some('t') => ProcessState::Stopped,
            Some('D') | Some('U') => ProcessState::Waiting,
            Some('Z') => ProcessState::Zombie,
            Some('W') => ProcessState::Paging,
            Some('X') => ProcessState::Dead,
            _ => ProcessState::Unknown,
        }
    }

    /// Human-readable label shown in the state column and matched by the filter
    pub fn label(self) -> &'static str {
        match self {
            ProcessState::Running => "Running",
            ProcessState::Sleeping => "Sleeping",
            ProcessState::Idle => "Idle",
            ProcessState::Stopped => "Stopped",
            ProcessState::Waiting => "Waiting",
            ProcessState::Zombie => "Zombie",
            ProcessState::Paging => "Paging",
            ProcessState::Dead => "Dead",
            ProcessState::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One sampled process. A full set of records is replaced wholesale on every
/// refresh; records are never mutated after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRecord {
    pub pid: i32,
    pub ppid: i32,
    pub percent_cpu: f32,
    pub percent_mem: f32,
    /// Raw status token as printed by `ps` (e.g. "R", "Ss", "Z")
    pub state: String,
    /// Controlling terminal, [`NO_TTY`] when there is none
    pub tty: String,
    pub cmdline: String,
}

impl ProcessRecord {
    pub fn state_label(&self) -> &'static str {
        ProcessState::from_code(&self.state).label()
    }

    /// Background-process keep policy: no controlling terminal, or a
    /// sleeping/idle status while still attached to one. The rule
    /// deliberately also keeps terminal-less zombies and disk-waiters.
    pub fn is_background(&self) -> bool {
        if self.tty == NO_TTY {
            return true;
        }
        matches!(self.state.chars().next(), Some('S') | Some('s') | Some('I'))
    }
}

/// Split the leading whitespace-delimited token off a line
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(i) => Some((&s[..i], &s[i..])),
        None => Some((s, "")),
    }
}

/// Parse one line of `ps` output into a record.
///
/// The grammar is positional: numeric pid and ppid, decimal cpu% and mem%, a
/// status token, a terminal token, then the command absorbing the rest of the
/// line (embedded spaces included). Header lines, blank lines and anything
/// else that does not match yield `None`; no partial records are returned.
pub fn parse_line(line: &str) -> Option<ProcessRecord> {
    let (pid, rest) = next_token(line)?;
    let pid: i32 = pid.parse().ok()?;
    if pid <= 0 {
        return None;
    }

    let (ppid, rest) = next_token(rest)?;
    let ppid: i32 = ppid.parse().ok()?;

    let (cpu, rest) = next_token(rest)?;
    let percent_cpu: f32 = cpu.parse().ok()?;

    let (mem, rest) = next_token(rest)?;
    let percent_mem: f32 = mem.parse().ok()?;

    if percent_cpu < 0.0 || percent_mem < 0.0 {
        return None;
    }

    let (state, rest) = next_token(rest)?;
    let (tty, rest) = next_token(rest)?;

    let cmdline = rest.trim();
    if cmdline.is_empty() {
        return None;
    }

    Some(ProcessRecord {
        pid,
        ppid,
        percent_cpu,
        percent_mem,
        state: state.to_string(),
        tty: tty.to_string(),
        cmdline: cmdline.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, tty: &str) -> ProcessRecord {
        ProcessRecord {
            pid: 100,
            ppid: 1,
            percent_cpu: 0.0,
            percent_mem: 0.0,
            state: state.to_string(),
            tty: tty.to_string(),
            cmdline: "/usr/sbin/thing".to_string(),
        }
    }

    #[test]
    fn test_parse_round_trip() {
        let line = "  312     1  12.5  0.8 Ss   ??  /usr/sbin/syslogd -s";
        let rec = parse_line(line).unwrap();
        assert_eq!(rec.pid, 312);
        assert_eq!(rec.ppid, 1);
        assert_eq!(rec.percent_cpu, 12.5);
        assert_eq!(rec.percent_mem, 0.8);
        assert_eq!(rec.state, "Ss");
        assert_eq!(rec.tty, "??");
        assert_eq!(rec.cmdline, "/usr/sbin/syslogd -s");
    }

    #[test]
    fn test_parse_keeps_embedded_command_whitespace() {
        let line = "42 1 0.0 0.1 S ?? /usr/libexec/launchd  --flag  with spaces";
        let rec = parse_line(line).unwrap();
        assert_eq!(rec.cmdline, "/usr/libexec/launchd  --flag  with spaces");
    }

    #[test]
    fn test_parse_rejects_header_line() {
        assert!(parse_line("  PID  PPID %CPU %MEM STAT TTY COMMAND").is_none());
    }

    #[test]
    fn test_parse_rejects_blank_and_malformed() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("1234 1 0.0").is_none());
        assert!(parse_line("1234 1 0.0 0.0 S ??").is_none()); // missing command
        assert!(parse_line("abc 1 0.0 0.0 S ?? /bin/x").is_none());
        assert!(parse_line("0 1 0.0 0.0 S ?? /bin/x").is_none()); // pid must be positive
        assert!(parse_line("12 1 -1.0 0.0 S ?? /bin/x").is_none());
    }

    #[test]
    fn test_background_policy_no_tty_always_kept() {
        assert!(record("R", NO_TTY).is_background());
        assert!(record("Z", NO_TTY).is_background());
        assert!(record("D", NO_TTY).is_background());
    }

    #[test]
    fn test_background_policy_sleeping_with_tty_kept() {
        assert!(record("Ss", "ttys001").is_background());
        assert!(record("s", "ttys001").is_background());
        assert!(record("I", "ttys001").is_background());
    }

    #[test]
    fn test_background_policy_foreground_dropped() {
        assert!(!record("R+", "ttys001").is_background());
        assert!(!record("T", "ttys001").is_background());
        assert!(!record("Z", "pts/0").is_background());
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(ProcessState::from_code("R").label(), "Running");
        assert_eq!(ProcessState::from_code("Ss").label(), "Sleeping");
        assert_eq!(ProcessState::from_code("I").label(), "Idle");
        assert_eq!(ProcessState::from_code("Z").label(), "Zombie");
        assert_eq!(ProcessState::from_code("D").label(), "Waiting");
        assert_eq!(ProcessState::from_code("").label(), "Unknown");
    }
}
