//! Snapshot acquisition from the external process-listing command
//!
//! A failed snapshot is reported as [`SourceError`] and treated by the view
//! as "no change this cycle"; the previous display is retained.

use std::process::Command;

use thiserror::Error;

use crate::core::{parse_line, ProcessRecord, NO_TTY};

/// Why a snapshot could not be taken
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to run ps: {0}")]
    Io(#[from] std::io::Error),

    #[error("ps exited with {0}")]
    Failed(std::process::ExitStatus),

    #[error("ps produced invalid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

pub type SourceResult = Result<Vec<ProcessRecord>, SourceError>;

/// Take one full snapshot of the process table
pub fn snapshot() -> SourceResult {
    let output = Command::new("ps").args(super::ps_args()).output()?;
    if !output.status.success() {
        return Err(SourceError::Failed(output.status));
    }
    let text = String::from_utf8(output.stdout)?;
    Ok(parse_snapshot(&text, std::process::id() as i32))
}

/// Parse raw `ps` output into the kept record set: unparseable lines are
/// skipped, the dashboard's own pid is excluded, and the background-process
/// policy is applied.
pub fn parse_snapshot(text: &str, self_pid: i32) -> Vec<ProcessRecord> {
    text.lines()
        .filter_map(parse_line)
        .map(normalize_tty)
        .filter(|r| r.pid != self_pid && r.is_background())
        .collect()
}

/// Linux `ps` prints "?" for a missing controlling terminal where the BSD
/// one prints "??"; normalize so the core policy sees one sentinel.
fn normalize_tty(mut record: ProcessRecord) -> ProcessRecord {
    if record.tty == "?" {
        record.tty = NO_TTY.to_string();
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
    1     0   0.1  0.4 Ss   ??  /sbin/launchd
  312     1  12.5  0.8 Ss   ??  /usr/sbin/syslogd -s
  501     1   0.0  0.2 R+   ttys001  /bin/zsh -il
  777     1   3.0  0.5 S    ttys002  /usr/local/bin/worker --daemon
garbage line that will not parse
";

    #[test]
    fn test_parse_snapshot_applies_policy_and_skips_garbage() {
        let records = parse_snapshot(SAMPLE, 9999);
        let pids: Vec<i32> = records.iter().map(|r| r.pid).collect();
        // 501 is foreground on a tty: dropped; garbage: skipped
        assert_eq!(pids, vec![1, 312, 777]);
    }

    #[test]
    fn test_parse_snapshot_excludes_self_pid() {
        let records = parse_snapshot(SAMPLE, 312);
        assert!(records.iter().all(|r| r.pid != 312));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_linux_tty_sentinel_normalized() {
        let records = parse_snapshot("55 1 0.0 0.0 S ? /usr/sbin/cron", 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tty, NO_TTY);
        assert!(records[0].is_background());
    }
}
