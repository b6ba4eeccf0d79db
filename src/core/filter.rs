//! Free-text filter over process records
//!
//! Case-insensitive substring match against the command line, the decimal
//! pid, or the human state label. An empty query matches everything.

use super::record::ProcessRecord;

/// Check whether a single record matches the query
pub fn matches(record: &ProcessRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    matches_lowered(record, &query.to_lowercase())
}

/// Match against an already-lowercased query
fn matches_lowered(record: &ProcessRecord, query: &str) -> bool {
    record.cmdline.to_lowercase().contains(query)
        || record.pid.to_string().contains(query)
        || record.state_label().to_lowercase().contains(query)
}

/// Reduce a record set to those matching the query, preserving order. The
/// query is lowercased once, not per record.
pub fn filter_records(records: Vec<ProcessRecord>, query: &str) -> Vec<ProcessRecord> {
    if query.is_empty() {
        return records;
    }
    let query = query.to_lowercase();
    records
        .into_iter()
        .filter(|r| matches_lowered(r, &query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pid: i32, state: &str, cmd: &str) -> ProcessRecord {
        ProcessRecord {
            pid,
            ppid: 1,
            percent_cpu: 0.0,
            percent_mem: 0.0,
            state: state.to_string(),
            tty: "??".to_string(),
            cmdline: cmd.to_string(),
        }
    }

    #[test]
    fn test_empty_query_is_identity() {
        let records = vec![rec(1, "S", "/a"), rec(2, "R", "/b")];
        let out = filter_records(records.clone(), "");
        assert_eq!(out, records);
    }

    #[test]
    fn test_command_substring_scenario() {
        let records = vec![rec(10, "Ss", "/usr/sbin/syslogd"), rec(20, "S", "/bin/zsh")];
        let out = filter_records(records, "sys");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].cmdline, "/usr/sbin/syslogd");
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let records = vec![rec(10, "S", "/usr/sbin/SyslogD")];
        assert!(matches(&records[0], "sYsLoG"));
        assert_eq!(filter_records(records, "sYsLoG").len(), 1);
    }

    #[test]
    fn test_matches_pid_digits() {
        let records = vec![rec(4231, "S", "/a"), rec(99, "S", "/b")];
        let out = filter_records(records, "423");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].pid, 4231);
    }

    #[test]
    fn test_matches_state_label_not_raw_code() {
        // "Z" maps to the label "Zombie"; query matches the label
        let records = vec![rec(1, "Z", "/a"), rec(2, "R", "/b")];
        let out = filter_records(records, "zomb");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].pid, 1);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = vec![
            rec(1, "S", "/usr/sbin/syslogd"),
            rec(2, "R", "/bin/zsh"),
            rec(3, "I", "/usr/libexec/sysmond"),
        ];
        let once = filter_records(records, "sys");
        let twice = filter_records(once.clone(), "sys");
        assert_eq!(once, twice);
    }
}
