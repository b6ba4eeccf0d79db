//! Sort engine for process records
//!
//! Ordering is deterministic: the field comparator is chained with an
//! ascending-pid tiebreak before the direction is applied, so sorting
//! descending yields the exact reverse of sorting ascending.

use std::cmp::Ordering;

use super::record::ProcessRecord;

/// Sortable columns, in cycling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Pid,
    Cpu,
    Mem,
    State,
    Command,
}

/// Fixed cycling sequence for the sort key
const CYCLE: [SortField; 5] = [
    SortField::Pid,
    SortField::Cpu,
    SortField::Mem,
    SortField::State,
    SortField::Command,
];

impl SortField {
    /// Advance to the next field, wrapping around
    pub fn next(self) -> SortField {
        let i = CYCLE.iter().position(|f| *f == self).unwrap_or(0);
        CYCLE[(i + 1) % CYCLE.len()]
    }

    /// Direction forced when cycling lands on this field: identifiers sort
    /// lowest-first, load columns highest-first
    pub fn default_ascending(self) -> bool {
        matches!(self, SortField::Pid | SortField::Command)
    }

    /// Column header title
    pub fn title(self) -> &'static str {
        match self {
            SortField::Pid => "PID",
            SortField::Cpu => "CPU%",
            SortField::Mem => "MEM%",
            SortField::State => "STATE",
            SortField::Command => "Command",
        }
    }
}

impl Default for SortField {
    fn default() -> Self {
        SortField::Cpu
    }
}

/// Compare two records by a single field (natural, ascending order)
fn compare_by_field(a: &ProcessRecord, b: &ProcessRecord, field: SortField) -> Ordering {
    match field {
        SortField::Pid => a.pid.cmp(&b.pid),
        SortField::Cpu => a
            .percent_cpu
            .partial_cmp(&b.percent_cpu)
            .unwrap_or(Ordering::Equal),
        SortField::Mem => a
            .percent_mem
            .partial_cmp(&b.percent_mem)
            .unwrap_or(Ordering::Equal),
        SortField::State => a.state.cmp(&b.state),
        SortField::Command => a.cmdline.cmp(&b.cmdline),
    }
}

/// Sort records by the given field and direction
pub fn sort_records(records: &mut [ProcessRecord], field: SortField, ascending: bool) {
    records.sort_by(|a, b| {
        let cmp = compare_by_field(a, b, field).then_with(|| a.pid.cmp(&b.pid));
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pid: i32, cpu: f32, mem: f32, state: &str, cmd: &str) -> ProcessRecord {
        ProcessRecord {
            pid,
            ppid: 1,
            percent_cpu: cpu,
            percent_mem: mem,
            state: state.to_string(),
            tty: "??".to_string(),
            cmdline: cmd.to_string(),
        }
    }

    fn sample() -> Vec<ProcessRecord> {
        vec![
            rec(1, 5.0, 2.0, "Ss", "/sbin/launchd"),
            rec(2, 50.0, 1.0, "R", "/usr/sbin/syslogd"),
            rec(3, 20.0, 3.0, "I", "/usr/libexec/kextd"),
        ]
    }

    #[test]
    fn test_cpu_descending_scenario() {
        let mut records = sample();
        sort_records(&mut records, SortField::Cpu, false);
        let pids: Vec<i32> = records.iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![2, 3, 1]);
    }

    #[test]
    fn test_descending_is_exact_reverse_of_ascending() {
        for field in [
            SortField::Pid,
            SortField::Cpu,
            SortField::Mem,
            SortField::State,
            SortField::Command,
        ] {
            let mut asc = sample();
            sort_records(&mut asc, field, true);
            let mut desc = asc.clone();
            sort_records(&mut desc, field, false);
            asc.reverse();
            assert_eq!(asc, desc, "field {:?}", field);
        }
    }

    #[test]
    fn test_ties_resolved_by_pid() {
        let mut records = vec![
            rec(9, 1.0, 1.0, "S", "same"),
            rec(3, 1.0, 1.0, "S", "same"),
            rec(6, 1.0, 1.0, "S", "same"),
        ];
        sort_records(&mut records, SortField::Cpu, true);
        let pids: Vec<i32> = records.iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![3, 6, 9]);

        sort_records(&mut records, SortField::Cpu, false);
        let pids: Vec<i32> = records.iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![9, 6, 3]);
    }

    #[test]
    fn test_cycle_order_wraps() {
        let mut field = SortField::Pid;
        let mut seen = vec![field];
        for _ in 0..5 {
            field = field.next();
            seen.push(field);
        }
        assert_eq!(
            seen,
            vec![
                SortField::Pid,
                SortField::Cpu,
                SortField::Mem,
                SortField::State,
                SortField::Command,
                SortField::Pid,
            ]
        );
    }

    #[test]
    fn test_forced_direction_on_cycle() {
        assert!(SortField::Pid.default_ascending());
        assert!(SortField::Command.default_ascending());
        assert!(!SortField::Cpu.default_ascending());
        assert!(!SortField::Mem.default_ascending());
        assert!(!SortField::State.default_ascending());
    }
}
