//! Platform-specific process table access
//!
//! The snapshot command is the BSD-style `ps` found on both Linux and macOS.
//! Header suppression (`=` in the format spec) keeps the output to bare data
//! lines in the grammar the core parser consumes.

mod control;
mod snapshot;
mod source;

pub use control::*;
pub use snapshot::*;
pub use source::*;

/// Arguments for the snapshot command, selecting exactly the columns the
/// line parser expects: pid, ppid, cpu%, mem%, status, tty, command.
#[cfg(target_os = "macos")]
pub fn ps_args() -> &'static [&'static str] {
    &["-axo", "pid=,ppid=,pcpu=,pmem=,stat=,tty=,args="]
}

#[cfg(not(target_os = "macos"))]
pub fn ps_args() -> &'static [&'static str] {
    &["axo", "pid=,ppid=,pcpu=,pmem=,stat=,tty=,args="]
}
