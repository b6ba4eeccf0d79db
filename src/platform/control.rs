//! Signal delivery and detached respawn
//!
//! Both operations are fire-and-forget: callers drop the Result and rely on
//! the next refresh to show whatever actually happened.

use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use thiserror::Error;

/// Grace period between SIGTERM and the relaunch during a restart
const RESTART_GRACE: Duration = Duration::from_millis(500);

/// The two signals this dashboard delivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// Immediate termination (SIGKILL)
    Kill,
    /// Graceful termination (SIGTERM)
    Terminate,
}

impl SignalKind {
    fn as_signal(self) -> Signal {
        match self {
            SignalKind::Kill => Signal::SIGKILL,
            SignalKind::Terminate => Signal::SIGTERM,
        }
    }
}

/// Why a signal or spawn call itself failed
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("signal delivery failed: {0}")]
    Signal(#[from] nix::Error),

    #[error("spawn failed: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Deliver a termination signal to the target pid
pub fn send_signal(pid: i32, kind: SignalKind) -> Result<(), ActionError> {
    signal::kill(Pid::from_raw(pid), kind.as_signal())?;
    Ok(())
}

/// Launch a command line through a shell as a detached background child:
/// own process group, no inherited stdio, not tied to the dashboard.
pub fn spawn_detached(cmdline: &str) -> Result<(), ActionError> {
    Command::new("sh")
        .arg("-c")
        .arg(cmdline)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .process_group(0)
        .spawn()?;
    Ok(())
}

/// Best-effort restart: graceful termination, a short grace period for the
/// OS to reclaim resources, then relaunch of the captured command line. Runs
/// on a worker thread so the event loop stays responsive; failures in either
/// step are swallowed and the relaunch is never verified.
pub fn restart(pid: i32, cmdline: String) {
    thread::spawn(move || {
        let _ = send_signal(pid, SignalKind::Terminate);
        thread::sleep(RESTART_GRACE);
        let _ = spawn_detached(&cmdline);
    });
}
