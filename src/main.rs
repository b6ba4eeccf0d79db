//! bgtop - an interactive dashboard for background processes
//!
//! Polls the OS process table through `ps`, keeps the processes running
//! detached from a terminal, and presents them as a live sortable and
//! filterable table with kill, terminate, and restart actions behind a
//! confirmation gate.

mod core;
mod platform;
mod ui;

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use clap::Parser;

use crate::core::{ColorScheme, Settings};
use crate::ui::{Crt, ScreenManager};

/// Cleared by SIGINT/SIGTERM; the event loop exits at the next iteration
static RUNNING: AtomicBool = AtomicBool::new(true);

extern "C" fn request_shutdown(_sig: libc::c_int) {
    RUNNING.store(false, Ordering::SeqCst);
}

fn setup_signal_handlers() {
    unsafe {
        libc::signal(
            libc::SIGINT,
            request_shutdown as *const () as libc::sighandler_t,
        );
        libc::signal(
            libc::SIGTERM,
            request_shutdown as *const () as libc::sighandler_t,
        );
    }
}

#[derive(Parser, Debug)]
#[command(name = "bgtop", version, about = "Interactive dashboard for background processes")]
struct Args {
    /// Delay between updates, in tenths of seconds
    #[arg(short = 'd', long = "delay", value_name = "DELAY")]
    delay: Option<u32>,

    /// Start with the given filter text already applied
    #[arg(short = 'F', long = "filter", value_name = "FILTER")]
    filter: Option<String>,

    /// Use a monochrome color scheme
    #[arg(short = 'C', long = "no-color")]
    no_color: bool,

    /// Exit after this many refresh cycles
    #[arg(short = 'n', long = "max-iterations", value_name = "NUMBER")]
    max_iterations: Option<i64>,

    /// Disable the kill, terminate, and restart actions
    #[arg(long = "readonly")]
    readonly: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_signal_handlers();

    let mut settings = Settings::new();
    if let Some(delay) = args.delay {
        settings.delay = delay.clamp(1, 100);
    }
    settings.filter = args.filter;
    if args.no_color {
        settings.color_scheme = ColorScheme::Monochrome;
    }
    if let Some(n) = args.max_iterations {
        settings.max_iterations = n;
    }
    settings.readonly = args.readonly;

    let mut crt = Crt::new(settings.color_scheme)?;
    let mut screen_manager = ScreenManager::new(settings);
    screen_manager.run(&mut crt, &RUNNING);
    crt.done();

    Ok(())
}
