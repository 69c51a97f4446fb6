//! Tracing setup.
//!
//! The scene owns the terminal in raw alternate-screen mode, so log lines on
//! stderr would land in the middle of a frame. Logging is therefore opt-in and
//! always goes to a file.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install a global subscriber writing to `path`, filtered by `RUST_LOG`
/// (default `info`).
///
/// Returns `Ok(false)` if a subscriber was already installed.
pub fn init_file(path: impl AsRef<Path>) -> io::Result<bool> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_thread_names(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok();
    Ok(installed)
}

/// Install file logging when a path is configured; otherwise do nothing.
pub fn init(log_path: Option<&str>) -> io::Result<bool> {
    match log_path {
        Some(path) => init_file(path),
        None => Ok(false),
    }
}
