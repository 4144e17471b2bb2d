// Logging setup. The terminal belongs to the UI, so events go to a file.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

pub const DEFAULT_LOG_FILE: &str = "cypher-desktop.log";

/// Default log location: the system temp directory
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_LOG_FILE)
}

/// Install a global `fmt` subscriber appending to `path`.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed (tests, embedding); keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(())
}
