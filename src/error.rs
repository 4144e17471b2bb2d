//! Error types for the desktop.

use std::path::PathBuf;

/// Result type alias for desktop operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while setting up or running the desktop.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file could not be read or created.
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for `DesktopConfig`.
    #[error("Invalid config '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Terminal setup, drawing or event polling failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse error.
    pub fn config(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Config {
            path: path.into(),
            source,
        }
    }
}
