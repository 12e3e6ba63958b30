//! Server error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors reading or writing the response cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("no cache directory available")]
    NoCacheDir,

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// A notification could not be shown.
#[derive(Debug, Error)]
#[error("notification failed: {message}")]
pub struct NotifyError {
    message: String,
}

impl NotifyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
