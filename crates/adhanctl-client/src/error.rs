//! Client error types.

use std::io;
use std::path::PathBuf;

use adhanctl_providers::ProviderError;
use adhanctl_server::NotifyError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration file could not be read, parsed or written.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Neither coordinates nor city and country are configured.
    #[error(
        "no location provided: use --city/--country or --lat/--lon, or run 'adhanctl config init'"
    )]
    NoLocation,

    /// Time table could not be fetched.
    #[error("error fetching timings: {0}")]
    Fetch(#[from] ProviderError),

    /// Every prayer of the day has passed.
    #[error("no upcoming prayer found")]
    NoUpcoming,

    #[error(transparent)]
    Notify(#[from] NotifyError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors loading or saving `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A value is out of range.
    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}
