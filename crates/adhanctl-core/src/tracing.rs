//! Logging setup shared by the CLI and the daemon.
//!
//! Logs always go to stderr: stdout carries command output, and the status
//! line command in particular must print exactly one record there.
//!
//! ```ignore
//! use adhanctl_core::tracing::{init_tracing, TracingConfig};
//!
//! init_tracing(TracingConfig::cli())?;
//! ```

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Crates whose events pass the default filter.
const CRATES: [&str; 5] = [
    "adhanctl",
    "adhanctl_core",
    "adhanctl_providers",
    "adhanctl_server",
    "adhanctl_client",
];

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to set global subscriber
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// Failed to parse env filter directive
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// Single-line human-readable output
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

/// Configuration for tracing initialization
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level applied to the adhanctl crates when `RUST_LOG` is not set
    pub default_level: Level,
    pub output_format: TracingOutputFormat,
    /// Include file and line of the call site
    pub include_location: bool,
    pub include_target: bool,
    pub include_timestamp: bool,
    /// Explicit filter directive, used instead of `RUST_LOG` and `default_level`
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::cli()
    }
}

impl TracingConfig {
    /// Warnings only, no timestamps. Used by the one-shot commands.
    #[must_use]
    pub fn cli() -> Self {
        Self {
            default_level: Level::WARN,
            output_format: TracingOutputFormat::Compact,
            include_location: false,
            include_target: false,
            include_timestamp: false,
            env_filter: None,
        }
    }

    /// Debug level with call sites, for `--verbose`.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_location: true,
            include_target: true,
            ..Self::cli()
        }
    }

    /// Info level with timestamps, for the long-running daemon.
    #[must_use]
    pub fn daemon() -> Self {
        Self {
            default_level: Level::INFO,
            output_format: TracingOutputFormat::Compact,
            include_location: false,
            include_target: true,
            include_timestamp: true,
            env_filter: None,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Returns the filter directive used when neither `env_filter` nor
    /// `RUST_LOG` is set.
    pub fn default_directive(&self) -> String {
        let level = self.default_level.as_str().to_ascii_lowercase();
        CRATES
            .iter()
            .map(|krate| format!("{krate}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Initialize tracing with the given configuration.
///
/// Call once at startup. `RUST_LOG` overrides the configured level.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set or the filter
/// directive is invalid.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let env_filter = match config.env_filter {
        Some(ref filter) => EnvFilter::try_new(filter)?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(config.default_directive()))?,
    };

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_target(config.include_target);

    let layer = match (config.output_format, config.include_timestamp) {
        (TracingOutputFormat::Json, _) => layer.json().boxed(),
        (TracingOutputFormat::Compact, true) => layer.compact().boxed(),
        (TracingOutputFormat::Compact, false) => layer.compact().without_time().boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(env_filter).with(layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_quiet() {
        let config = TracingConfig::cli();
        assert_eq!(config.default_level, Level::WARN);
        assert_eq!(config.output_format, TracingOutputFormat::Compact);
        assert!(!config.include_timestamp);
        assert!(config.env_filter.is_none());
    }

    #[test]
    fn cli_debug_adds_call_sites() {
        let config = TracingConfig::cli_debug();
        assert_eq!(config.default_level, Level::DEBUG);
        assert!(config.include_location);
        assert!(!config.include_timestamp);
    }

    #[test]
    fn daemon_has_timestamps() {
        let config = TracingConfig::daemon();
        assert_eq!(config.default_level, Level::INFO);
        assert!(config.include_timestamp);
    }

    #[test]
    fn directive_covers_every_crate() {
        let directive = TracingConfig::cli_debug().default_directive();
        assert_eq!(
            directive,
            "adhanctl=debug,adhanctl_core=debug,adhanctl_providers=debug,adhanctl_server=debug,adhanctl_client=debug"
        );
        assert!(EnvFilter::try_new(directive).is_ok());
    }

    #[test]
    fn builder_methods() {
        let config = TracingConfig::default()
            .with_level(Level::TRACE)
            .with_format(TracingOutputFormat::Json)
            .with_env_filter("adhanctl_server=trace");

        assert_eq!(config.default_level, Level::TRACE);
        assert_eq!(config.output_format, TracingOutputFormat::Json);
        assert_eq!(config.env_filter.as_deref(), Some("adhanctl_server=trace"));
    }
}
