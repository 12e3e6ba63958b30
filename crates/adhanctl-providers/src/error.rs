//! Error types for time-table provider operations.

use std::fmt;
use thiserror::Error;

/// The category of a provider error.
///
/// Codes split into transport failures (the request never produced a
/// response) and upstream failures (the provider answered, but not with a
/// usable time table). They also decide whether a retry may help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// Connection failed, timed out, DNS resolution failed, etc.
    Transport,
    /// HTTP 429.
    RateLimited,
    /// HTTP 5xx.
    ServerError,
    /// Any other non-success HTTP status.
    BadRequest,
    /// The body could not be decoded as a time table.
    InvalidResponse,
    /// The body decoded but reported a non-200 code.
    ApiError,
    /// The query or client could not be built.
    ConfigurationError,
}

impl ProviderErrorCode {
    /// Returns true if this error is transient and the operation may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport | Self::RateLimited | Self::ServerError)
    }

    /// Returns true if the request failed before any response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport)
    }

    /// Returns true if the provider answered with something unusable.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::RateLimited
                | Self::ServerError
                | Self::BadRequest
                | Self::InvalidResponse
                | Self::ApiError
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport_error",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::BadRequest => "bad_request",
            Self::InvalidResponse => "invalid_response",
            Self::ApiError => "api_error",
            Self::ConfigurationError => "configuration_error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while fetching a time table.
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    /// HTTP status, when the provider answered.
    status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Transport, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::RateLimited, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ServerError, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::BadRequest, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ApiError, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = format!("status {}: {}", status, body.trim());
        let err = match status {
            429 => Self::rate_limited(message),
            500..=599 => Self::server(message),
            _ => Self::bad_request(message),
        };
        err.with_status(status)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    pub fn is_transport(&self) -> bool {
        self.code.is_transport()
    }

    pub fn is_upstream(&self) -> bool {
        self.code.is_upstream()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            "request timed out".to_string()
        } else if e.is_connect() {
            "connection failed".to_string()
        } else if e.is_builder() {
            return Self::configuration(format!("building request: {e}")).with_source(e);
        } else {
            format!("request failed: {e}")
        };
        Self::transport(message).with_source(e)
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_retryable() {
        assert!(ProviderErrorCode::Transport.is_retryable());
        assert!(ProviderErrorCode::RateLimited.is_retryable());
        assert!(ProviderErrorCode::ServerError.is_retryable());
        assert!(!ProviderErrorCode::BadRequest.is_retryable());
        assert!(!ProviderErrorCode::InvalidResponse.is_retryable());
        assert!(!ProviderErrorCode::ApiError.is_retryable());
        assert!(!ProviderErrorCode::ConfigurationError.is_retryable());
    }

    #[test]
    fn transport_and_upstream_are_disjoint() {
        let codes = [
            ProviderErrorCode::Transport,
            ProviderErrorCode::RateLimited,
            ProviderErrorCode::ServerError,
            ProviderErrorCode::BadRequest,
            ProviderErrorCode::InvalidResponse,
            ProviderErrorCode::ApiError,
            ProviderErrorCode::ConfigurationError,
        ];
        for code in codes {
            assert!(!(code.is_transport() && code.is_upstream()), "{code}");
        }
        assert!(ProviderErrorCode::Transport.is_transport());
        assert!(ProviderErrorCode::ApiError.is_upstream());
    }

    #[test]
    fn status_classification() {
        assert_eq!(
            ProviderError::from_status(429, "slow down").code(),
            ProviderErrorCode::RateLimited
        );
        assert_eq!(
            ProviderError::from_status(503, "").code(),
            ProviderErrorCode::ServerError
        );
        let err = ProviderError::from_status(400, "Invalid date\n");
        assert_eq!(err.code(), ProviderErrorCode::BadRequest);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "bad_request: status 400: Invalid date");
    }

    #[test]
    fn error_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ProviderError::transport("connection failed").with_source(io_err);

        assert!(std::error::Error::source(&err).is_some());
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "transport_error: connection failed");
    }
}
