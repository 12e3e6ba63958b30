//! TimingsProvider trait and implementations.
//!
//! This crate provides the time-table collaborator used by the CLI and the
//! daemon:
//!
//! - [`TimingsProvider`] - The trait every time-table source implements
//! - [`AlAdhanClient`] - HTTP client for the AlAdhan API, with retry/backoff
//! - [`ProviderError`] - Transport and upstream error taxonomy
//! - [`CALCULATION_METHODS`] / [`SCHOOLS`] - Id tables for configuration
//!
//! # Example
//!
//! ```ignore
//! use adhanctl_providers::{AlAdhanClient, Location, TimingsProvider, TimingsQuery};
//!
//! let client = AlAdhanClient::new()?;
//! let query = TimingsQuery::new(Location::city("London", "UK"), today);
//! let response = client.fetch(query).await?;
//! ```

pub mod aladhan;
pub mod error;
pub mod methods;
pub mod provider;
pub mod retry;

pub use aladhan::{AlAdhanClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, decode_body};
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use methods::{CALCULATION_METHODS, SCHOOLS, method_name, school_name};
pub use provider::{BoxFuture, DEFAULT_METHOD, Location, TimingsProvider, TimingsQuery};
pub use retry::{RetryPolicy, retry};
