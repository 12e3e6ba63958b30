//! TimingsProvider trait definition.
//!
//! A provider turns a [`TimingsQuery`] (where, how, which day) into a raw
//! time-table payload. Retries and backoff are the provider's business;
//! callers see a single result.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use adhanctl_core::TimingsResponse;
use chrono::NaiveDate;

use crate::error::ProviderResult;

/// Calculation method used when none is configured (Muslim World League).
pub const DEFAULT_METHOD: u8 = 3;

/// Where to compute prayer times for.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City { city: String, country: String },
    Coordinates { latitude: f64, longitude: f64 },
}

impl Location {
    pub fn city(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self::City {
            city: city.into(),
            country: country.into(),
        }
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self::Coordinates {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::City { city, country } => write!(f, "{}, {}", city, country),
            Self::Coordinates {
                latitude,
                longitude,
            } => write!(f, "{:.4}, {:.4}", latitude, longitude),
        }
    }
}

/// A request for one day's time table.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingsQuery {
    pub location: Location,
    /// Calculation method id, see [`crate::CALCULATION_METHODS`].
    pub method: u8,
    /// Asr juristic school: 0 Shafi, 1 Hanafi.
    pub school: u8,
    pub date: NaiveDate,
}

impl TimingsQuery {
    /// Creates a query with the default method and school.
    pub fn new(location: Location, date: NaiveDate) -> Self {
        Self {
            location,
            method: DEFAULT_METHOD,
            school: 0,
            date,
        }
    }

    pub fn with_method(mut self, method: u8) -> Self {
        self.method = method;
        self
    }

    pub fn with_school(mut self, school: u8) -> Self {
        self.school = school;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }
}

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so providers can be used as
/// `Arc<dyn TimingsProvider>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A source of time tables.
pub trait TimingsProvider: Send + Sync {
    /// Returns the name of this provider, for logs.
    fn name(&self) -> &str;

    /// Fetches the time table for a query.
    ///
    /// # Errors
    ///
    /// Returns a transport error when no response arrived, or an upstream
    /// error when the response was not a usable time table.
    fn fetch(&self, query: TimingsQuery) -> BoxFuture<'_, ProviderResult<TimingsResponse>>;
}
