//! Timezone resolution and payload parsing.
//!
//! [`parse_times`] turns the raw time-of-day strings of a [`TimingsData`] into
//! [`PrayerEvent`]s at absolute instants. Problems with a single row are
//! logged and that row is skipped; problems with the timezone fall back to the
//! system zone. Parsing a payload therefore never fails as a whole, it can
//! only come back empty.

use std::fmt;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;
use tracing::debug;

use crate::payload::TimingsData;
use crate::prayer::{Prayer, PrayerEvent};

/// Day-month-year format used by time-table dates.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Errors for a single time-table row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The time string was empty.
    #[error("empty time string")]
    EmptyTime,
    /// The time token is not `HH:MM`.
    #[error("invalid time of day: {0:?}")]
    InvalidTime(String),
    /// The date string is not day-month-year.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),
    /// The wall-clock time is skipped by a DST transition in the zone.
    #[error("{time} does not exist in {zone}")]
    NonexistentLocalTime { time: NaiveDateTime, zone: String },
}

/// Errors resolving a timezone name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneError {
    /// No timezone name was given.
    #[error("no timezone name")]
    Empty,
    /// The name is not a known IANA timezone.
    #[error("unknown timezone: {0}")]
    Unknown(String),
}

/// The timezone prayer times are resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// A named IANA zone, typically the one reported by the payload.
    Named(Tz),
    /// The system's local zone.
    Local,
}

impl Zone {
    /// Looks up an IANA timezone by name.
    pub fn from_name(name: &str) -> Result<Self, ZoneError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ZoneError::Empty);
        }
        name.parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| ZoneError::Unknown(name.to_string()))
    }

    /// Looks up a timezone by name, falling back to the local zone.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|e| {
            debug!(tz = name, error = %e, "Falling back to local timezone");
            Self::Local
        })
    }

    /// Resolves the timezone a payload reports.
    pub fn from_payload(data: &TimingsData) -> Self {
        Self::resolve(&data.meta.timezone)
    }

    /// Returns the calendar date of `now` in this zone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Named(tz) => now.with_timezone(tz).date_naive(),
            Self::Local => now.with_timezone(&Local).date_naive(),
        }
    }

    /// Attaches this zone to a wall-clock time.
    ///
    /// Ambiguous times (DST fall-back) resolve to the earlier instant; times
    /// inside a DST gap return `None`.
    pub fn localize(&self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Named(tz) => tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.fixed_offset()),
            Self::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.fixed_offset()),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(tz) => f.write_str(tz.name()),
            Self::Local => f.write_str("local"),
        }
    }
}

/// Extracts the time of day from a raw time-table value.
///
/// Only the first whitespace-separated token is used and any parenthesized
/// suffix is dropped, so `"12:30 (+03)"` and `"12:30(+03)"` both give 12:30.
/// Anything after the minutes, such as seconds, is ignored.
pub fn parse_time_token(raw: &str) -> Result<NaiveTime, ParseError> {
    let token = raw.split_whitespace().next().ok_or(ParseError::EmptyTime)?;
    let token = match token.find('(') {
        Some(i) => token[..i].trim(),
        None => token,
    };
    let invalid = || ParseError::InvalidTime(raw.to_string());

    let mut parts = token.split(':');
    let (Some(hour), Some(minute)) = (parts.next(), parts.next()) else {
        return Err(invalid());
    };
    NaiveTime::parse_from_str(&format!("{hour}:{minute}"), "%H:%M").map_err(|_| invalid())
}

/// Parses a day-month-year date such as `"15-06-2024"`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(raw.to_string()))
}

/// Builds the prayer events of a payload, sorted by instant.
///
/// Rows are combined with the payload's Gregorian date in `zone`. When that
/// date is missing or malformed, the date of `now` in `zone` is used instead.
/// Missing and malformed rows are skipped.
pub fn parse_times(data: &TimingsData, zone: Zone, now: DateTime<Utc>) -> Vec<PrayerEvent> {
    let raw_date = &data.date.gregorian.date;
    let date = parse_date(raw_date).unwrap_or_else(|e| {
        if !raw_date.is_empty() {
            debug!(error = %e, "Using today's date for time table");
        }
        zone.today(now)
    });

    let mut events: Vec<PrayerEvent> = Prayer::ALL
        .iter()
        .filter_map(|&prayer| {
            let raw = data.timings.get(prayer.as_str())?;
            match resolve_row(raw, date, zone) {
                Ok(instant) => Some(PrayerEvent::new(prayer, instant)),
                Err(e) => {
                    debug!(prayer = %prayer, error = %e, "Skipping prayer time");
                    None
                }
            }
        })
        .collect();

    events.sort_by_key(PrayerEvent::utc);
    events
}

fn resolve_row(raw: &str, date: NaiveDate, zone: Zone) -> Result<DateTime<FixedOffset>, ParseError> {
    let time = parse_time_token(raw)?;
    let naive = date.and_time(time);
    zone.localize(naive)
        .ok_or_else(|| ParseError::NonexistentLocalTime {
            time: naive,
            zone: zone.to_string(),
        })
}
