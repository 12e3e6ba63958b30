//! Prayer types.
//!
//! This module provides the core types for representing prayer times:
//! - [`Prayer`]: The fixed, ordered set of daily prayers (plus sunrise)
//! - [`PrayerEvent`]: One prayer resolved to an absolute instant

use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// A named daily prayer time.
///
/// The variant order is the canonical display order and never changes at
/// runtime. `Sunrise` is not a prayer but is reported by every time table
/// and shown alongside the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// All prayers in canonical order.
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Returns the name used both for display and as the key in a time table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Sunrise => "Sunrise",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prayer occurrence resolved to a specific date and timezone.
///
/// Events are rebuilt from a fresh payload on every refresh and never mutated.
/// The offset stored in `instant` is the one in effect at that instant in the
/// payload's timezone, so formatting it yields the local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrayerEvent {
    /// Which prayer this is.
    pub prayer: Prayer,
    /// When it happens.
    pub instant: DateTime<FixedOffset>,
}

impl PrayerEvent {
    /// Creates a new event.
    pub fn new(prayer: Prayer, instant: DateTime<FixedOffset>) -> Self {
        Self { prayer, instant }
    }

    /// Returns the instant in UTC, for comparisons against a reference time.
    pub fn utc(&self) -> DateTime<Utc> {
        self.instant.with_timezone(&Utc)
    }

    /// Returns true if the event is strictly before `now`.
    pub fn has_passed(&self, now: DateTime<Utc>) -> bool {
        self.utc() < now
    }
}
