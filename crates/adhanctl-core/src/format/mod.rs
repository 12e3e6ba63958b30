//! Output formatting for prayer schedules.
//!
//! This module renders a parsed prayer sequence in three shapes:
//! - **Schedule**: the full day, one line per prayer, for the terminal
//! - **Next**: the single next prayer and the time left until it
//! - **Waybar**: a JSON record with `text`, `tooltip` and `class` for status bars
//!
//! Each `format_*` method has an `_at` variant that takes the reference instant
//! explicitly; the plain variants use the current time.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::payload::Hijri;
use crate::prayer::{Prayer, PrayerEvent};
use crate::schedule::{format_clock, format_duration, format_lunar_date, next_event_after};

/// Status line text when there is nothing left to show.
pub const NO_UPCOMING_TEXT: &str = "No upcoming prayer";

/// Next view text when every prayer of the day has passed.
pub const NO_UPCOMING_NEXT: &str = "No upcoming prayer found";

/// CSS class of every status line record.
pub const WAYBAR_CLASS: &str = "adhan";

const PASSED_MARK: &str = " ✓";
const NEXT_MARK: &str = " ←";

/// Display preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// Render clock times as `hh:mm AM/PM`.
    pub twelve_hour: bool,
    /// Use Arabic month and weekday names in the lunar date.
    pub arabic: bool,
    /// Leave the remaining time out of the status line text.
    pub short: bool,
}

/// Waybar output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaybarOutput {
    /// Text to display in the bar.
    pub text: String,
    /// Tooltip text (shown on hover).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// CSS class for styling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl WaybarOutput {
    /// Creates a record with text and tooltip.
    pub fn new(text: impl Into<String>, tooltip: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tooltip: Some(tooltip.into()),
            class: None,
        }
    }

    /// Sets the CSS class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// A record reporting a failure: a short label in the bar and the
    /// details on hover.
    pub fn failure(label: impl Into<String>, detail: impl fmt::Display) -> Self {
        Self::new(label, detail.to_string()).with_class(WAYBAR_CLASS)
    }
}

/// Result of the next-prayer query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextView {
    /// A prayer is still ahead.
    Upcoming {
        prayer: Prayer,
        clock: String,
        remaining: String,
        lunar: String,
    },
    /// Every prayer of the sequence has passed, or there was none.
    Exhausted,
}

impl NextView {
    /// Returns true if a prayer is still ahead.
    pub fn is_upcoming(&self) -> bool {
        matches!(self, Self::Upcoming { .. })
    }
}

impl fmt::Display for NextView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upcoming {
                prayer,
                clock,
                remaining,
                lunar,
            } => {
                write!(f, "🕌 {} at {} ({})", prayer, clock, remaining)?;
                if !lunar.is_empty() {
                    write!(f, "\n📅 {}", lunar)?;
                }
                Ok(())
            }
            Self::Exhausted => f.write_str(NO_UPCOMING_NEXT),
        }
    }
}

/// Formatter for prayer schedules.
#[derive(Debug, Clone, Default)]
pub struct OutputFormatter {
    options: DisplayOptions,
}

impl OutputFormatter {
    pub fn new(options: DisplayOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Formats a wall-clock time per the display options.
    pub fn clock(&self, event: &PrayerEvent) -> String {
        format_clock(&event.instant, self.options.twelve_hour)
    }

    /// Formats the lunar date per the display options.
    pub fn lunar(&self, hijri: &Hijri) -> String {
        format_lunar_date(hijri, self.options.arabic)
    }

    /// Formats the full day schedule.
    pub fn format_schedule(&self, events: &[PrayerEvent], hijri: &Hijri) -> String {
        self.format_schedule_at(events, hijri, Utc::now())
    }

    /// Formats the full day schedule at a specific time.
    ///
    /// Prayers are listed in canonical order, with a mark on those already
    /// passed, followed by the next prayer if one remains.
    pub fn format_schedule_at(
        &self,
        events: &[PrayerEvent],
        hijri: &Hijri,
        now: DateTime<Utc>,
    ) -> String {
        let mut lines = Vec::new();

        let lunar = self.lunar(hijri);
        if !lunar.is_empty() {
            lines.push(format!("📅 {}", lunar));
            lines.push(String::new());
        }

        lines.push("Today's Prayer Schedule:".to_string());
        lines.push("-".repeat(24));
        lines.extend(self.schedule_rows(events, now, None));

        if let Some(next) = next_event_after(events, now) {
            lines.push(String::new());
            lines.push(format!(
                "🕌 Next: {} in {}",
                next.prayer,
                remaining(&next, now)
            ));
        }

        lines.join("\n")
    }

    /// Formats the next prayer.
    pub fn format_next(&self, events: &[PrayerEvent], hijri: &Hijri) -> NextView {
        self.format_next_at(events, hijri, Utc::now())
    }

    /// Formats the next prayer at a specific time.
    pub fn format_next_at(
        &self,
        events: &[PrayerEvent],
        hijri: &Hijri,
        now: DateTime<Utc>,
    ) -> NextView {
        match next_event_after(events, now) {
            Some(next) => NextView::Upcoming {
                prayer: next.prayer,
                clock: self.clock(&next),
                remaining: remaining(&next, now),
                lunar: self.lunar(hijri),
            },
            None => NextView::Exhausted,
        }
    }

    /// Formats the status line record.
    pub fn format_waybar(&self, events: &[PrayerEvent], hijri: &Hijri) -> WaybarOutput {
        self.format_waybar_at(events, hijri, Utc::now())
    }

    /// Formats the status line record at a specific time.
    ///
    /// With no events at all, both `text` and `tooltip` carry
    /// [`NO_UPCOMING_TEXT`]. When events exist but all have passed, `text`
    /// falls back the same way while the tooltip still shows the day.
    pub fn format_waybar_at(
        &self,
        events: &[PrayerEvent],
        hijri: &Hijri,
        now: DateTime<Utc>,
    ) -> WaybarOutput {
        if events.is_empty() {
            return WaybarOutput::new(NO_UPCOMING_TEXT, NO_UPCOMING_TEXT).with_class(WAYBAR_CLASS);
        }

        let next = next_event_after(events, now);

        let text = match &next {
            Some(e) if self.options.short => format!("{} {}", e.prayer, self.clock(e)),
            Some(e) => format!("{} {} ({})", e.prayer, self.clock(e), remaining(e, now)),
            None => NO_UPCOMING_TEXT.to_string(),
        };

        let mut lines = Vec::new();
        let lunar = self.lunar(hijri);
        if !lunar.is_empty() {
            lines.push(format!("📅 {}", lunar));
        }
        match &next {
            Some(e) => lines.push(format!("Next: {} — {}", e.prayer, remaining(e, now))),
            None => lines.push(NO_UPCOMING_TEXT.to_string()),
        }
        lines.push(String::new());
        lines.push("Today's Schedule:".to_string());
        lines.extend(self.schedule_rows(events, now, next.map(|e| e.prayer)));

        WaybarOutput::new(text, lines.join("\n")).with_class(WAYBAR_CLASS)
    }

    /// One line per prayer present, in canonical order.
    fn schedule_rows(
        &self,
        events: &[PrayerEvent],
        now: DateTime<Utc>,
        next: Option<Prayer>,
    ) -> Vec<String> {
        Prayer::ALL
            .iter()
            .filter_map(|&prayer| events.iter().find(|e| e.prayer == prayer))
            .map(|event| {
                let mark = if event.has_passed(now) {
                    PASSED_MARK
                } else if next == Some(event.prayer) {
                    NEXT_MARK
                } else {
                    ""
                };
                format!("  {:<8} {}{}", event.prayer.as_str(), self.clock(event), mark)
            })
            .collect()
    }
}

fn remaining(event: &PrayerEvent, now: DateTime<Utc>) -> String {
    let left: TimeDelta = event.utc() - now;
    format_duration(left)
}
