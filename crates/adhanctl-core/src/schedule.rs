//! Queries over a parsed prayer sequence, plus duration and clock formatting.
//!
//! Every function takes its reference instant as an argument; nothing here
//! reads the system clock.

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

use crate::payload::Hijri;
use crate::prayer::PrayerEvent;

/// Marker for durations that are already in the past.
pub const PASSED: &str = "passed";

/// Width of the window the daemon arms notifications for, in hours.
pub const HORIZON_HOURS: i64 = 24;

/// Returns the daemon's arming window.
pub fn horizon() -> TimeDelta {
    TimeDelta::hours(HORIZON_HOURS)
}

/// Returns the earliest event strictly after `at`.
///
/// Ties return the first such event in slice order.
pub fn next_event_after(events: &[PrayerEvent], at: DateTime<Utc>) -> Option<PrayerEvent> {
    events
        .iter()
        .filter(|e| e.utc() > at)
        .min_by_key(|e| e.utc())
        .copied()
}

/// Returns the events in the open interval `(from, from + within)`, sorted by instant.
pub fn upcoming_events(
    events: &[PrayerEvent],
    from: DateTime<Utc>,
    within: TimeDelta,
) -> Vec<PrayerEvent> {
    let until = from + within;
    let mut upcoming: Vec<PrayerEvent> = events
        .iter()
        .filter(|e| {
            let at = e.utc();
            at > from && at < until
        })
        .copied()
        .collect();
    upcoming.sort_by_key(PrayerEvent::utc);
    upcoming
}

/// Formats a remaining duration.
///
/// Sub-minute remainders are truncated. Negative durations render as
/// [`PASSED`].
///
/// ```
/// use adhanctl_core::format_duration;
/// use chrono::TimeDelta;
///
/// assert_eq!(format_duration(TimeDelta::minutes(45)), "45m");
/// assert_eq!(format_duration(TimeDelta::minutes(125)), "2h05m");
/// ```
pub fn format_duration(d: TimeDelta) -> String {
    if d < TimeDelta::zero() {
        return PASSED.to_string();
    }
    let total = d.num_minutes();
    let (hours, minutes) = (total / 60, total % 60);
    match (hours, minutes) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h{m:02}m"),
    }
}

/// Formats the wall-clock time of an instant in its own offset.
pub fn format_clock(instant: &DateTime<FixedOffset>, twelve_hour: bool) -> String {
    let fmt = if twelve_hour { "%I:%M %p" } else { "%H:%M" };
    instant.format(fmt).to_string()
}

/// Joins the Hijri date, month name and weekday name, skipping empty parts.
pub fn format_lunar_date(hijri: &Hijri, arabic: bool) -> String {
    [
        hijri.date.as_str(),
        hijri.month.name.get(arabic),
        hijri.weekday.get(arabic),
    ]
    .iter()
    .map(|s| s.trim())
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{LocalizedName, Month};
    use crate::prayer::Prayer;
    use chrono::TimeZone;

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, h, m, 0).unwrap()
    }

    fn event(prayer: Prayer, h: u32, m: u32) -> PrayerEvent {
        PrayerEvent::new(prayer, utc(h, m).fixed_offset())
    }

    fn day() -> Vec<PrayerEvent> {
        vec![
            event(Prayer::Fajr, 3, 0),
            event(Prayer::Sunrise, 4, 45),
            event(Prayer::Dhuhr, 12, 0),
            event(Prayer::Asr, 16, 20),
            event(Prayer::Maghrib, 20, 10),
            event(Prayer::Isha, 22, 0),
        ]
    }

    mod next {
        use super::*;

        #[test]
        fn empty_sequence() {
            assert!(next_event_after(&[], utc(12, 0)).is_none());
        }

        #[test]
        fn strictly_after_reference() {
            let events = day();
            let next = next_event_after(&events, utc(12, 0)).unwrap();
            assert_eq!(next.prayer, Prayer::Asr);

            let next = next_event_after(&events, utc(11, 59)).unwrap();
            assert_eq!(next.prayer, Prayer::Dhuhr);
        }

        #[test]
        fn never_returns_past_events() {
            let events = day();
            for minute in (0..24 * 60).step_by(7) {
                let at = utc(0, 0) + TimeDelta::minutes(minute);
                if let Some(next) = next_event_after(&events, at) {
                    assert!(next.utc() > at);
                }
            }
        }

        #[test]
        fn none_after_last() {
            assert!(next_event_after(&day(), utc(22, 0)).is_none());
        }

        #[test]
        fn unsorted_input() {
            let mut events = day();
            events.reverse();
            assert_eq!(next_event_after(&events, utc(5, 0)).unwrap().prayer, Prayer::Dhuhr);
        }
    }

    mod upcoming {
        use super::*;

        #[test]
        fn open_interval() {
            let events = day();
            let got = upcoming_events(&events, utc(4, 45), TimeDelta::hours(7) + TimeDelta::minutes(15));
            // Sunrise is at `from` and Dhuhr at `from + within`: both excluded.
            assert!(got.is_empty());

            let got = upcoming_events(&events, utc(4, 44), TimeDelta::hours(8));
            let names: Vec<_> = got.iter().map(|e| e.prayer).collect();
            assert_eq!(names, vec![Prayer::Sunrise, Prayer::Dhuhr]);
        }

        #[test]
        fn contained_sorted_and_idempotent() {
            let mut events = day();
            events.swap(0, 5);
            let from = utc(10, 0);
            let first = upcoming_events(&events, from, horizon());
            let second = upcoming_events(&events, from, horizon());

            assert_eq!(first, second);
            assert_eq!(first.len(), 4);
            assert!(first.windows(2).all(|w| w[0].instant <= w[1].instant));
            assert!(
                first
                    .iter()
                    .all(|e| e.utc() > from && e.utc() < from + horizon())
            );
        }

        #[test]
        fn empty_input() {
            assert!(upcoming_events(&[], utc(0, 0), horizon()).is_empty());
        }
    }

    mod durations {
        use super::*;

        #[test]
        fn documented_cases() {
            assert_eq!(format_duration(TimeDelta::minutes(-5)), "passed");
            assert_eq!(format_duration(TimeDelta::minutes(45)), "45m");
            assert_eq!(format_duration(TimeDelta::minutes(120)), "2h");
            assert_eq!(format_duration(TimeDelta::minutes(125)), "2h05m");
        }

        #[test]
        fn truncates_seconds() {
            assert_eq!(format_duration(TimeDelta::seconds(59)), "0m");
            assert_eq!(format_duration(TimeDelta::seconds(3599)), "59m");
            assert_eq!(format_duration(TimeDelta::seconds(3600 + 59)), "1h");
            assert_eq!(format_duration(TimeDelta::seconds(-1)), "passed");
            assert_eq!(format_duration(TimeDelta::zero()), "0m");
        }

        #[test]
        fn long_durations() {
            assert_eq!(format_duration(TimeDelta::hours(23) + TimeDelta::minutes(9)), "23h09m");
        }
    }

    mod clock {
        use super::*;

        #[test]
        fn both_formats() {
            let offset = FixedOffset::east_opt(3600).unwrap();
            let at = offset.with_ymd_and_hms(2024, 6, 15, 14, 5, 0).unwrap();
            assert_eq!(format_clock(&at, false), "14:05");
            assert_eq!(format_clock(&at, true), "02:05 PM");
        }

        #[test]
        fn uses_the_instant_offset() {
            // 09:30 UTC is 12:30 at +03:00.
            let offset = FixedOffset::east_opt(3 * 3600).unwrap();
            let at = utc(9, 30).with_timezone(&offset);
            assert_eq!(format_clock(&at, false), "12:30");
            assert_eq!(format_clock(&at, true), "12:30 PM");
        }
    }

    mod lunar {
        use super::*;

        fn hijri() -> Hijri {
            Hijri {
                date: "09-12-1445".to_string(),
                month: Month {
                    number: 12,
                    name: LocalizedName {
                        en: "Dhū al-Ḥijjah".to_string(),
                        ar: "ذوالحجة".to_string(),
                    },
                },
                weekday: LocalizedName {
                    en: "Al Sabt".to_string(),
                    ar: "السبت".to_string(),
                },
                ..Hijri::default()
            }
        }

        #[test]
        fn english_and_arabic() {
            assert_eq!(format_lunar_date(&hijri(), false), "09-12-1445 Dhū al-Ḥijjah Al Sabt");
            assert_eq!(format_lunar_date(&hijri(), true), "09-12-1445 ذوالحجة السبت");
        }

        #[test]
        fn skips_empty_parts() {
            let mut h = hijri();
            h.month.name.ar.clear();
            assert_eq!(format_lunar_date(&h, true), "09-12-1445 السبت");
            assert_eq!(format_lunar_date(&Hijri::default(), false), "");
        }
    }
}
