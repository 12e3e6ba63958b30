//! Core types: prayer events, payload parsing, queries, formatting

pub mod format;
pub mod payload;
pub mod prayer;
pub mod schedule;
pub mod time;
pub mod tracing;

pub use format::{
    DisplayOptions, NO_UPCOMING_NEXT, NO_UPCOMING_TEXT, NextView, OutputFormatter, WAYBAR_CLASS,
    WaybarOutput,
};
pub use payload::{Gregorian, Hijri, LocalizedName, TimingsData, TimingsResponse};
pub use prayer::{Prayer, PrayerEvent};
pub use schedule::{
    HORIZON_HOURS, PASSED, format_clock, format_duration, format_lunar_date, horizon,
    next_event_after, upcoming_events,
};
pub use time::{ParseError, Zone, ZoneError, parse_date, parse_time_token, parse_times};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
