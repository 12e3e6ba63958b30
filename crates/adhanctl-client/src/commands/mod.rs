//! Command implementations.
//!
//! The one-shot commands share [`fetch_day`]: resolve the location, read the
//! cache or fetch, and parse today's prayers.

pub mod config;
pub mod next;
pub mod notify;
pub mod serve;
pub mod today;
pub mod waybar;

use std::sync::Arc;

use adhanctl_core::{Hijri, PrayerEvent, TimingsResponse, Zone, parse_times};
use adhanctl_providers::{AlAdhanClient, TimingsQuery};
use adhanctl_server::{CachedSource, DiskCache, TimingsSource};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::Config;
use crate::error::ClientResult;

/// Today's parsed time table.
#[derive(Debug, Clone)]
pub struct Day {
    pub response: TimingsResponse,
    pub events: Vec<PrayerEvent>,
}

impl Day {
    /// Parses `response` in the timezone it reports.
    pub fn parse(response: TimingsResponse, now: DateTime<Utc>) -> Self {
        let zone = Zone::from_payload(&response.data);
        let events = parse_times(&response.data, zone, now);
        debug!(%zone, count = events.len(), "Parsed prayer times");
        Self { response, events }
    }

    pub fn hijri(&self) -> &Hijri {
        &self.response.data.date.hijri
    }
}

/// Builds the cached AlAdhan source for the configured location.
pub fn build_source(config: &Config) -> ClientResult<CachedSource> {
    let location = config.location.resolve()?;
    let now = Utc::now();
    let template = TimingsQuery::new(location, Zone::Local.today(now))
        .with_method(config.calculation.method)
        .with_school(config.calculation.school);

    let provider = AlAdhanClient::new()?;
    let source = CachedSource::new(Arc::new(provider), template);

    match DiskCache::in_user_cache(config.cache.ttl()) {
        Ok(cache) => Ok(source.with_cache(cache)),
        Err(e) => {
            debug!(error = %e, "Response cache unavailable");
            Ok(source)
        }
    }
}

/// Fetches and parses today's time table.
pub async fn fetch_day(config: &Config) -> ClientResult<Day> {
    let source = build_source(config)?;
    let now = Utc::now();
    let response = source.timings(Zone::Local.today(now)).await?;
    Ok(Day::parse(response, now))
}
