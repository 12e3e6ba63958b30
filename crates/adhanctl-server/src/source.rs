//! Time-table source: the provider behind the response cache.

use std::sync::Arc;

use adhanctl_core::TimingsResponse;
use adhanctl_providers::{BoxFuture, ProviderResult, TimingsProvider, TimingsQuery};
use chrono::NaiveDate;
use tracing::debug;

use crate::cache::DiskCache;

/// Where the daemon and the one-shot commands get time tables from.
pub trait TimingsSource: Send + Sync {
    /// Returns the time table for `date`.
    fn timings(&self, date: NaiveDate) -> BoxFuture<'_, ProviderResult<TimingsResponse>>;
}

/// A provider fronted by an optional disk cache.
///
/// Cache hits return without touching the provider. Fetched responses are
/// written back; a failed write is logged and otherwise ignored.
pub struct CachedSource {
    provider: Arc<dyn TimingsProvider>,
    cache: Option<DiskCache>,
    /// Location, method and school; the date is filled in per call.
    template: TimingsQuery,
}

impl CachedSource {
    pub fn new(provider: Arc<dyn TimingsProvider>, template: TimingsQuery) -> Self {
        Self {
            provider,
            cache: None,
            template,
        }
    }

    pub fn with_cache(mut self, cache: DiskCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Returns the full query for `date`.
    pub fn query_for(&self, date: NaiveDate) -> TimingsQuery {
        self.template.clone().with_date(date)
    }
}

impl TimingsSource for CachedSource {
    fn timings(&self, date: NaiveDate) -> BoxFuture<'_, ProviderResult<TimingsResponse>> {
        let query = self.query_for(date);
        Box::pin(async move {
            if let Some(cache) = &self.cache
                && let Some(resp) = cache.get(&query)
            {
                return Ok(resp);
            }

            debug!(provider = self.provider.name(), location = %query.location, %date, "Cache miss, fetching");
            let resp = self.provider.fetch(query.clone()).await?;

            if let Some(cache) = &self.cache
                && let Err(e) = cache.put(&query, &resp)
            {
                debug!(error = %e, "Failed to write cache");
            }
            Ok(resp)
        })
    }
}
