//! AlAdhan time-table client.
//!
//! Talks to the public `api.aladhan.com` v1 API: `timingsByCity` for a
//! city/country pair and `timings` for coordinates. Requests go through
//! [`retry`] with the client's [`RetryPolicy`].

use std::time::Duration;

use adhanctl_core::TimingsResponse;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, Location, TimingsProvider, TimingsQuery};
use crate::retry::{RetryPolicy, retry};

/// Base URL of the AlAdhan v1 API.
pub const DEFAULT_BASE_URL: &str = "https://api.aladhan.com/v1";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("adhanctl/", env!("CARGO_PKG_VERSION"));

/// Bytes of an error body kept in the error message.
const MAX_ERROR_BODY: usize = 4096;

/// AlAdhan API client.
#[derive(Debug, Clone)]
pub struct AlAdhanClient {
    http_client: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl AlAdhanClient {
    /// Creates a client for the public API with the default timeout and
    /// retry policy.
    pub fn new() -> ProviderResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProviderError::configuration("failed to create HTTP client").with_source(e))?;

        Ok(Self {
            http_client,
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            retry: RetryPolicy::default(),
        })
    }

    /// Points the client at another server.
    pub fn with_base_url(mut self, base_url: &str) -> ProviderResult<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Builds the request URL for a query.
    pub fn endpoint(&self, query: &TimingsQuery) -> ProviderResult<Url> {
        let date = query.date.format("%d-%m-%Y").to_string();
        let mut url = self.base_url.clone();

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ProviderError::configuration("base URL cannot carry a path"))?;
            segments.pop_if_empty();
            match query.location {
                Location::City { .. } => segments.push("timingsByCity"),
                Location::Coordinates { .. } => segments.push("timings"),
            };
            segments.push(&date);
        }

        {
            let mut pairs = url.query_pairs_mut();
            match &query.location {
                Location::City { city, country } => {
                    pairs.append_pair("city", city).append_pair("country", country);
                }
                Location::Coordinates {
                    latitude,
                    longitude,
                } => {
                    pairs
                        .append_pair("latitude", &format!("{latitude:.6}"))
                        .append_pair("longitude", &format!("{longitude:.6}"));
                }
            }
            pairs.append_pair("method", &query.method.to_string());
            if query.school != 0 {
                pairs.append_pair("school", &query.school.to_string());
            }
        }

        Ok(url)
    }

    async fn fetch_once(&self, url: Url) -> ProviderResult<TimingsResponse> {
        let response = self.http_client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), truncate_body(&body)));
        }

        let body = response.text().await?;
        decode_body(&body)
    }
}

impl TimingsProvider for AlAdhanClient {
    fn name(&self) -> &str {
        "aladhan"
    }

    fn fetch(&self, query: TimingsQuery) -> BoxFuture<'_, ProviderResult<TimingsResponse>> {
        Box::pin(async move {
            let url = self.endpoint(&query)?;
            debug!(url = %url, location = %query.location, "Fetching time table");
            retry(&self.retry, |_| self.fetch_once(url.clone())).await
        })
    }
}

fn parse_base_url(raw: &str) -> ProviderResult<Url> {
    Url::parse(raw).map_err(|e| {
        ProviderError::configuration(format!("invalid base URL {raw:?}")).with_source(e)
    })
}

/// Decodes a successful HTTP body.
///
/// The body is first read loosely: on API errors `data` is a message string
/// rather than a time table, so the code is checked before the full decode.
pub fn decode_body(body: &str) -> ProviderResult<TimingsResponse> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        ProviderError::invalid_response(format!("decoding response: {e}")).with_source(e)
    })?;

    let code = value.get("code").and_then(Value::as_i64).unwrap_or_default();
    if code != 200 {
        let status = value.get("status").and_then(Value::as_str).unwrap_or_default();
        let detail = match value.get("data") {
            Some(Value::String(s)) => format!("{status}: {s}"),
            _ => status.to_string(),
        };
        return Err(ProviderError::api(format!("api error code {code}: {detail}")));
    }

    serde_json::from_value(value).map_err(|e| {
        ProviderError::invalid_response(format!("decoding time table: {e}")).with_source(e)
    })
}

/// Cuts an error body to at most [`MAX_ERROR_BODY`] bytes on a char boundary.
fn truncate_body(body: &str) -> &str {
    if body.len() <= MAX_ERROR_BODY {
        return body;
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
