//! On-disk response cache with TTL support.
//!
//! One JSON file per query (location, method, school, date) under the user
//! cache directory. Freshness is judged by the file's modification time, so
//! entries survive restarts and are shared between the CLI and the daemon.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use adhanctl_core::TimingsResponse;
use adhanctl_providers::{Location, TimingsQuery};
use tracing::{debug, trace};

use crate::error::CacheError;

/// Name of the cache directory under the user cache directory.
pub const CACHE_DIR_NAME: &str = "adhanctl";

/// Default time-to-live for cached time tables.
pub const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Response cache stored as JSON files.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
    ttl: Duration,
}

impl DiskCache {
    /// Creates a cache in `dir`. A zero `ttl` disables reads.
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    /// Creates a cache in the user cache directory (`$XDG_CACHE_HOME/adhanctl`).
    pub fn in_user_cache(ttl: Duration) -> Result<Self, CacheError> {
        let dir = default_cache_dir().ok_or(CacheError::NoCacheDir)?;
        Ok(Self::new(dir, ttl))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the file a query is cached in.
    pub fn path_for(&self, query: &TimingsQuery) -> PathBuf {
        self.dir.join(cache_file_name(query))
    }

    /// Returns the cached response if it exists, is fresh and decodes.
    pub fn get(&self, query: &TimingsQuery) -> Option<TimingsResponse> {
        self.get_at(query, SystemTime::now())
    }

    /// Like [`get`](Self::get), judging freshness against `now`.
    pub fn get_at(&self, query: &TimingsQuery, now: SystemTime) -> Option<TimingsResponse> {
        if self.ttl.is_zero() {
            return None;
        }

        let path = self.path_for(query);
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;
        // A timestamp in the future counts as fresh.
        if let Ok(age) = now.duration_since(modified)
            && age > self.ttl
        {
            trace!(path = %path.display(), age_secs = age.as_secs(), "Cache entry expired");
            return None;
        }

        let data = fs::read(&path).ok()?;
        match serde_json::from_slice(&data) {
            Ok(resp) => {
                debug!(path = %path.display(), "Cache hit");
                Some(resp)
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Cache entry unreadable");
                None
            }
        }
    }

    /// Stores a response, creating the cache directory if needed.
    pub fn put(&self, query: &TimingsQuery, resp: &TimingsResponse) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir).map_err(|e| CacheError::io(&self.dir, e))?;

        let path = self.path_for(query);
        let data = serde_json::to_vec(resp).map_err(|e| CacheError::json(&path, e))?;
        fs::write(&path, data).map_err(|e| CacheError::io(&path, e))?;

        debug!(path = %path.display(), "Cache written");
        Ok(())
    }
}

/// Returns `$XDG_CACHE_HOME/adhanctl` (or the platform equivalent).
pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join(CACHE_DIR_NAME))
}

/// File name for a query, e.g. `city-London-UK-method3-school0-2024-06-15.json`.
pub fn cache_file_name(query: &TimingsQuery) -> String {
    let key = match &query.location {
        Location::Coordinates {
            latitude,
            longitude,
        } => format!("coords-{latitude:.4}-{longitude:.4}"),
        Location::City { city, country } => {
            format!("city-{}-{}", sanitize(city), sanitize(country))
        }
    };
    format!(
        "{}-method{}-school{}-{}.json",
        key,
        query.method,
        query.school,
        query.date.format("%Y-%m-%d")
    )
}

/// Keeps ASCII alphanumerics, `-` and `_`; spaces become `_`.
fn sanitize(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect();
    if cleaned.is_empty() {
        "default".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn query() -> TimingsQuery {
        TimingsQuery::new(
            Location::city("London", "UK"),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        )
    }

    fn response() -> TimingsResponse {
        serde_json::from_str(
            r#"{"code":200,"status":"OK","data":{"timings":{"Fajr":"02:45"},"meta":{"timezone":"Europe/London"}}}"#,
        )
        .unwrap()
    }

    mod names {
        use super::*;

        #[test]
        fn city_file_name() {
            assert_eq!(
                cache_file_name(&query()),
                "city-London-UK-method3-school0-2024-06-15.json"
            );
        }

        #[test]
        fn coordinates_file_name() {
            let q = TimingsQuery::new(
                Location::coordinates(21.422_51, -0.127_76),
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            )
            .with_method(4)
            .with_school(1);
            assert_eq!(
                cache_file_name(&q),
                "coords-21.4225--0.1278-method4-school1-2024-01-02.json"
            );
        }

        #[test]
        fn sanitizes_names() {
            assert_eq!(sanitize("New York"), "New_York");
            assert_eq!(sanitize("São Paulo/../x"), "So_Paulox");
            assert_eq!(sanitize("../"), "default");
            assert_eq!(sanitize(""), "default");
        }
    }

    #[test]
    fn put_then_get() {
        let dir = TempDir::new().unwrap();
        let cache = DiskCache::new(dir.path().join("nested"), DEFAULT_TTL);

        assert!(cache.get(&query()).is_none());
        cache.put(&query(), &response()).unwrap();
        assert_eq!(cache.get(&query()), Some(response()));
        assert!(cache.path_for(&query()).exists());
    }

    #[test]
    fn other_queries_miss() {
        let dir = TempDir::new().unwrap();
        let cache = DiskCache::new(dir.path(), DEFAULT_TTL);
        cache.put(&query(), &response()).unwrap();

        assert!(cache.get(&query().with_method(2)).is_none());
        assert!(cache.get(&query().with_school(1)).is_none());
        assert!(
            cache
                .get(&query().with_date(NaiveDate::from_ymd_opt(2024, 6, 16).unwrap()))
                .is_none()
        );
    }

    #[test]
    fn expired_entries_miss() {
        let dir = TempDir::new().unwrap();
        let cache = DiskCache::new(dir.path(), Duration::from_secs(60));
        cache.put(&query(), &response()).unwrap();

        let now = SystemTime::now();
        assert!(cache.get_at(&query(), now).is_some());
        assert!(cache.get_at(&query(), now + Duration::from_secs(120)).is_none());
    }

    #[test]
    fn old_mtime_misses() {
        let dir = TempDir::new().unwrap();
        let cache = DiskCache::new(dir.path(), Duration::from_secs(60));
        cache.put(&query(), &response()).unwrap();

        let file = fs::File::options()
            .write(true)
            .open(cache.path_for(&query()))
            .unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(3600))
            .unwrap();

        assert!(cache.get(&query()).is_none());
    }

    #[test]
    fn zero_ttl_disables_reads() {
        let dir = TempDir::new().unwrap();
        let cache = DiskCache::new(dir.path(), Duration::ZERO);
        cache.put(&query(), &response()).unwrap();

        assert!(cache.path_for(&query()).exists());
        assert!(cache.get(&query()).is_none());
    }

    #[test]
    fn corrupt_entries_miss() {
        let dir = TempDir::new().unwrap();
        let cache = DiskCache::new(dir.path(), DEFAULT_TTL);
        fs::write(cache.path_for(&query()), b"{not json").unwrap();

        assert!(cache.get(&query()).is_none());
    }

    #[test]
    fn put_reports_unwritable_dir() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();
        let cache = DiskCache::new(blocker.join("sub"), DEFAULT_TTL);

        let err = cache.put(&query(), &response()).unwrap_err();
        assert!(matches!(err, CacheError::Io { .. }));
    }
}
