//! Prayer notification daemon.
//!
//! This crate provides the pieces `adhanctl serve` is built from:
//! - A scheduler that refreshes the day's time table and arms one timer per
//!   upcoming prayer
//! - An on-disk response cache with TTL
//! - Desktop notifications
//! - Signal handling (shutdown and refresh-now)
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use adhanctl_providers::{AlAdhanClient, Location, TimingsQuery};
//! use adhanctl_server::{
//!     CachedSource, Daemon, DaemonConfig, DesktopNotifier, DiskCache, SignalHandler, DEFAULT_TTL,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let today = chrono::Local::now().date_naive();
//!     let query = TimingsQuery::new(Location::city("London", "UK"), today);
//!     let source = CachedSource::new(Arc::new(AlAdhanClient::new()?), query)
//!         .with_cache(DiskCache::in_user_cache(DEFAULT_TTL)?);
//!
//!     let signals = SignalHandler::new();
//!     signals.spawn_listener()?;
//!
//!     let daemon = Daemon::new(DaemonConfig::default(), Arc::new(source), Arc::new(DesktopNotifier::new()));
//!     daemon.run(signals.shutdown(), signals.reload()).await;
//!     Ok(())
//! }
//! ```

mod cache;
mod error;
mod notify;
mod scheduler;
mod signals;
mod source;

pub use cache::{CACHE_DIR_NAME, DEFAULT_TTL, DiskCache, cache_file_name, default_cache_dir};
pub use error::{CacheError, NotifyError};
pub use notify::{DesktopNotifier, Notifier, PrayerNotification};
pub use scheduler::{DEFAULT_INTERVAL, Daemon, DaemonConfig, MIN_INTERVAL};
pub use signals::{ReloadSignal, ShutdownSignal, SignalHandler};
pub use source::{CachedSource, TimingsSource};
