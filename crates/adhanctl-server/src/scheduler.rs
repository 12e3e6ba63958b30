//! The scheduling daemon.
//!
//! Every refresh drops the timers armed by the previous one, fetches today's
//! time table and arms one timer per prayer inside the horizon. Refreshes run
//! at startup, on every interval tick and on SIGHUP.
//!
//! Fetch failures and empty tables leave the daemon with no armed timers
//! until the next successful refresh. They are logged at debug level and
//! never stop the loop.

use std::sync::Arc;
use std::time::Duration;

use adhanctl_core::{
    DisplayOptions, Zone, format_lunar_date, horizon, parse_times, upcoming_events,
};
use chrono::{DateTime, TimeDelta, Utc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::notify::{Notifier, PrayerNotification};
use crate::signals::{ReloadSignal, ShutdownSignal};
use crate::source::TimingsSource;

/// Shortest refresh interval the daemon accepts.
pub const MIN_INTERVAL: Duration = Duration::from_secs(10);

/// Refresh interval when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Daemon configuration.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    interval: Duration,
    horizon: TimeDelta,
    display: DisplayOptions,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            horizon: horizon(),
            display: DisplayOptions::default(),
        }
    }
}

impl DaemonConfig {
    /// Creates a config refreshing every `interval`, raised to [`MIN_INTERVAL`].
    pub fn new(interval: Duration) -> Self {
        if interval < MIN_INTERVAL {
            warn!(
                requested_secs = interval.as_secs(),
                min_secs = MIN_INTERVAL.as_secs(),
                "Refresh interval too short, clamping"
            );
        }
        Self {
            interval: interval.max(MIN_INTERVAL),
            ..Default::default()
        }
    }

    /// Builder: set the arming window.
    pub fn with_horizon(mut self, horizon: TimeDelta) -> Self {
        self.horizon = horizon;
        self
    }

    /// Builder: set clock and language options for notification text.
    pub fn with_display(mut self, display: DisplayOptions) -> Self {
        self.display = display;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn horizon(&self) -> TimeDelta {
        self.horizon
    }

    pub fn display(&self) -> &DisplayOptions {
        &self.display
    }
}

/// Timers armed by the latest refresh.
///
/// All timers of one generation share a token. Invalidating cancels the
/// token, aborts the tasks and starts a new generation, so at most one
/// generation is ever live.
#[derive(Debug, Default)]
struct ArmedTimers {
    token: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl ArmedTimers {
    /// Drops every armed timer. Returns how many had not fired yet.
    fn invalidate(&mut self) -> usize {
        let live = self.live();
        self.token.cancel();
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        self.token = CancellationToken::new();
        live
    }

    /// Number of timers that have not fired or been cancelled.
    fn live(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// Arms a timer that shows `notification` after `delay`.
    fn arm(&mut self, delay: Duration, notification: PrayerNotification, notifier: Arc<dyn Notifier>) {
        let deadline = Instant::now() + delay;
        let token = self.token.clone();

        self.handles.push(tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => {
                    notification.send(notifier.as_ref());
                }
            }
        }));
    }
}

/// Long-running prayer notification daemon.
pub struct Daemon {
    config: DaemonConfig,
    source: Arc<dyn TimingsSource>,
    notifier: Arc<dyn Notifier>,
    armed: ArmedTimers,
}

impl Daemon {
    pub fn new(
        config: DaemonConfig,
        source: Arc<dyn TimingsSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            source,
            notifier,
            armed: ArmedTimers::default(),
        }
    }

    pub fn config(&self) -> &DaemonConfig {
        &self.config
    }

    /// Number of armed timers still waiting to fire.
    pub fn armed_count(&self) -> usize {
        self.armed.live()
    }

    /// Runs one refresh cycle against the system clock.
    pub async fn refresh(&mut self) -> usize {
        self.refresh_at(Utc::now()).await
    }

    /// Runs one refresh cycle as of `now`. Returns the number of timers armed.
    pub async fn refresh_at(&mut self, now: DateTime<Utc>) -> usize {
        let dropped = self.armed.invalidate();
        if dropped > 0 {
            debug!(dropped, "Dropped timers from previous refresh");
        }

        let date = Zone::Local.today(now);
        let resp = match self.source.timings(date).await {
            Ok(resp) => resp,
            Err(e) => {
                debug!(error = %e, %date, "Fetch failed, skipping refresh");
                return 0;
            }
        };

        let zone = Zone::from_payload(&resp.data);
        let events = parse_times(&resp.data, zone, now);
        if events.is_empty() {
            debug!(%zone, "No prayer times parsed, skipping refresh");
            return 0;
        }

        let display = &self.config.display;
        let lunar = format_lunar_date(&resp.data.date.hijri, display.arabic);
        let mut armed = 0;

        for event in upcoming_events(&events, now, self.config.horizon) {
            let Ok(delay) = (event.utc() - now).to_std() else {
                continue;
            };
            debug!(
                prayer = %event.prayer,
                at = %event.instant,
                in_secs = delay.as_secs(),
                "Arming notification"
            );
            let notification = PrayerNotification::for_event(&event, &lunar, display.twelve_hour);
            self.armed.arm(delay, notification, self.notifier.clone());
            armed += 1;
        }

        debug!(armed, "Refresh complete");
        armed
    }

    /// Runs until `shutdown` fires. Armed timers are dropped on exit.
    pub async fn run(mut self, shutdown: ShutdownSignal, mut reload: ReloadSignal) {
        info!(
            interval_secs = self.config.interval.as_secs(),
            horizon_hours = self.config.horizon.num_hours(),
            "Daemon started"
        );

        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let shutdown = shutdown.wait();
        tokio::pin!(shutdown);

        loop {
            let requested = tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => false,
                _ = reload.recv() => true,
            };
            if requested {
                info!("Refresh requested");
            }

            // A slow fetch must not hold up shutdown.
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    debug!("Refresh abandoned on shutdown");
                    break;
                }
                _ = self.refresh() => {}
            }

            if requested {
                ticker.reset();
            }
        }

        let dropped = self.armed.invalidate();
        info!(dropped, "Daemon stopped");
    }
}
