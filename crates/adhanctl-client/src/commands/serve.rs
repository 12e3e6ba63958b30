//! `adhanctl serve`: the notification daemon in the foreground.
//!
//! Wires the cached AlAdhan source and desktop notifications into the
//! scheduler, then runs until SIGTERM/SIGINT. SIGHUP refreshes immediately.

use std::sync::Arc;

use adhanctl_server::{Daemon, DaemonConfig, DesktopNotifier, SignalHandler};
use tracing::info;

use crate::config::Config;
use crate::error::ClientResult;

use super::build_source;

/// Runs the daemon until a shutdown signal arrives.
pub async fn run(config: &Config) -> ClientResult<()> {
    let source = build_source(config)?;
    let daemon_config = daemon_config(config);

    let signals = SignalHandler::new();
    signals.spawn_listener()?;

    let location = config.location.resolve()?;
    info!(%location, "Starting daemon");
    let daemon = Daemon::new(daemon_config, Arc::new(source), Arc::new(DesktopNotifier::new()));
    daemon.run(signals.shutdown(), signals.reload()).await;
    Ok(())
}

/// Daemon settings from the merged configuration.
pub fn daemon_config(config: &Config) -> DaemonConfig {
    DaemonConfig::new(config.daemon.interval()).with_display(config.display.options())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adhanctl_server::MIN_INTERVAL;
    use std::time::Duration;

    #[test]
    fn interval_comes_from_config() {
        let mut config = Config::default();
        config.daemon.interval_secs = 120;
        config.display.ampm = true;

        let daemon = daemon_config(&config);
        assert_eq!(daemon.interval(), Duration::from_secs(120));
        assert!(daemon.display().twelve_hour);
    }

    #[test]
    fn short_interval_is_raised() {
        let mut config = Config::default();
        config.daemon.interval_secs = 2;
        assert_eq!(daemon_config(&config).interval(), MIN_INTERVAL);
    }
}
