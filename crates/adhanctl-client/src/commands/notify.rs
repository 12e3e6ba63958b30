//! `adhanctl notify`: one desktop notification for the next prayer.

use adhanctl_core::{format_clock, format_lunar_date, next_event_after};
use adhanctl_server::{DesktopNotifier, Notifier, PrayerNotification};
use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::error::{ClientError, ClientResult};

use super::{Day, fetch_day};

pub async fn run(config: &Config) -> ClientResult<()> {
    let day = fetch_day(config).await?;
    let message = notify_next(&day, config, Utc::now(), &DesktopNotifier::new())?;
    println!("Sent notification: {}", message);
    Ok(())
}

/// Shows the notification for the next prayer and returns a summary line.
pub fn notify_next(
    day: &Day,
    config: &Config,
    now: DateTime<Utc>,
    notifier: &dyn Notifier,
) -> ClientResult<String> {
    let next = next_event_after(&day.events, now).ok_or(ClientError::NoUpcoming)?;
    let display = config.display.options();
    let lunar = format_lunar_date(day.hijri(), display.arabic);

    let notification = PrayerNotification::for_event(&next, &lunar, display.twelve_hour);
    notifier.notify(&notification.title, &notification.body)?;

    Ok(format!(
        "{} at {}",
        next.prayer,
        format_clock(&next.instant, display.twelve_hour)
    ))
}
