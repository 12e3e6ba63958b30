//! Desktop notifications for prayer times.
//!
//! The daemon talks to a [`Notifier`]; [`DesktopNotifier`] shows the message
//! through the freedesktop notification service. Delivery is best-effort:
//! callers log failures and carry on.

use std::time::Duration;

use adhanctl_core::{PrayerEvent, format_clock};
use notify_rust::Notification;
use tracing::{debug, info};

use crate::error::NotifyError;

/// Something that can show a title and a body to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// Notifications via `notify-rust`.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    /// Application name for notifications.
    pub app_name: String,
    /// How long the notification stays up.
    pub timeout: Duration,
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self {
            app_name: "adhanctl".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set application name.
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Builder: set timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        debug!(title, "Sending notification");

        let mut notification = Notification::new();
        notification
            .appname(&self.app_name)
            .summary(title)
            .body(body)
            .timeout(self.timeout);

        notification
            .show()
            .map(|_| info!(title, "Notification sent"))
            .map_err(|e| NotifyError::new(e.to_string()))
    }
}

/// Title and body of a prayer notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerNotification {
    pub title: String,
    pub body: String,
}

impl PrayerNotification {
    /// Builds the message for `event`. The lunar line is left out when empty.
    pub fn for_event(event: &PrayerEvent, lunar: &str, twelve_hour: bool) -> Self {
        let clock = format_clock(&event.instant, twelve_hour);
        let line = format!("{} at {}", event.prayer, clock);
        let body = if lunar.is_empty() {
            line
        } else {
            format!("{}\n{}", lunar, line)
        };
        Self {
            title: format!("🕌 {}", event.prayer),
            body,
        }
    }

    /// Shows the notification, logging rather than returning failures.
    pub fn send(&self, notifier: &dyn Notifier) -> bool {
        match notifier.notify(&self.title, &self.body) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, title = %self.title, "Failed to send notification");
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records every notification instead of showing it.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        pub sent: Mutex<Vec<(String, String)>>,
        pub fail: bool,
    }

    impl RecordingNotifier {
        pub fn count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }

        pub fn titles(&self) -> Vec<String> {
            self.sent.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
            self.sent
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
            if self.fail {
                Err(NotifyError::new("no notification daemon"))
            } else {
                Ok(())
            }
        }
    }
}
