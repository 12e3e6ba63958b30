//! `adhanctl waybar`: one JSON line for a Waybar custom module.
//!
//! Waybar polls this unconditionally, so every failure is rendered as a
//! record and the command always succeeds.

use adhanctl_core::{OutputFormatter, WaybarOutput};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};

use super::{Day, fetch_day};

const CONFIG_ERROR: &str = "adhanctl: config error";
const NO_LOCATION: &str = "adhanctl: no location";
const FETCH_ERROR: &str = "adhanctl: error";

/// Prints the status line record for `config`, or for the error that
/// prevented loading it.
pub async fn run(config: ClientResult<Config>, short: bool) {
    let output = match config {
        Ok(config) => match fetch_day(&config).await {
            Ok(day) => render(&day, &config, short, Utc::now()),
            Err(e) => failure(&e),
        },
        Err(e) => failure(&e),
    };
    println!("{}", to_json(&output));
}

/// Builds the record for a fetched day.
pub fn render(day: &Day, config: &Config, short: bool, now: DateTime<Utc>) -> WaybarOutput {
    let mut options = config.display.options();
    options.short |= short;
    OutputFormatter::new(options).format_waybar_at(&day.events, day.hijri(), now)
}

/// Maps an error to a record with a short label and the details on hover.
pub fn failure(err: &ClientError) -> WaybarOutput {
    debug!(error = %err, "Rendering failure for waybar");
    let label = match err {
        ClientError::Config(_) => CONFIG_ERROR,
        ClientError::NoLocation => NO_LOCATION,
        _ => FETCH_ERROR,
    };
    WaybarOutput::failure(label, err)
}

fn to_json(output: &WaybarOutput) -> String {
    serde_json::to_string(output).unwrap_or_else(|e| {
        debug!(error = %e, "Failed to encode waybar output");
        format!(r#"{{"text":"{}"}}"#, FETCH_ERROR)
    })
}
