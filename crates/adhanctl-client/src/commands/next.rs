//! `adhanctl next`: the next prayer and the time left.

use adhanctl_core::OutputFormatter;

use crate::config::Config;
use crate::error::ClientResult;

use super::fetch_day;

/// Prints the next prayer. Nothing left today is not an error.
pub async fn run(config: &Config) -> ClientResult<()> {
    let day = fetch_day(config).await?;
    let formatter = OutputFormatter::new(config.display.options());
    println!("{}", formatter.format_next(&day.events, day.hijri()));
    Ok(())
}
