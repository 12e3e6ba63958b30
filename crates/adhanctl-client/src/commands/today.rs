//! `adhanctl today`: the day's schedule.

use adhanctl_core::OutputFormatter;

use crate::config::Config;
use crate::error::ClientResult;

use super::fetch_day;

pub async fn run(config: &Config) -> ClientResult<()> {
    let day = fetch_day(config).await?;
    let formatter = OutputFormatter::new(config.display.options());
    println!("{}", formatter.format_schedule(&day.events, day.hijri()));
    Ok(())
}
