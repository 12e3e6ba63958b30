//! Configuration commands.

use std::fmt::Write as _;
use std::path::Path;

use crate::config::Config;
use crate::error::ClientResult;
use crate::wizard::{Interactor, run_config_init};

/// Runs the setup wizard and saves the result to `path`.
pub fn init(path: &Path, ui: &mut dyn Interactor) -> ClientResult<Config> {
    // An unreadable file is replaced.
    let existing = if path.exists() {
        Config::load_from(path).unwrap_or_default()
    } else {
        Config::default()
    };

    let config = run_config_init(ui, &existing)?;
    config.save_to(path)?;

    ui.say("")?;
    ui.say(&format!("Configuration saved to {}", path.display()))?;
    ui.say("")?;
    ui.say("You can now run:")?;
    ui.say("  adhanctl today  - View today's schedule")?;
    ui.say("  adhanctl serve  - Run background notifier")?;
    ui.say("  adhanctl waybar - Output for Waybar")?;
    Ok(config)
}

/// Prints the resolved configuration.
pub fn show(path: &Path, config: &Config) -> ClientResult<()> {
    print!("{}", render_show(path, config));
    Ok(())
}

/// Prints the configuration file path.
pub fn path(path: &Path) -> ClientResult<()> {
    println!("{}", path.display());
    Ok(())
}

fn render_show(path: &Path, config: &Config) -> String {
    let mut out = String::new();
    let loc = &config.location;
    let calc = &config.calculation;

    // Writing to a String cannot fail.
    let _ = writeln!(out, "Config file: {}\n", path.display());
    let _ = writeln!(out, "Current configuration:");
    if let Some(city) = loc.city.as_deref().filter(|c| !c.is_empty()) {
        let _ = writeln!(out, "  City:      {}", city);
    }
    if let Some(country) = loc.country.as_deref().filter(|c| !c.is_empty()) {
        let _ = writeln!(out, "  Country:   {}", country);
    }
    if let Some(lat) = loc.latitude.filter(|v| *v != 0.0) {
        let _ = writeln!(out, "  Latitude:  {:.6}", lat);
    }
    if let Some(lon) = loc.longitude.filter(|v| *v != 0.0) {
        let _ = writeln!(out, "  Longitude: {:.6}", lon);
    }
    let _ = writeln!(out, "  Method:    {} ({})", calc.method, calc.method_name());
    let _ = writeln!(out, "  School:    {} ({})", calc.school, calc.school_name());
    let _ = writeln!(out, "  12-hour:   {}", config.display.ampm);
    let _ = writeln!(out, "  Arabic:    {}", config.display.arabic);
    let _ = writeln!(out, "  Short:     {}", config.display.short);
    let _ = writeln!(out, "  Cache:     {} seconds", config.cache.ttl_secs);
    let _ = writeln!(out, "  Interval:  {} seconds", config.daemon.interval_secs);
    out
}
