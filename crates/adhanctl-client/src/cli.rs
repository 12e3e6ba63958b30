//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

/// adhanctl - Prayer times for the terminal, Waybar and desktop notifications
#[derive(Debug, Parser)]
#[command(name = "adhanctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, env = "ADHANCTL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    // --- Location flags ---
    /// City name
    #[arg(long, short = 'c', global = true)]
    pub city: Option<String>,

    /// Country name
    #[arg(long, short = 'C', global = true)]
    pub country: Option<String>,

    /// Latitude (takes precedence over city)
    #[arg(
        long = "lat",
        visible_alias = "latitude",
        global = true,
        allow_negative_numbers = true
    )]
    pub latitude: Option<f64>,

    /// Longitude (takes precedence over city)
    #[arg(
        long = "lon",
        visible_alias = "longitude",
        global = true,
        allow_negative_numbers = true
    )]
    pub longitude: Option<f64>,

    // --- Calculation flags ---
    /// Calculation method (see `adhanctl config show`)
    #[arg(long, short = 'm', global = true)]
    pub method: Option<u8>,

    /// Asr school: 0=Shafi, 1=Hanafi
    #[arg(long, short = 's', global = true, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub school: Option<u8>,

    // --- Display flags ---
    /// Use 12-hour format
    #[arg(long, global = true)]
    pub ampm: bool,

    /// Display the Hijri date in Arabic
    #[arg(long = "ar", global = true)]
    pub arabic: bool,

    /// Refresh interval for serve, in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub interval: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the command to run; `today` when none is given.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Today)
    }

    /// Overrides file settings with the flags that were given.
    pub fn apply_to(&self, config: &mut Config) {
        let location = &mut config.location;
        if let Some(city) = &self.city {
            location.city = Some(city.clone());
        }
        if let Some(country) = &self.country {
            location.country = Some(country.clone());
        }
        if let Some(lat) = self.latitude {
            location.latitude = Some(lat);
        }
        if let Some(lon) = self.longitude {
            location.longitude = Some(lon);
        }

        if let Some(method) = self.method {
            config.calculation.method = method;
        }
        if let Some(school) = self.school {
            config.calculation.school = school;
        }

        // Boolean flags can only switch options on.
        config.display.ampm |= self.ampm;
        config.display.arabic |= self.arabic;

        if let Some(secs) = self.interval {
            config.daemon.interval_secs = secs;
        }
    }
}

/// Available commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show today's prayer schedule (default)
    Today,

    /// Show the next prayer with a countdown
    Next,

    /// Send a desktop notification for the next prayer
    Notify,

    /// Run the background notifier daemon
    Serve,

    /// Output JSON for a Waybar custom module
    Waybar {
        /// Leave the countdown out of the bar text
        #[arg(long)]
        short: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ConfigAction {
    /// Interactive first-time setup
    Init,

    /// Show the resolved configuration
    Show,

    /// Show the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("adhanctl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn definition_is_valid() {
        <Cli as CommandFactory>::command().debug_assert();
    }

    #[test]
    fn defaults_to_today() {
        let cli = parse(&[]);
        assert_eq!(cli.resolved_command(), Command::Today);
        assert!(!cli.verbose);
    }

    #[test]
    fn flags_after_subcommand() {
        let cli = parse(&["waybar", "--short", "-c", "Cairo", "-C", "Egypt", "--ampm"]);
        assert_eq!(cli.resolved_command(), Command::Waybar { short: true });
        assert_eq!(cli.city.as_deref(), Some("Cairo"));
        assert_eq!(cli.country.as_deref(), Some("Egypt"));
        assert!(cli.ampm);
    }

    #[test]
    fn negative_coordinates() {
        let cli = parse(&["next", "--lat", "51.5074", "--lon", "-0.1278"]);
        assert_eq!(cli.latitude, Some(51.5074));
        assert_eq!(cli.longitude, Some(-0.1278));

        let cli = parse(&["--latitude", "-33.9", "--longitude", "18.4"]);
        assert_eq!(cli.latitude, Some(-33.9));
    }

    #[test]
    fn school_is_range_checked() {
        let args = ["adhanctl", "-s", "2"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn config_actions() {
        assert_eq!(
            parse(&["config", "show"]).resolved_command(),
            Command::Config {
                action: ConfigAction::Show
            }
        );
        assert_eq!(
            parse(&["config", "init", "-v"]).resolved_command(),
            Command::Config {
                action: ConfigAction::Init
            }
        );
    }

    mod overrides {
        use super::*;

        #[test]
        fn flags_override_file() {
            let mut config = Config::default();
            config.location.city = Some("London".into());
            config.location.country = Some("UK".into());
            config.calculation.method = 2;

            parse(&["-c", "Paris", "-C", "France", "-m", "12", "-s", "1", "--ar", "--interval", "30"])
                .apply_to(&mut config);

            assert_eq!(config.location.city.as_deref(), Some("Paris"));
            assert_eq!(config.location.country.as_deref(), Some("France"));
            assert_eq!(config.calculation.method, 12);
            assert_eq!(config.calculation.school, 1);
            assert!(config.display.arabic);
            assert_eq!(config.daemon.interval_secs, 30);
        }

        #[test]
        fn absent_flags_keep_file_values() {
            let mut config = Config::default();
            config.location.latitude = Some(21.4);
            config.display.ampm = true;
            let before = config.clone();

            parse(&["today"]).apply_to(&mut config);
            assert_eq!(config, before);
        }
    }
}
