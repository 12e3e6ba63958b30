//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/adhanctl/config.toml` by default:
//!
//! ```toml
//! [location]
//! city = "London"
//! country = "UK"
//!
//! [calculation]
//! method = 3
//! school = 0
//!
//! [display]
//! ampm = false
//! arabic = false
//! short = false
//!
//! [cache]
//! ttl_secs = 21600
//!
//! [daemon]
//! interval_secs = 60
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use adhanctl_core::DisplayOptions;
use adhanctl_providers::{DEFAULT_METHOD, Location, method_name, school_name};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ConfigError};

/// Name of the configuration directory under the user config directory.
pub const CONFIG_DIR_NAME: &str = "adhanctl";

/// Configuration for adhanctl.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub location: LocationSettings,
    pub calculation: CalculationSettings,
    pub display: DisplaySettings,
    pub cache: CacheSettings,
    pub daemon: DaemonSettings,
}

/// Where to compute prayer times for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Takes precedence over city and country together with `longitude`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl LocationSettings {
    /// Returns the location to query.
    ///
    /// Coordinates win when both are set and non-zero; otherwise both city
    /// and country must be non-empty.
    pub fn resolve(&self) -> Result<Location, ClientError> {
        if let (Some(lat), Some(lon)) = (self.latitude, self.longitude)
            && lat != 0.0
            && lon != 0.0
        {
            return Ok(Location::coordinates(lat, lon));
        }

        match (non_empty(&self.city), non_empty(&self.country)) {
            (Some(city), Some(country)) => Ok(Location::city(city, country)),
            _ => Err(ClientError::NoLocation),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Calculation method and Asr school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationSettings {
    /// AlAdhan calculation method id.
    pub method: u8,
    /// 0 = Shafi, 1 = Hanafi.
    pub school: u8,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        Self {
            method: DEFAULT_METHOD,
            school: 0,
        }
    }
}

impl CalculationSettings {
    pub fn method_name(&self) -> &'static str {
        method_name(self.method).unwrap_or("unknown")
    }

    pub fn school_name(&self) -> &'static str {
        school_name(self.school).unwrap_or("unknown")
    }
}

/// Display settings for output formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// 12-hour clock.
    pub ampm: bool,
    /// Arabic month and weekday names.
    pub arabic: bool,
    /// Status line text without the countdown.
    pub short: bool,
}

impl DisplaySettings {
    pub fn options(&self) -> DisplayOptions {
        DisplayOptions {
            twelve_hour: self.ampm,
            arabic: self.arabic,
            short: self.short,
        }
    }
}

/// Response cache settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Seconds a cached time table stays fresh. 0 disables cache reads.
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_secs: 21_600 }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// `adhanctl serve` settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonSettings {
    /// Seconds between refreshes. Values under 10 are raised to 10.
    pub interval_secs: u64,
}

impl Default for DaemonSettings {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

impl DaemonSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Config {
    /// Loads configuration from the default path, or defaults if the file
    /// does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Loads `path` if given, the default file otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Writes the configuration, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks ids against the known method and school tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if method_name(self.calculation.method).is_none() {
            return Err(ConfigError::invalid(
                "method",
                format!("unknown calculation method {}", self.calculation.method),
            ));
        }
        if school_name(self.calculation.school).is_none() {
            return Err(ConfigError::invalid(
                "school",
                format!("unknown school {}", self.calculation.school),
            ));
        }
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.calculation.method, 3);
        assert_eq!(config.calculation.school, 0);
        assert_eq!(config.cache.ttl(), Duration::from_secs(6 * 60 * 60));
        assert_eq!(config.daemon.interval(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[location]
city = "Cairo"
country = "Egypt"

[display]
ampm = true
"#,
        )
        .unwrap();

        assert_eq!(config.location.city.as_deref(), Some("Cairo"));
        assert!(config.display.ampm);
        assert!(!config.display.arabic);
        assert_eq!(config.calculation.method, 3);
        assert_eq!(config.cache.ttl_secs, 21_600);
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.location.latitude = Some(21.4225);
        config.location.longitude = Some(39.8262);
        config.calculation.method = 4;
        config.display.arabic = true;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn missing_explicit_file_errors() {
        let dir = TempDir::new().unwrap();
        let err = Config::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn bad_toml_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[calculation]\nmethod = \"three\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn validate_rejects_unknown_ids() {
        let mut config = Config::default();
        config.calculation.method = 6;
        assert!(config.validate().is_err());

        config.calculation.method = 2;
        config.calculation.school = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn names_for_show() {
        let config = Config::default();
        assert_eq!(config.calculation.method_name(), "Muslim World League");
        assert_eq!(config.calculation.school_name(), "Shafi");
    }

    mod location {
        use super::*;

        fn settings(
            city: Option<&str>,
            country: Option<&str>,
            lat: Option<f64>,
            lon: Option<f64>,
        ) -> LocationSettings {
            LocationSettings {
                city: city.map(String::from),
                country: country.map(String::from),
                latitude: lat,
                longitude: lon,
            }
        }

        #[test]
        fn coordinates_take_precedence() {
            let loc = settings(Some("London"), Some("UK"), Some(51.5), Some(-0.12))
                .resolve()
                .unwrap();
            assert_eq!(loc, Location::coordinates(51.5, -0.12));
        }

        #[test]
        fn zero_coordinate_falls_back_to_city() {
            let loc = settings(Some("Accra"), Some("Ghana"), Some(5.6), Some(0.0))
                .resolve()
                .unwrap();
            assert_eq!(loc, Location::city("Accra", "Ghana"));
        }

        #[test]
        fn city_needs_country() {
            let err = settings(Some("London"), None, None, None).resolve().unwrap_err();
            assert!(matches!(err, ClientError::NoLocation));

            let err = settings(Some("London"), Some("  "), None, None)
                .resolve()
                .unwrap_err();
            assert!(matches!(err, ClientError::NoLocation));
        }

        #[test]
        fn nothing_configured() {
            assert!(matches!(
                LocationSettings::default().resolve(),
                Err(ClientError::NoLocation)
            ));
        }
    }
}
