use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;
use tracing::warn;

use super::platform;

/// Radio Classics publishes its grid in Eastern time.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Where `schedule.json` comes from: an http(s):// URL or a local file path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_location")]
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// IANA name of the timezone the schedule is published in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// How often "now playing" is re-evaluated.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before the filter runs.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_preferences_file")]
    pub preferences_file: PathBuf,
    /// Output of the `render` subcommand.
    #[serde(default = "default_html_out")]
    pub html_out: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            refresh_secs: default_refresh_secs(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            preferences_file: default_preferences_file(),
            html_out: default_html_out(),
        }
    }
}

fn default_location() -> String {
    "schedule.json".to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.name().to_string()
}

fn default_refresh_secs() -> u64 {
    60
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_preferences_file() -> PathBuf {
    platform::data_dir().join("preferences.toml")
}

fn default_html_out() -> PathBuf {
    PathBuf::from("schedule.html")
}

impl ClockConfig {
    /// Configured timezone, or the station default when the name is unknown.
    pub fn tz(&self) -> Tz {
        match self.timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                warn!(
                    "unknown timezone {:?}, falling back to {}",
                    self.timezone,
                    DEFAULT_TIMEZONE.name()
                );
                DEFAULT_TIMEZONE
            }
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source.location, "schedule.json");
        assert_eq!(config.clock.timezone, "America/New_York");
        assert_eq!(config.clock.refresh_interval(), Duration::from_secs(60));
        assert_eq!(config.search.debounce(), Duration::from_millis(300));
        assert!(config
            .paths
            .preferences_file
            .ends_with("radio-schedule/preferences.toml"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [clock]
            timezone = "America/Los_Angeles"
            "#,
        )
        .unwrap();
        assert_eq!(config.clock.tz(), chrono_tz::America::Los_Angeles);
        assert_eq!(config.clock.refresh_secs, 60);
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.source.location, "schedule.json");
    }

    #[test]
    fn test_unknown_timezone_falls_back() {
        let clock = ClockConfig {
            timezone: "Mars/Olympus_Mons".into(),
            refresh_secs: 0,
        };
        assert_eq!(clock.tz(), DEFAULT_TIMEZONE);
        assert_eq!(clock.refresh_interval(), Duration::from_secs(1));
    }
}
