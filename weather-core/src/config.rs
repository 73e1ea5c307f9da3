use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_FORECAST_DAYS: u8 = 3;
/// weatherapi.com serves at most 14 forecast days.
pub const MAX_FORECAST_DAYS: u8 = 14;

fn default_forecast_days() -> u8 {
    DEFAULT_FORECAST_DAYS
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_location = "London"
/// forecast_days = 3
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,

    /// Used when no location is given on the command line.
    pub default_location: Option<String>,

    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// Overrides the weatherapi.com endpoint, e.g. for a proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_location: None,
            forecast_days: DEFAULT_FORECAST_DAYS,
            base_url: None,
        }
    }
}

impl Config {
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `weather configure` and enter your weatherapi.com key."
            )
        })
    }

    /// Pick the explicit location, falling back to the configured default.
    pub fn resolve_location(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .filter(|l| !l.trim().is_empty())
            .or_else(|| self.default_location.clone())
            .ok_or_else(|| {
                anyhow!(
                    "No location given and no default location configured.\n\
                     Hint: pass a location or run `weather configure`."
                )
            })
    }

    /// Forecast length clamped to what the API accepts.
    pub fn forecast_days(&self) -> u8 {
        self.forecast_days.clamp(1, MAX_FORECAST_DAYS)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_key().unwrap_err();
        assert!(err.to_string().contains("No API key configured"));

        let cfg = Config { api_key: Some("  ".into()), ..Config::default() };
        assert!(cfg.api_key().is_err());
    }

    #[test]
    fn explicit_location_wins_over_default() {
        let cfg = Config { default_location: Some("Oslo".into()), ..Config::default() };
        assert_eq!(cfg.resolve_location(Some("Rome".into())).unwrap(), "Rome");
        assert_eq!(cfg.resolve_location(None).unwrap(), "Oslo");
        assert_eq!(cfg.resolve_location(Some("".into())).unwrap(), "Oslo");
    }

    #[test]
    fn missing_location_has_hint() {
        let err = Config::default().resolve_location(None).unwrap_err();
        assert!(err.to_string().contains("weather configure"));
    }

    #[test]
    fn forecast_days_default_and_clamp() {
        let cfg = Config::from_toml("api_key = \"K\"").unwrap();
        assert_eq!(cfg.forecast_days(), DEFAULT_FORECAST_DAYS);

        let cfg = Config { forecast_days: 0, ..Config::default() };
        assert_eq!(cfg.forecast_days(), 1);

        let cfg = Config { forecast_days: 30, ..Config::default() };
        assert_eq!(cfg.forecast_days(), MAX_FORECAST_DAYS);
    }

    #[test]
    fn toml_roundtrip_keeps_fields() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            default_location: Some("London".into()),
            forecast_days: 5,
            base_url: None,
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert!(!text.contains("base_url"));

        let back = Config::from_toml(&text).unwrap();
        assert_eq!(back.api_key.as_deref(), Some("KEY"));
        assert_eq!(back.default_location.as_deref(), Some("London"));
        assert_eq!(back.forecast_days, 5);
    }
}
