//! Local user settings
//!
//! A small key-value record (currency, theme, default budget ceiling, two
//! notification flags) persisted as TOML under the platform config
//! directory. Not part of the core's testable contract, but the budget
//! evaluator consumes the ceiling and display code consumes the currency.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::DEFAULT_CURRENCY;

/// UI theme tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" => Ok(Self::Auto),
            _ => Err(format!("Unknown theme: {} (valid: light, dark, auto)", s)),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User preferences persisted between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Display currency code
    pub currency: String,
    pub theme: Theme,
    /// Default ceiling for the budget meter
    pub monthly_budget: f64,
    /// Warn when approaching the budget limit
    pub budget_alerts: bool,
    /// Email reminders for due bills
    pub email_reminders: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            theme: Theme::Light,
            monthly_budget: 100.0,
            budget_alerts: true,
            email_reminders: false,
        }
    }
}

impl UserSettings {
    /// Settings file at the platform default location
    /// (`<config dir>/billow/settings.toml`)
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::Settings("could not determine config directory".to_string()))?;
        Ok(dir.join("billow").join("settings.toml"))
    }

    /// Load settings from a file, falling back to defaults when the file
    /// does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .map_err(|e| Error::Settings(format!("invalid settings file: {}", e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist settings, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Settings(format!("could not serialize settings: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Apply a `key value` update from the CLI
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "currency" => self.currency = value.to_uppercase(),
            "theme" => {
                self.theme = value.parse().map_err(Error::Settings)?;
            }
            "monthly_budget" | "budget" => {
                let budget: f64 = value
                    .parse()
                    .map_err(|_| Error::Settings(format!("invalid budget: {}", value)))?;
                if !budget.is_finite() || budget < 0.0 {
                    return Err(Error::Settings("budget must be non-negative".to_string()));
                }
                self.monthly_budget = budget;
            }
            "budget_alerts" => {
                self.budget_alerts = parse_bool(value)?;
            }
            "email_reminders" => {
                self.email_reminders = parse_bool(value)?;
            }
            _ => {
                return Err(Error::Settings(format!(
                    "unknown setting: {} (valid: currency, theme, monthly_budget, budget_alerts, email_reminders)",
                    key
                )));
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(Error::Settings(format!("invalid boolean: {}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_settings_screen() {
        let settings = UserSettings::default();
        assert_eq!(settings.currency, "USD");
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.monthly_budget, 100.0);
        assert!(settings.budget_alerts);
        assert!(!settings.email_reminders);
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = UserSettings::load(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, UserSettings::default());
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let mut settings = UserSettings::default();
        settings.set("currency", "gbp").unwrap();
        settings.set("theme", "dark").unwrap();
        settings.set("budget", "250.5").unwrap();
        settings.set("email_reminders", "on").unwrap();
        settings.save(&path).unwrap();

        let reloaded = UserSettings::load(&path).unwrap();
        assert_eq!(reloaded.currency, "GBP");
        assert_eq!(reloaded.theme, Theme::Dark);
        assert_eq!(reloaded.monthly_budget, 250.5);
        assert!(reloaded.email_reminders);
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut settings = UserSettings::default();
        assert!(settings.set("frobnicate", "1").is_err());
        assert!(settings.set("budget", "-5").is_err());
        assert!(settings.set("theme", "solarized").is_err());
        assert!(settings.set("budget_alerts", "maybe").is_err());
    }

    #[test]
    fn partial_settings_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "currency = \"EUR\"\n").unwrap();

        let settings = UserSettings::load(&path).unwrap();
        assert_eq!(settings.currency, "EUR");
        assert_eq!(settings.monthly_budget, 100.0);
    }
}
