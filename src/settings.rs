/// Processing settings for the survey post-analysis layers.
///
/// The engine itself takes no configuration — its boundaries and formulae
/// are regulatory conventions. Settings cover only the supplemental layers:
/// anomaly/event detection thresholds, trend window, report rounding, and
/// logging. Loaded from a TOML file with sensible defaults for every field.

use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::logging::LogLevel;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Standard-deviation multiple beyond which a daily LAeq counts as
    /// anomalous.
    pub anomaly_threshold_sigma: f64,
    /// Daytime LAmax level above which a date is flagged as an exceedance
    /// event. `None` disables event detection.
    pub event_threshold_db: Option<f64>,
    /// Window length for the daily moving-average trend, in days.
    pub trend_window_days: usize,
    /// Decimal places for rendered report values.
    pub report_decimals: usize,
    /// Minimum severity to log: "debug", "info", "warning", or "error".
    pub log_level: String,
    /// Optional log file path; console-only when absent.
    pub log_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            anomaly_threshold_sigma: 2.0,
            event_threshold_db: None,
            trend_window_days: 7,
            report_decimals: 1,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SettingsError::Io(path.as_ref().display().to_string(), e))?;
        Self::parse(&text)
    }

    /// Parses settings from TOML text. Unknown keys are rejected so a typo
    /// in a threshold name fails loudly instead of silently using defaults.
    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        toml::from_str(text).map_err(SettingsError::Parse)
    }

    /// The configured minimum log level. Unrecognized names fall back to
    /// Info rather than failing a run over a logging preference.
    pub fn min_log_level(&self) -> LogLevel {
        match self.log_level.to_ascii_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "warning" | "warn" => LogLevel::Warning,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can arise when loading the settings file.
#[derive(Debug)]
pub enum SettingsError {
    /// The file could not be read.
    Io(String, std::io::Error),
    /// The file contents are not valid settings TOML.
    Parse(toml::de::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(path, e) => write!(f, "Failed to read settings file {}: {}", path, e),
            SettingsError::Parse(e) => write!(f, "Invalid settings file: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
