//! Engine parameter configuration with TOML file support.
//!
//! All parameters have defaults matching EASA FTL conventions (WOCL window)
//! and the adaptation rates used by the upstream fatigue model, so a default
//! `ChronogramParams` is always usable without a config file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Low-alertness window settings, expressed in home-base clock time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WoclSettings {
    /// Start of the window, decimal hour of day
    #[serde(default = "default_wocl_start_hour")]
    pub start_hour: f64,
    /// Window length in hours
    #[serde(default = "default_wocl_duration_hours")]
    pub duration_hours: f64,
}

/// Circadian adaptation rates for timezone shifts.
///
/// Westward adaptation (phase delay) is faster than eastward (phase advance).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptationRates {
    #[serde(default = "default_westward_rate")]
    pub westward_hours_per_day: f64,
    #[serde(default = "default_eastward_rate")]
    pub eastward_hours_per_day: f64,
    /// Accumulated shift is clamped to ± this bound
    #[serde(default = "default_max_shift")]
    pub max_shift_hours: f64,
}

/// Deduplication settings for positionally identical bars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupSettings {
    /// Decimal places of an hour used in the positional key
    /// (2 places is a tolerance of roughly 36 seconds)
    #[serde(default = "default_tolerance_decimals")]
    pub tolerance_decimals: u32,
}

/// Thresholds behind the free-text row-label warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningThresholds {
    /// Prior sleep below this flags "low prior sleep"
    #[serde(default = "default_low_prior_sleep")]
    pub low_prior_sleep_hours: f64,
    /// WOCL encroachment above this flags "high WOCL exposure"
    #[serde(default = "default_high_wocl")]
    pub high_wocl_hours: f64,
}

/// Engine parameters for the chronogram transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChronogramParams {
    #[serde(default)]
    pub wocl: WoclSettings,
    #[serde(default)]
    pub adaptation: AdaptationRates,
    #[serde(default)]
    pub dedup: DedupSettings,
    #[serde(default)]
    pub warnings: WarningThresholds,
}

fn default_wocl_start_hour() -> f64 {
    2.0
}

fn default_wocl_duration_hours() -> f64 {
    4.0
}

fn default_westward_rate() -> f64 {
    1.5
}

fn default_eastward_rate() -> f64 {
    1.0
}

fn default_max_shift() -> f64 {
    12.0
}

fn default_tolerance_decimals() -> u32 {
    2
}

fn default_low_prior_sleep() -> f64 {
    5.0
}

fn default_high_wocl() -> f64 {
    2.0
}

impl Default for WoclSettings {
    fn default() -> Self {
        Self {
            start_hour: default_wocl_start_hour(),
            duration_hours: default_wocl_duration_hours(),
        }
    }
}

impl Default for AdaptationRates {
    fn default() -> Self {
        Self {
            westward_hours_per_day: default_westward_rate(),
            eastward_hours_per_day: default_eastward_rate(),
            max_shift_hours: default_max_shift(),
        }
    }
}

impl Default for DedupSettings {
    fn default() -> Self {
        Self {
            tolerance_decimals: default_tolerance_decimals(),
        }
    }
}

impl Default for WarningThresholds {
    fn default() -> Self {
        Self {
            low_prior_sleep_hours: default_low_prior_sleep(),
            high_wocl_hours: default_high_wocl(),
        }
    }
}

impl Default for ChronogramParams {
    fn default() -> Self {
        Self {
            wocl: WoclSettings::default(),
            adaptation: AdaptationRates::default(),
            dedup: DedupSettings::default(),
            warnings: WarningThresholds::default(),
        }
    }
}

impl ChronogramParams {
    /// Load parameters from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse parameters from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let params: ChronogramParams = toml::from_str(contents)?;
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..24.0).contains(&self.wocl.start_hour) {
            return Err(ConfigError::Invalid(format!(
                "wocl.start_hour {} outside [0, 24)",
                self.wocl.start_hour
            )));
        }
        if self.wocl.duration_hours <= 0.0 || self.wocl.duration_hours > 24.0 {
            return Err(ConfigError::Invalid(format!(
                "wocl.duration_hours {} outside (0, 24]",
                self.wocl.duration_hours
            )));
        }
        if self.adaptation.westward_hours_per_day <= 0.0
            || self.adaptation.eastward_hours_per_day <= 0.0
        {
            return Err(ConfigError::Invalid(
                "adaptation rates must be positive".to_string(),
            ));
        }
        if self.adaptation.max_shift_hours <= 0.0 {
            return Err(ConfigError::Invalid(
                "adaptation.max_shift_hours must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let params = ChronogramParams::default();
        assert_eq!(params.wocl.start_hour, 2.0);
        assert_eq!(params.wocl.duration_hours, 4.0);
        assert_eq!(params.adaptation.westward_hours_per_day, 1.5);
        assert_eq!(params.adaptation.eastward_hours_per_day, 1.0);
        assert_eq!(params.adaptation.max_shift_hours, 12.0);
        assert_eq!(params.dedup.tolerance_decimals, 2);
        assert!(
            params.adaptation.westward_hours_per_day > params.adaptation.eastward_hours_per_day,
            "westward adaptation should outpace eastward"
        );
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let params = ChronogramParams::from_toml_str("").unwrap();
        assert_eq!(params.wocl.start_hour, 2.0);
        assert_eq!(params.warnings.low_prior_sleep_hours, 5.0);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let toml_str = r#"
            [adaptation]
            westward_hours_per_day = 1.0
            eastward_hours_per_day = 0.7

            [dedup]
            tolerance_decimals = 3
        "#;
        let params = ChronogramParams::from_toml_str(toml_str).unwrap();
        assert_eq!(params.adaptation.westward_hours_per_day, 1.0);
        assert_eq!(params.adaptation.eastward_hours_per_day, 0.7);
        assert_eq!(params.adaptation.max_shift_hours, 12.0);
        assert_eq!(params.dedup.tolerance_decimals, 3);
        assert_eq!(params.wocl.start_hour, 2.0);
    }

    #[test]
    fn test_invalid_wocl_window_rejected() {
        let toml_str = r#"
            [wocl]
            start_hour = 26.0
        "#;
        assert!(matches!(
            ChronogramParams::from_toml_str(toml_str),
            Err(ConfigError::Invalid(_))
        ));

        let toml_str = r#"
            [wocl]
            duration_hours = 0.0
        "#;
        assert!(ChronogramParams::from_toml_str(toml_str).is_err());
    }

    #[test]
    fn test_invalid_rates_rejected() {
        let toml_str = r#"
            [adaptation]
            eastward_hours_per_day = -1.0
        "#;
        assert!(ChronogramParams::from_toml_str(toml_str).is_err());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(matches!(
            ChronogramParams::from_toml_str("wocl = nonsense"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_toml_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[wocl]\nstart_hour = 3.0\nduration_hours = 4.0\n"
        )
        .unwrap();

        let params = ChronogramParams::from_toml_file(file.path()).unwrap();
        assert_eq!(params.wocl.start_hour, 3.0);
    }

    #[test]
    fn test_from_toml_file_missing() {
        let result = ChronogramParams::from_toml_file("/nonexistent/params.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
