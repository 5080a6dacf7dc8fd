//! TOML-based planner configuration.
//!
//! Stores tuning for the day planner:
//! - Dosha phase length
//! - Work minutes between grounding prompts
//! - Micro-break length and per-stress break thresholds
//!
//! Configuration is stored at `~/.config/dinacharya/config.toml`. Untouched,
//! every value reproduces the planner's built-in constants.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::distributor::DistributorConfig;
use crate::dosha::DEFAULT_PHASE_LENGTH_MINUTES;
use crate::error::ConfigError;
use crate::interventions::{InjectorConfig, DEFAULT_INTERVENTION_INTERVAL_MINUTES};
use crate::task::BreakThresholds;
use crate::time::{Minutes, MINUTES_PER_DAY};

/// Returns `~/.config/dinacharya[-dev]/` based on DINACHARYA_ENV.
///
/// Set DINACHARYA_ENV=dev to use the development directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DINACHARYA_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("dinacharya-dev")
    } else {
        base_dir.join("dinacharya")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::NoConfigDir(e.to_string()))?;
    Ok(dir)
}

/// Planner configuration.
///
/// Serialized to/from TOML at `~/.config/dinacharya/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_phase_length")]
    pub phase_length_minutes: Minutes,
    #[serde(default = "default_intervention_interval")]
    pub intervention_interval_minutes: Minutes,
    #[serde(default = "default_micro_break")]
    pub micro_break_minutes: Minutes,
    #[serde(default)]
    pub break_thresholds: BreakThresholds,
}

fn default_phase_length() -> Minutes {
    DEFAULT_PHASE_LENGTH_MINUTES
}
fn default_intervention_interval() -> Minutes {
    DEFAULT_INTERVENTION_INTERVAL_MINUTES
}
fn default_micro_break() -> Minutes {
    5
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            phase_length_minutes: default_phase_length(),
            intervention_interval_minutes: default_intervention_interval(),
            micro_break_minutes: default_micro_break(),
            break_thresholds: BreakThresholds::default(),
        }
    }
}

impl PlannerConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Number(_) => {
                        let n: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as a whole number of minutes"),
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) => {
                        return Err(ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: "is a section, set one of its keys instead".to_string(),
                        })
                    }
                    _ => serde_json::Value::String(value.to_string()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default config file location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default location, or return defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, or return defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };

        let cfg: PlannerConfig = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Load from disk, returning defaults on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: PlannerConfig =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject values that would stall the planner or reach past one day.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = &self.break_thresholds;
        let bounded = [
            ("phase_length_minutes", self.phase_length_minutes, 1),
            ("intervention_interval_minutes", self.intervention_interval_minutes, 1),
            ("micro_break_minutes", self.micro_break_minutes, 0),
            ("break_thresholds.low", thresholds.low, 0),
            ("break_thresholds.medium", thresholds.medium, 0),
            ("break_thresholds.high", thresholds.high, 0),
            ("break_thresholds.default", thresholds.default, 0),
        ];
        for (key, value, min) in bounded {
            if !(min..=MINUTES_PER_DAY).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("must be between {min} and {MINUTES_PER_DAY}"),
                });
            }
        }
        Ok(())
    }

    pub fn distributor_config(&self) -> DistributorConfig {
        DistributorConfig {
            break_thresholds: self.break_thresholds.clone(),
            micro_break_minutes: self.micro_break_minutes,
        }
    }

    pub fn injector_config(&self) -> InjectorConfig {
        InjectorConfig {
            interval_minutes: self.intervention_interval_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = PlannerConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PlannerConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = PlannerConfig::default();
        assert_eq!(cfg.phase_length_minutes, 240);
        assert_eq!(cfg.intervention_interval_minutes, 180);
        assert_eq!(cfg.micro_break_minutes, 5);
        assert_eq!(cfg.break_thresholds.low, 180);
        assert_eq!(cfg.break_thresholds.medium, 120);
        assert_eq!(cfg.break_thresholds.high, 60);
        assert_eq!(cfg.break_thresholds.default, 120);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: PlannerConfig = toml::from_str(
            r#"
            micro_break_minutes = 3

            [break_thresholds]
            high = 45
            "#,
        )
        .unwrap();
        assert_eq!(cfg.micro_break_minutes, 3);
        assert_eq!(cfg.break_thresholds.high, 45);
        assert_eq!(cfg.break_thresholds.low, 180);
        assert_eq!(cfg.intervention_interval_minutes, 180);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = PlannerConfig::default();
        assert_eq!(cfg.get("break_thresholds.high").as_deref(), Some("60"));
        assert_eq!(cfg.get("phase_length_minutes").as_deref(), Some("240"));
        assert!(cfg.get("break_thresholds.extreme").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_number() {
        let mut cfg = PlannerConfig::default();
        cfg.set("break_thresholds.low", "150").unwrap();
        assert_eq!(cfg.break_thresholds.low, 150);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = PlannerConfig::default();
        assert!(matches!(
            cfg.set("break_thresholds.extreme", "10"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("", "10"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_values() {
        let mut cfg = PlannerConfig::default();
        assert!(cfg.set("micro_break_minutes", "five").is_err());
        assert!(cfg.set("micro_break_minutes", "-1").is_err());
        assert!(cfg.set("break_thresholds", "10").is_err());
        assert!(cfg.set("intervention_interval_minutes", "0").is_err());
        assert_eq!(cfg, PlannerConfig::default());
    }

    #[test]
    fn set_rejects_values_beyond_one_day() {
        let mut cfg = PlannerConfig::default();
        assert!(matches!(
            cfg.set("phase_length_minutes", "2000000000"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(cfg.set("micro_break_minutes", "4294967295").is_err());
        assert!(cfg.set("intervention_interval_minutes", "1441").is_err());
        assert!(cfg.set("break_thresholds.default", "5000").is_err());
        assert_eq!(cfg, PlannerConfig::default());

        cfg.set("phase_length_minutes", "1440").unwrap();
        cfg.set("micro_break_minutes", "0").unwrap();
        assert_eq!(cfg.phase_length_minutes, 1440);
    }

    #[test]
    fn oversized_file_values_are_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "micro_break_minutes = 4294967295\n").unwrap();
        assert!(matches!(
            PlannerConfig::load_from(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn save_and_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = PlannerConfig::default();
        cfg.set("intervention_interval_minutes", "90").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = PlannerConfig::load_from(&path).unwrap();
        assert_eq!(loaded.intervention_interval_minutes, 90);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = PlannerConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, PlannerConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "phase_length_minutes = \"long\"").unwrap();
        assert!(matches!(
            PlannerConfig::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn converts_into_stage_configs() {
        let mut cfg = PlannerConfig::default();
        cfg.set("micro_break_minutes", "2").unwrap();
        assert_eq!(cfg.distributor_config().micro_break_minutes, 2);
        assert_eq!(cfg.injector_config().interval_minutes, 180);
    }
}
