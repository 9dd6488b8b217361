//! Environment-driven configuration helpers.
//!
//! Every setting can come from the process environment or a `.env` file in the
//! working directory. Keys are looked up as `FAIRSIM_{KEY}`.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Prefix shared by all environment keys.
pub const ENV_PREFIX: &str = "FAIRSIM";

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn prefixed(key: &str) -> String {
    format!("{}_{}", ENV_PREFIX, key)
}

/// Read `FAIRSIM_{key}`, treating an empty value as unset.
pub fn env_opt(key: &str) -> Option<String> {
    env::var(prefixed(key)).ok().filter(|s| !s.is_empty())
}

pub fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Parse `FAIRSIM_{key}` into `T`. Unset yields `Ok(None)`, garbage yields a
/// config error naming the key.
pub fn env_parse<T>(key: &str) -> CoreResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_opt(key) {
        None => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|e| {
            CoreError::Config(format!("{}={:?}: {}", prefixed(key), raw, e))
        }),
    }
}

/// Parse a boolean flag the way shells usually spell them.
pub fn env_flag(key: &str, default: bool) -> bool {
    match env_opt(key).map(|v| v.to_ascii_lowercase()) {
        Some(v) => matches!(v.as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}

// ── Task generation defaults ──────────────────────────────────

/// Defaults for randomly generated task sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Earliest start tick.
    #[serde(default = "default_start")]
    pub start: u64,
    /// Latest start tick (inclusive). Equal to `start` when unset.
    #[serde(default)]
    pub start_max: Option<u64>,
    /// Shortest duration in ticks.
    #[serde(default = "default_duration")]
    pub duration: u64,
    /// Longest duration (inclusive). Equal to `duration` when unset.
    #[serde(default)]
    pub duration_max: Option<u64>,
    /// RNG seed; unset means seeded from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_start() -> u64 { 1 }
fn default_duration() -> u64 { 10 }

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            start_max: None,
            duration: default_duration(),
            duration_max: None,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Build from `FAIRSIM_GEN_*` variables (call `load_dotenv()` first).
    pub fn from_env() -> CoreResult<Self> {
        let mut config = Self::default();
        if let Some(v) = env_parse("GEN_START")? {
            config.start = v;
        }
        config.start_max = env_parse("GEN_START_MAX")?;
        if let Some(v) = env_parse("GEN_DURATION")? {
            config.duration = v;
        }
        config.duration_max = env_parse("GEN_DURATION_MAX")?;
        config.seed = env_parse("SEED")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if let Some(max) = self.start_max {
            if max < self.start {
                return Err(CoreError::Config(format!(
                    "start_max {} is below start {}",
                    max, self.start
                )));
            }
        }
        if self.duration == 0 {
            return Err(CoreError::Config("duration must be at least 1".into()));
        }
        if let Some(max) = self.duration_max {
            if max < self.duration {
                return Err(CoreError::Config(format!(
                    "duration_max {} is below duration {}",
                    max, self.duration
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.start, 1);
        assert_eq!(config.duration, 10);
        assert!(config.start_max.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn generator_rejects_inverted_ranges() {
        let config = GeneratorConfig {
            start: 5,
            start_max: Some(2),
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        let config = GeneratorConfig {
            duration: 0,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn generator_config_deserialize_fills_defaults() {
        let json = r#"{"start": 0, "duration": 3, "duration_max": 7}"#;
        let config: GeneratorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.start, 0);
        assert_eq!(config.duration, 3);
        assert_eq!(config.duration_max, Some(7));
        assert_eq!(config.seed, None);

        let config: GeneratorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }
}
