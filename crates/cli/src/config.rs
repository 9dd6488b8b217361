use anyhow::{Context, Result};
use fairsim_core::GeneratorConfig;
use fairsim_scheduler::SchedulerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI configuration loaded from TOML file.
///
/// Each table is optional. A missing table falls back to the matching
/// `FAIRSIM_*` environment variables, so a table present in the file wins
/// over the environment and command-line flags win over both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub scheduler: Option<SchedulerConfig>,

    #[serde(default)]
    pub generator: Option<GeneratorConfig>,
}

impl CliConfig {
    /// Return the default config directory path: ~/.config/fairsim/
    pub fn default_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("fairsim");
        Ok(config_dir)
    }

    /// Return the default config file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns an empty config if the file does not exist.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            debug!(?config_path, "Config file not found, using environment");
            return Ok(Self::default());
        }
        debug!(?config_path, "Loading config");
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config: {}", config_path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
        if let Some(generator) = &config.generator {
            generator
                .validate()
                .with_context(|| format!("invalid [generator] in {}", config_path.display()))?;
        }
        Ok(config)
    }

    /// Scheduler settings from the file, else from the environment.
    pub fn resolve_scheduler(&self) -> Result<SchedulerConfig> {
        match &self.scheduler {
            Some(config) => Ok(config.clone()),
            None => SchedulerConfig::from_env().context("invalid FAIRSIM_* scheduler settings"),
        }
    }

    /// Generator defaults from the file, else from the environment.
    pub fn resolve_generator(&self) -> Result<GeneratorConfig> {
        match &self.generator {
            Some(config) => Ok(config.clone()),
            None => GeneratorConfig::from_env().context("invalid FAIRSIM_GEN_* settings"),
        }
    }
}
