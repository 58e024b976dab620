//! Layered settings loading with figment

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use super::settings::Settings;
use crate::infrastructure::logging::logger::parse_log_level;

/// Settings validation error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `logging.level` is not a known level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// `logging.log_dir` is set to an empty path
    #[error("Log directory cannot be empty")]
    EmptyLogDir,
}

/// Settings loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Environment variable prefix
    pub const ENV_PREFIX: &'static str = "CONFLUENT_";

    /// Load settings with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .confluent/config.yaml (project settings)
    /// 3. .confluent/local.yaml (local overrides, optional)
    /// 4. Environment variables (CONFLUENT_* prefix, `__` separates nested keys)
    pub fn load() -> Result<Settings> {
        Self::load_layers(&[
            Path::new(".confluent/config.yaml"),
            Path::new(".confluent/local.yaml"),
        ])
    }

    /// Load settings from a specific file, still honouring environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Settings> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Settings file not found: {}", path.display());
        }
        Self::load_layers(&[path])
    }

    fn load_layers(files: &[&Path]) -> Result<Settings> {
        let figment = files.iter().fold(
            Figment::new().merge(Serialized::defaults(Settings::default())),
            |figment, file| figment.merge(Yaml::file(file)),
        );

        let settings: Settings = figment
            .merge(Env::prefixed(Self::ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract settings from figment")?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Validate settings after loading
    pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
        if parse_log_level(&settings.logging.level).is_err() {
            return Err(ConfigError::InvalidLogLevel(settings.logging.level.clone()));
        }

        if let Some(ref dir) = settings.logging.log_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::EmptyLogDir);
            }
        }

        Ok(())
    }
}
