//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration and seed data from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, SeedData};

/// Loads and provides access to engine configuration and seed data.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── engine.yaml   # Organisation, Bradford and server settings
/// └── seed.yaml     # Initial clients, team members, users and attendance
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Organisation: {}", loader.config().organisation.name);
/// println!("Rolling window: {} months", loader.rolling_months());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
    seed: SeedData,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A setting is out of range (e.g. a zero-month rolling window)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let config = Self::load_yaml::<EngineConfig>(&engine_path)?;
        Self::validate(&config, &engine_path)?;

        let seed_path = path.join("seed.yaml");
        let seed = Self::load_yaml::<SeedData>(&seed_path)?;

        Ok(Self { config, seed })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(config: &EngineConfig, path: &Path) -> EngineResult<()> {
        if config.bradford.rolling_months == 0 {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: "bradford.rolling_months must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the seed data.
    pub fn seed(&self) -> &SeedData {
        &self.seed
    }

    /// Returns the configured Bradford rolling window in months.
    pub fn rolling_months(&self) -> u32 {
        self.config.bradford.rolling_months
    }

    /// Splits the loader into its configuration and seed data.
    pub fn into_parts(self) -> (EngineConfig, SeedData) {
        (self.config, self.seed)
    }
}
