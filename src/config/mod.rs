use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

pub mod model;

pub use model::*;

pub const CONFIG_FILE_NAME: &str = "scanboard.toml";
pub const API_URL_ENV: &str = "SCANBOARD_API_URL";

impl RootConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::CantRead {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Invalid {
            path: path.display().to_string(),
            source,
        })?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let progress = &self.progress;

        if progress.interval_ms == 0 {
            return Err(ConfigError::InvalidProgress(
                "interval_ms must be greater than zero".to_string(),
            ));
        }

        if progress.min_step > progress.max_step {
            return Err(ConfigError::InvalidProgress(format!(
                "min_step ({}) is greater than max_step ({})",
                progress.min_step, progress.max_step
            )));
        }

        // the last stretch to 100 is reserved for the real completion
        if progress.cap > 99 {
            return Err(ConfigError::InvalidProgress(format!(
                "cap must be below 100 (got {})",
                progress.cap
            )));
        }

        Ok(())
    }

    /// Applies the environment and command line overrides, in that order.
    pub fn with_overrides(mut self, api_url: Option<String>) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.service.base_url = url;
            }
        }

        if let Some(url) = api_url {
            self.service.base_url = url;
        }

        self
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scanboard").join("config.toml"))
}

/// Resolves the configuration the CLI runs with: an explicit path, then a
/// `scanboard.toml` in the working directory, then the per-user config file.
/// Falls back to the defaults when none exists.
pub fn discover(explicit: Option<&Path>) -> Result<RootConfig, ConfigError> {
    if let Some(path) = explicit {
        return RootConfig::load(path);
    }

    let local = std::env::current_dir()
        .ok()
        .map(|dir| dir.join(CONFIG_FILE_NAME));

    for candidate in [local, global_config_path()].into_iter().flatten() {
        if candidate.is_file() {
            debug!(path = %candidate.display(), "loading config");
            return RootConfig::load(&candidate);
        }
    }

    debug!("no config file found, using defaults");

    Ok(RootConfig::default())
}
