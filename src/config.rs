//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/choicetree/choicetree.toml`
//! 3. Local config: `<dir>/.choicetree.toml`
//! 4. Environment variables: `CHOICETREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Raw settings for intermediate parsing.
///
/// `None` means the layer does not specify the field and the base value is kept.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub delimiter: Option<char>,
    pub parameter_name: Option<String>,
    pub export_prefix: Option<String>,
}

/// Unified configuration for choicetree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Cell delimiter for reading and writing configurations
    pub delimiter: char,
    /// Form field holding the parameter's own name, never part of a selection
    pub parameter_name: String,
    /// Prefix for each resolved `NAME=value` line
    pub export_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: ',',
            parameter_name: "name".into(),
            export_prefix: "export ".into(),
        }
    }
}

/// Get the XDG config directory for choicetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "choicetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("choicetree.toml"))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".choicetree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// The delimiter as the single byte the codec splits on.
    ///
    /// The quote character and line terminators are rejected: they would
    /// change how rows are split.
    pub fn delimiter_byte(&self) -> Result<u8, ApplicationError> {
        match self.delimiter {
            '"' | '\n' | '\r' => Err(ApplicationError::Config {
                message: format!("delimiter cannot be a quote or line break: {:?}", self.delimiter),
            }),
            c if c.is_ascii() => Ok(c as u8),
            c => Err(ApplicationError::Config {
                message: format!("delimiter must be a single ASCII character: {:?}", c),
            }),
        }
    }

    /// Merge overlay config onto self (base): overlay wins if Some.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            delimiter: overlay.delimiter.unwrap_or(self.delimiter),
            parameter_name: overlay
                .parameter_name
                .clone()
                .unwrap_or_else(|| self.parameter_name.clone()),
            export_prefix: overlay
                .export_prefix
                .clone()
                .unwrap_or_else(|| self.export_prefix.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.choicetree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global_path = global_config_path();
        Self::load_from(
            global_path.as_deref(),
            local_dir,
            Environment::with_prefix("CHOICETREE").prefix_separator("_"),
        )
    }

    pub(crate) fn load_from(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("load: local config {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current, env)?;
        current.delimiter_byte()?;
        Ok(current)
    }

    /// Apply CHOICETREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("delimiter") {
            let mut chars = val.chars();
            settings.delimiter = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(ApplicationError::Config {
                        message: format!("delimiter must be a single character: {:?}", val),
                    })
                }
            };
        }
        if let Ok(val) = config.get_string("parameter_name") {
            settings.parameter_name = val;
        }
        if let Ok(val) = config.get_string("export_prefix") {
            settings.export_prefix = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
