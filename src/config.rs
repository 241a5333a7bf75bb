//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/id3tree/id3tree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `ID3TREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for id3tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Label column; None means the last CSV column
    pub target: Option<String>,
    /// CSV field separator (single ASCII character)
    pub delimiter: char,
    /// Annotate internal nodes with their fallback label when printing trees
    pub show_fallback: bool,
    /// Directory searched for relative dataset paths
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target: None,
            delimiter: ',',
            show_fallback: true,
            data_dir: None,
        }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub target: Option<String>,
    pub delimiter: Option<char>,
    pub show_fallback: Option<bool>,
    pub data_dir: Option<PathBuf>,
}

/// Get the XDG config directory for id3tree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "id3tree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("id3tree.toml"))
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

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Delimiter as the byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or(b',')
    }

    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            target: overlay.target.clone().or_else(|| self.target.clone()),
            delimiter: overlay.delimiter.unwrap_or(self.delimiter),
            show_fallback: overlay.show_fallback.unwrap_or(self.show_fallback),
            data_dir: overlay.data_dir.clone().or_else(|| self.data_dir.clone()),
        }
    }

    fn expand_paths(&mut self) {
        if let Some(dir) = &self.data_dir {
            self.data_dir = Some(expand_path(dir));
        }
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if !self.delimiter.is_ascii() || self.delimiter == '\n' || self.delimiter == '"' {
            return Err(ApplicationError::Config {
                message: format!("invalid delimiter {:?}: must be a single ASCII character", self.delimiter),
            });
        }
        if matches!(&self.target, Some(t) if t.trim().is_empty()) {
            return Err(ApplicationError::Config {
                message: "target must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Load settings with layered precedence, reading the global config from
    /// its XDG location.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), config_file)
    }

    /// Like [`Settings::load`] with an explicit global config location.
    ///
    /// `global` is skipped when `None` or when no file exists there.
    pub fn load_from(global: Option<&Path>, config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        current.validate()?;
        Ok(current)
    }

    /// Apply ID3TREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("ID3TREE").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("target") {
            settings.target = Some(val);
        }
        if let Ok(val) = config.get_string("delimiter") {
            let mut chars = val.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => settings.delimiter = c,
                _ => {
                    return Err(ApplicationError::Config {
                        message: format!("ID3TREE_DELIMITER must be one character, got {:?}", val),
                    })
                }
            }
        }
        if let Ok(val) = config.get_bool("show_fallback") {
            settings.show_fallback = val;
        }
        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# id3tree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/id3tree/id3tree.toml
#   File:   --config <path>
#   Env:    ID3TREE_* environment variables (ID3TREE_TARGET, ID3TREE_DELIMITER, ...)

# Label column (default: last column of the CSV header)
# target = "Play"

# CSV field separator
# delimiter = ","

# Print fallback labels of internal nodes in tree output
# show_fallback = true

# Directory searched for relative dataset paths
# data_dir = "~/datasets"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
