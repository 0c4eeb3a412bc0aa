// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use messenger_locales::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.language = Some("fr".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.language, Some("fr".to_string()));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::{
    DEFAULT_LOCALE, DEFAULT_REQUIRED_KEYS, DEFAULT_STRICT, DEFAULT_USE_ISOLATING,
};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "MessengerLocales";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Preferred locale; may be unsupported, lookups fall back.
    pub language: Option<String>,
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// On-disk resource directory replacing the embedded tables.
    #[serde(default)]
    pub resources_dir: Option<PathBuf>,
    #[serde(default = "default_strict")]
    pub strict: bool,
    #[serde(default = "default_use_isolating")]
    pub use_isolating: bool,
    /// Keys every locale must define itself; `check` fails otherwise.
    #[serde(default = "default_required_keys")]
    pub required_keys: Vec<String>,
    /// Extra fallback aliases, merged over the built-in ones.
    #[serde(default)]
    pub fallback: BTreeMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            default_locale: default_locale(),
            resources_dir: None,
            strict: DEFAULT_STRICT,
            use_isolating: DEFAULT_USE_ISOLATING,
            required_keys: default_required_keys(),
            fallback: BTreeMap::new(),
        }
    }
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_strict() -> bool {
    DEFAULT_STRICT
}

fn default_use_isolating() -> bool {
    DEFAULT_USE_ISOLATING
}

fn default_required_keys() -> Vec<String> {
    DEFAULT_REQUIRED_KEYS.iter().map(|k| k.to_string()).collect()
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a settings file. Invalid TOML yields the defaults with a warning;
/// an unreadable file is an error.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring invalid settings file");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_language() {
        let mut config = Config {
            language: Some("fr".to_string()),
            strict: false,
            ..Config::default()
        };
        config
            .fallback
            .insert("pt-AO".to_string(), vec!["pt-PT".to_string()]);
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.language.is_none());
        assert_eq!(loaded.default_locale, DEFAULT_LOCALE);
    }

    #[test]
    fn load_from_path_errors_when_file_is_missing() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(
            &config_path,
            "language = \"ja\"\n\n[fallback]\n\"zh-HK\" = [\"zh-Hant\"]\n",
        )
        .expect("failed to write settings");

        let loaded = load_from_path(&config_path).expect("load should succeed");
        assert_eq!(loaded.language.as_deref(), Some("ja"));
        assert_eq!(loaded.default_locale, DEFAULT_LOCALE);
        assert!(loaded.strict);
        assert!(!loaded.use_isolating);
        assert_eq!(loaded.required_keys.len(), DEFAULT_REQUIRED_KEYS.len());
        assert_eq!(loaded.fallback["zh-HK"], vec!["zh-Hant".to_string()]);
    }

    #[test]
    fn required_keys_can_be_cleared() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "required_keys = []\n").expect("failed to write settings");

        let loaded = load_from_path(&config_path).expect("load should succeed");
        assert!(loaded.required_keys.is_empty());
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let nested_dir = temp_dir.path().join("deep").join("path");
        let config_path = nested_dir.join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }
}
