//! Engine configuration, loaded from and saved to an `engine.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use notideck::config;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Shrink the combat channel
//! config.capacities.top_left = Some(2);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::domain::ChannelKey;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use defaults::DEFAULT_CHANNEL_CAPACITY;

const CONFIG_FILE: &str = "engine.toml";
const APP_NAME: &str = "NotiDeck";

/// Per-channel capacity overrides. Unset channels use
/// [`defaults::DEFAULT_CHANNEL_CAPACITY`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Capacities {
    pub top_left: Option<usize>,
    pub top_center: Option<usize>,
    pub top_right: Option<usize>,
    pub bottom_left: Option<usize>,
    pub bottom_right: Option<usize>,
}

impl Capacities {
    /// Resolves the configured capacity for a channel key.
    #[must_use]
    pub fn resolve(&self, key: ChannelKey) -> usize {
        let configured = match key {
            ChannelKey::TopLeft => self.top_left,
            ChannelKey::TopCenter => self.top_center,
            ChannelKey::TopRight => self.top_right,
            ChannelKey::BottomLeft => self.bottom_left,
            ChannelKey::BottomRight => self.bottom_right,
        };
        configured.unwrap_or(DEFAULT_CHANNEL_CAPACITY)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stack_spacing: Option<f32>,
    #[serde(default)]
    pub entry_secs: Option<f32>,
    #[serde(default)]
    pub exit_secs: Option<f32>,
    #[serde(default)]
    pub reposition_secs: Option<f32>,
    #[serde(default)]
    pub overshoot: Option<f32>,
    #[serde(default)]
    pub slide_distance: Option<f32>,
    #[serde(default)]
    pub diagnostics_capacity: Option<usize>,
    /// Per-channel capacity table; last so the TOML serializer emits all
    /// top-level values before the `[capacities]` table.
    #[serde(default)]
    pub capacities: Capacities,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stack_spacing: Some(defaults::DEFAULT_STACK_SPACING),
            entry_secs: Some(defaults::DEFAULT_ENTRY_SECS),
            exit_secs: Some(defaults::DEFAULT_EXIT_SECS),
            reposition_secs: Some(defaults::DEFAULT_REPOSITION_SECS),
            overshoot: Some(defaults::DEFAULT_OVERSHOOT),
            slide_distance: Some(defaults::DEFAULT_SLIDE_DISTANCE),
            diagnostics_capacity: Some(defaults::DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
            capacities: Capacities::default(),
        }
    }
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

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
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
    fn save_and_load_round_trip_preserves_capacities() {
        let mut config = Config::default();
        config.capacities.top_right = Some(5);
        config.stack_spacing = Some(12.0);

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("engine.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.capacities.top_right, Some(5));
        assert_eq!(loaded.stack_spacing, Some(12.0));
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("engine.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.capacities.top_left.is_none());
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let nested_dir = temp_dir.path().join("deep").join("path");
        let config_path = nested_dir.join("engine.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn unset_capacity_resolves_to_default() {
        let capacities = Capacities::default();
        for key in ChannelKey::ALL {
            assert_eq!(capacities.resolve(key), DEFAULT_CHANNEL_CAPACITY);
        }
    }

    #[test]
    fn configured_capacity_wins() {
        let capacities = Capacities {
            bottom_right: Some(6),
            ..Capacities::default()
        };
        assert_eq!(capacities.resolve(ChannelKey::BottomRight), 6);
        assert_eq!(capacities.resolve(ChannelKey::TopLeft), DEFAULT_CHANNEL_CAPACITY);
    }
}
