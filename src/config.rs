//! # Configuration Module
//!
//! Generation defaults live in a small JSON file in the platform config
//! directory:
//! - Linux: `~/.config/setlist/config.json`
//! - macOS: `~/Library/Application Support/setlist/config.json`
//! - Windows: `%APPDATA%\setlist\config.json`
//!
//! Every field is optional. A missing file means built-in defaults; command
//! line flags override whatever the file says.
//!
//! ```json
//! { "set_time": 90, "cluster_size": 3, "og_artist": "The Band" }
//! ```

use crate::song::OG_ARTIST;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Share of the set time held back for transitions when none is given.
pub const TRANSITION_SHARE: f64 = 0.1;

/// Returns the platform-appropriate config file path.
///
/// The directory is not created here; see [`write_defaults`].
///
/// # Errors
///
/// Fails if the platform has no config directory.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| anyhow::anyhow!(
        "Could not determine system config directory. \
         Please ensure your platform supports standard config directories."
    ))?;

    Ok(config_dir.join("setlist").join("config.json"))
}

/// Defaults for a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationDefaults {
    pub og_weight: f64,
    pub mood_weight: f64,
    /// Whole set length in minutes.
    pub set_time: f64,
    /// Minutes reserved for transitions. `None` means 10% of the set.
    pub transition_time: Option<f64>,
    pub cluster_size: usize,
    /// Artist value that receives the flat og weight.
    pub og_artist: String,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            og_weight: 1.2,
            mood_weight: 0.8,
            set_time: 60.0,
            transition_time: None,
            cluster_size: 2,
            og_artist: OG_ARTIST.to_string(),
        }
    }
}

impl GenerationDefaults {
    /// Transition allowance for a set of `set_time` minutes.
    #[must_use]
    pub fn transition_time_for(&self, set_time: f64) -> f64 {
        self.transition_time.unwrap_or(set_time * TRANSITION_SHARE)
    }
}

/// Reads defaults from `path`, or built-in defaults if it does not exist.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or is not valid JSON.
pub fn load_defaults(path: &Path) -> Result<GenerationDefaults> {
    if !path.exists() {
        log::debug!("No config at {}, using built-in defaults", path.display());
        return Ok(GenerationDefaults::default());
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let defaults = serde_json::from_str(&text)
        .with_context(|| format!("Config file {} is not valid JSON", path.display()))?;
    log::info!("Loaded generation defaults from {}", path.display());
    Ok(defaults)
}

/// Writes `defaults` to `path`, creating the parent directory.
///
/// # Errors
///
/// Fails on any filesystem error.
pub fn write_defaults(path: &Path, defaults: &GenerationDefaults) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!(
            "Failed to create config directory at {}. Please check file permissions.",
            parent.display()
        ))?;
    }
    let text = serde_json::to_string_pretty(defaults)?;
    fs::write(path, text)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(())
}

/// Configuration resolved for one run of the binary.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub config_path: PathBuf,
    pub defaults: GenerationDefaults,
}

impl RuntimeConfig {
    /// Loads from the platform config path.
    pub fn new() -> Result<Self> {
        Self::with_config_path(get_config_path()?)
    }

    /// Loads from an explicit config path.
    pub fn with_config_path(config_path: PathBuf) -> Result<Self> {
        let defaults = load_defaults(&config_path)?;
        Ok(Self { config_path, defaults })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_config_path_structure() {
        let path = get_config_path().expect("Should get valid path");

        assert!(path.to_string_lossy().ends_with("config.json"));
        let parent = path.parent().expect("Should have parent directory");
        assert_eq!(parent.file_name().unwrap(), "setlist");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let defaults = load_defaults(&dir.path().join("absent.json")).unwrap();
        assert_eq!(defaults, GenerationDefaults::default());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "set_time": 90, "og_artist": "The Band" }"#).unwrap();

        let defaults = load_defaults(&path).unwrap();
        assert_eq!(defaults.set_time, 90.0);
        assert_eq!(defaults.og_artist, "The Band");
        assert_eq!(defaults.cluster_size, 2);
        assert_eq!(defaults.og_weight, 1.2);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ set_time: ").unwrap();

        let err = load_defaults(&path).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_transition_defaults_to_ten_percent() {
        let defaults = GenerationDefaults::default();
        assert!((defaults.transition_time_for(60.0) - 6.0).abs() < 1e-9);

        let fixed = GenerationDefaults { transition_time: Some(2.0), ..defaults };
        assert_eq!(fixed.transition_time_for(60.0), 2.0);
    }

    #[test]
    fn test_written_defaults_load_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let defaults = GenerationDefaults { cluster_size: 4, ..GenerationDefaults::default() };

        write_defaults(&path, &defaults).unwrap();
        let config = RuntimeConfig::with_config_path(path).unwrap();
        assert_eq!(config.defaults, defaults);
    }
}
