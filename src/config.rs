//! Configuration management for snippfy
//!
//! Reads optional settings from ~/.config/snippfy/config.toml. Nothing is
//! ever written back; command-line flags override whatever is loaded here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "snippfy";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// URL or file path of the snippet document
    #[serde(default = "default_source")]
    pub source: String,
    /// Replaces the built-in tag vocabulary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Build the vocabulary from the loaded data instead
    #[serde(default)]
    pub tags_from_data: bool,
    /// Tag label to `#rrggbb`
    #[serde(default)]
    pub tag_colors: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

fn default_source() -> String {
    "data.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: default_source(),
            tags: None,
            tags_from_data: false,
            tag_colors: HashMap::new(),
            log_level: None,
        }
    }
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Resolves which file to read: `path` when given (it must exist), else
    /// the default location if a file is there, else `None` for defaults.
    pub fn locate(path: Option<&Path>) -> Result<Option<PathBuf>> {
        match path {
            Some(path) => Ok(Some(path.to_path_buf())),
            None => {
                let default = Self::config_path()?;
                Ok(default.exists().then_some(default))
            }
        }
    }

    /// Reads the file found by [`Config::locate`], or returns defaults for `None`
    pub fn read(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::from_toml_str(&content).with_context(|| format!("Failed to parse config {:?}", path))
    }

    /// Loads from `path`, or from the default location when `None`.
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::read(Self::locate(path)?.as_deref())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.source, "data.json");
    }

    #[test]
    fn all_fields_parse() {
        let config = Config::from_toml_str(
            r##"
source = "https://example.com/data.json"
tags = ["Rust", "Git"]
tags_from_data = true
log_level = "debug"

[tag_colors]
Rust = "#ff8800"
"##,
        )
        .unwrap();

        assert_eq!(config.source, "https://example.com/data.json");
        assert_eq!(config.tags, Some(vec!["Rust".to_string(), "Git".to_string()]));
        assert!(config.tags_from_data);
        assert_eq!(config.tag_colors.get("Rust").map(String::as_str), Some("#ff8800"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(Config::load(Some(Path::new("/no/such/snippfy.toml"))).is_err());
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "source = \"snippets.yaml\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.source, "snippets.yaml");
    }

    #[test]
    fn locate_keeps_explicit_path_and_read_without_file_gives_defaults() {
        let path = Path::new("/no/such/snippfy.toml");
        assert_eq!(
            Config::locate(Some(path)).unwrap(),
            Some(path.to_path_buf())
        );
        assert_eq!(Config::read(None).unwrap(), Config::default());
    }
}
