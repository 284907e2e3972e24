use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Not a color name: {name:?}")]
    InvalidColor { name: String },
}

const DEFAULT_COLORS: [&str; 4] = ["moccasin", "lavender", "palegreen", "lightpink"];

fn default_expand_selection() -> bool {
    true
}

fn default_colors() -> Vec<String> {
    DEFAULT_COLORS.iter().map(|c| c.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Grow a selection to whole words before highlighting it.
    #[serde(default = "default_expand_selection")]
    pub expand_selection: bool,
    /// Named colors a comment can be tagged with.
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            expand_selection: default_expand_selection(),
            colors: default_colors(),
        }
    }
}

impl Settings {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let settings: Settings =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(settings))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loaded settings, or the defaults when no config file exists.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/marginalia");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Parses the comma separated color list the settings screen edits.
    ///
    /// Names are trimmed and lowercased; empty entries and repeats are
    /// dropped. Anything that is not a plain alphabetic name is an error.
    pub fn parse_colors(input: &str) -> Result<Vec<String>, ConfigError> {
        let mut colors: Vec<String> = Vec::new();
        for name in input.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            if !name.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ConfigError::InvalidColor {
                    name: name.to_string(),
                });
            }
            let name = name.to_ascii_lowercase();
            if !colors.contains(&name) {
                colors.push(name);
            }
        }
        Ok(colors)
    }

    /// The color list in the form `parse_colors` accepts.
    pub fn colors_string(&self) -> String {
        self.colors.join(", ")
    }
}
