use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Glyph drawn in place of a substitution's `~>` when nothing is configured.
pub const DEFAULT_SEPARATOR_GLYPH: &str = "🠚";

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

    #[error("Invalid config file at {config_path}: separator_glyph must not be empty")]
    EmptySeparatorGlyph { config_path: PathBuf },
}

/// How annotations are turned into decorations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStrategyKind {
    /// Hide the fences, mark the content, swap `~>` for a glyph.
    #[default]
    FenceMark,
    /// As `FenceMark`, but a substitution becomes one widget showing the old
    /// and new text as separately styled parts.
    SplitSubstitution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render_strategy: RenderStrategyKind,
    pub separator_glyph: String,
    pub start_in_live_preview: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render_strategy: RenderStrategyKind::default(),
            separator_glyph: DEFAULT_SEPARATOR_GLYPH.to_string(),
            start_in_live_preview: true,
        }
    }
}

impl Config {
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

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if config.separator_glyph.is_empty() {
            return Err(ConfigError::EmptySeparatorGlyph {
                config_path: config_path.to_path_buf(),
            });
        }

        Ok(Some(config))
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

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/criticmarkup-live");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}
