use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::Side;
use crate::engine::EngineConfig;
use crate::error::ConfigError;

/// Default config file looked up by the binaries.
pub const DEFAULT_CONFIG_PATH: &str = "reversi.toml";

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
    pub black: EngineConfig,
    pub white: EngineConfig,
    pub ui: UiConfig,
}

/// Who sits at the board in the GUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    #[default]
    HumanBlack,
    HumanWhite,
    /// AI against AI
    Watch,
}

impl PlayMode {
    pub fn human_side(self) -> Option<Side> {
        match self {
            PlayMode::HumanBlack => Some(Side::Black),
            PlayMode::HumanWhite => Some(Side::White),
            PlayMode::Watch => None,
        }
    }
}

/// GUI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub mode: PlayMode,
    /// Pause between AI moves in watch mode
    pub ai_move_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mode: PlayMode::HumanBlack,
            ai_move_delay_ms: 400,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_filter: "info".to_string(),
            black: EngineConfig::default(),
            white: EngineConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.black.validate("black")?;
        self.white.validate("white")?;
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Validation("log_filter must not be empty".into()));
        }
        Ok(())
    }

    /// Engine settings for a side
    pub fn engine(&self, side: Side) -> &EngineConfig {
        match side {
            Side::Black => &self.black,
            Side::White => &self.white,
        }
    }
}
