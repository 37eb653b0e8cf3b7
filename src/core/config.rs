//! Controller configuration
//!
//! Saved as JSON, either at a path given on the command line or as
//! `config.json` in the user's configuration directory. Missing fields take
//! their defaults; a missing or unreadable file yields the full default
//! configuration.

use crate::core::error::CoreResult;
use crate::game::resources::stats::STATS_KEY;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONFIG_FILENAME: &str = "config.json";

/// Where captured pieces are taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureSource {
    /// Diff consecutive engine board snapshots
    #[default]
    BoardDiff,
    /// Destination occupant seen just before the move was submitted
    Snapshot,
}

/// Settings for one controller instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Engine difficulty used when a new game does not name one (1-8)
    pub difficulty: u8,

    /// Whether White is played from this UI
    pub human_white: bool,

    /// Whether Black is played from this UI
    pub human_black: bool,

    /// How long transient notices stay visible
    pub notice_millis: u64,

    pub capture_source: CaptureSource,

    /// Storage key for the win/draw counters
    pub stats_key: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            difficulty: 2,
            human_white: true,
            human_black: false,
            notice_millis: 3000,
            capture_source: CaptureSource::default(),
            stats_key: STATS_KEY.to_string(),
        }
    }
}

impl ControllerConfig {
    pub const MIN_DIFFICULTY: u8 = 1;
    pub const MAX_DIFFICULTY: u8 = 8;

    /// Clamp a requested difficulty into the supported range
    pub fn clamp_difficulty(difficulty: u8) -> u8 {
        difficulty.clamp(Self::MIN_DIFFICULTY, Self::MAX_DIFFICULTY)
    }

    /// Read a config file, propagating I/O and parse errors
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&contents)?;
        config.difficulty = Self::clamp_difficulty(config.difficulty);
        Ok(config)
    }

    /// Load from `path` or the default location, falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            info!("[CONFIG] No config file at {:?}. Using defaults.", path);
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                info!("[CONFIG] Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("[CONFIG] Failed to load config at {:?}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }
}

/// `config.json` in the user's config directory, or the working directory
pub fn default_config_path() -> PathBuf {
    match ProjectDirs::from("org", "chess-controller", "chess-controller") {
        Some(dirs) => dirs.config_dir().join(CONFIG_FILENAME),
        None => PathBuf::from(CONFIG_FILENAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.difficulty, 2);
        assert!(config.human_white);
        assert!(!config.human_black);
        assert_eq!(config.capture_source, CaptureSource::BoardDiff);
        assert_eq!(config.stats_key, "chessGameStats");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ControllerConfig =
            serde_json::from_str(r#"{"difficulty":5,"capture_source":"snapshot"}"#).unwrap();
        assert_eq!(config.difficulty, 5);
        assert_eq!(config.capture_source, CaptureSource::Snapshot);
        assert_eq!(config.notice_millis, 3000);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("chess-controller-no-such-config.json");
        let config = ControllerConfig::load_or_default(Some(&path));
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn test_clamp_difficulty() {
        assert_eq!(ControllerConfig::clamp_difficulty(0), 1);
        assert_eq!(ControllerConfig::clamp_difficulty(9), 8);
        assert_eq!(ControllerConfig::clamp_difficulty(4), 4);
    }
}
