//! Host configuration.
//!
//! Everything is optional; a missing config file means defaults. Game tuning
//! lives in `constants` and is not configurable.

use crate::constants::DEFAULT_FRAME_MS;
use crate::error::{ArcadeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Redraw and input poll period of the host loop.
    pub frame_ms: u64,
    /// Fixed RNG seed for reproducible sessions. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Write logs here instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            frame_ms: DEFAULT_FRAME_MS,
            seed: None,
            log_filter: "warn".to_string(),
            log_file: None,
        }
    }
}

impl ArcadeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ArcadeError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ArcadeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.frame_ms = config.frame_ms.max(1);
        Ok(config)
    }
}
