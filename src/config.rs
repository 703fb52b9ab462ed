use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default lookahead of the alpha-beta search, in plies
pub const DEFAULT_MAX_PLY_ADVERSARIAL: u32 = 4;

/// Default lookahead of the expectimax search, in plies
pub const DEFAULT_MAX_PLY_STOCHASTIC: u32 = 8;

/// Depth limits for both searches, loadable from TOML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Half-moves applied before the alpha-beta search evaluates a position
    pub max_ply_adversarial: u32,
    /// Half-moves applied before the expectimax search evaluates a position
    pub max_ply_stochastic: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_ply_adversarial: DEFAULT_MAX_PLY_ADVERSARIAL,
            max_ply_stochastic: DEFAULT_MAX_PLY_STOCHASTIC,
        }
    }
}

impl SearchConfig {
    pub fn with_max_ply_adversarial(mut self, plies: u32) -> Self {
        self.max_ply_adversarial = plies;
        self
    }

    pub fn with_max_ply_stochastic(mut self, plies: u32) -> Self {
        self.max_ply_stochastic = plies;
        self
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: SearchConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Both searches must look at least one move ahead.
    pub fn validate(&self) -> Result<()> {
        if self.max_ply_adversarial == 0 {
            return Err(Error::InvalidConfig("max_ply_adversarial must be > 0".into()));
        }
        if self.max_ply_stochastic == 0 {
            return Err(Error::InvalidConfig("max_ply_stochastic must be > 0".into()));
        }
        Ok(())
    }
}
