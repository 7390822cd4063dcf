//! # Simulation Configuration
//!
//! Every tunable the simulation reads at startup. The defaults are the
//! shipped values; a TOML file may override any subset of them.
//!
//! ```toml
//! save_dir = "saves"
//! asset_root = "."
//! autosave_after = 5.0
//! seed = 42
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{SimError, SimResult};

/// Startup configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Arena budget for cached asset bytes.
    pub arena_bytes: usize,
    /// Warriors constructed up front.
    pub warrior_pool: usize,
    /// Rocks constructed up front.
    pub rock_pool: usize,
    /// Sprites constructed up front.
    pub sprite_pool: usize,
    /// World width in pixels; warriors past it are off screen.
    pub world_width: f32,
    /// World height in pixels.
    pub world_height: f32,
    /// Game time in seconds after which a level saves itself once.
    pub autosave_after: f32,
    /// Directory save files are written to.
    pub save_dir: PathBuf,
    /// Directory asset paths are resolved against.
    pub asset_root: PathBuf,
    /// Warriors spawned by level 1 and rocks spawned by level 2.
    pub spawn_count: usize,
    /// Upper bound on one frame's delta time, in seconds.
    pub max_frame_delta: f32,
    /// Fixed RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_bytes: 10 * 1024 * 1024,
            warrior_pool: 20,
            rock_pool: 20,
            sprite_pool: 10,
            world_width: 1920.0,
            world_height: 1080.0,
            autosave_after: 5.0,
            save_dir: PathBuf::new(),
            asset_root: PathBuf::new(),
            spawn_count: 10,
            max_frame_delta: 0.1,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigParse`] for malformed TOML or unknown keys,
    /// and [`SimError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> SimResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigRead`] if the file cannot be read, otherwise
    /// the same errors as [`SimConfig::from_toml_str`].
    pub fn from_toml_file(path: &Path) -> SimResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] naming the first bad value.
    #[allow(clippy::neg_cmp_op_on_partial_ord)] // NaN must fail too
    pub fn validate(&self) -> SimResult<()> {
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(SimError::InvalidConfig("world size must be positive"));
        }
        if !(self.max_frame_delta > 0.0) {
            return Err(SimError::InvalidConfig("max_frame_delta must be positive"));
        }
        if !self.autosave_after.is_finite() || self.autosave_after < 0.0 {
            return Err(SimError::InvalidConfig("autosave_after must be a non-negative number"));
        }
        Ok(())
    }

    /// Where a save file with `name` lives.
    #[must_use]
    pub fn save_path(&self, name: &str) -> PathBuf {
        self.save_dir.join(name)
    }
}
