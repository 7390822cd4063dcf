//! # Simulation Error Types

use std::io;
use std::path::PathBuf;

use stonefall_assets::AssetError;
use stonefall_core::CoreError;
use thiserror::Error;

/// Errors raised by the scene state machine and its collaborators.
#[derive(Error, Debug)]
pub enum SimError {
    /// Record decoding or pool bookkeeping failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing a file failed.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// A save file names a level this build does not know.
    #[error("unknown scene level {0}")]
    UnknownScene(i32),

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The configuration file is not valid TOML for [`SimConfig`].
    ///
    /// [`SimConfig`]: crate::config::SimConfig
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    /// The renderer could not be brought up.
    #[error("renderer initialization failed: {0}")]
    Renderer(String),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
