//! One-shot autosave and the read-after-write check.

use std::path::Path;

use stonefall_assets::file_io;

use super::{LevelState, Scene};
use crate::error::SimResult;
use crate::services::Services;

pub(super) fn due(state: &LevelState, threshold: f32) -> bool {
    !state.auto_saved && state.game_time >= threshold
}

/// Writes an encoded scene. Failures are logged; returns whether the file
/// was written.
pub(super) fn write(path: &Path, encoded: SimResult<Vec<u8>>) -> bool {
    let bytes = match encoded {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!("Failed to encode level for {}: {}", path.display(), err);
            return false;
        }
    };
    if file_io::write_file(path, &bytes).is_err() {
        tracing::error!("Failed to save level to {}", path.display());
        return false;
    }
    tracing::info!("Level saved to {} ({} bytes)", path.display(), bytes.len());
    true
}

pub(super) fn read_back(path: &Path, services: &mut Services) -> SimResult<Scene> {
    let bytes = file_io::read_file(path)?;
    Scene::from_bytes(&bytes, services)
}

impl Scene {
    /// Writes the scene to `path`.
    ///
    /// # Errors
    ///
    /// Returns the encoding or write error.
    pub fn save_to(&self, path: &Path, services: &Services) -> SimResult<()> {
        let bytes = self.to_bytes(services)?;
        file_io::write_file(path, &bytes)?;
        tracing::info!("Level saved to {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    /// Reads a scene from `path`.
    ///
    /// # Errors
    ///
    /// Returns the read or decoding error.
    pub fn load_from(path: &Path, services: &mut Services) -> SimResult<Self> {
        let scene = read_back(path, services)?;
        tracing::info!(
            "Level {} loaded from {} ({} warriors)",
            scene.level_number(),
            path.display(),
            scene.warriors().len()
        );
        Ok(scene)
    }
}
