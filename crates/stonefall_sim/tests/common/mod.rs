//! Shared fixtures: a temp directory with sprite sheets and a save dir.

#![allow(dead_code)]

use std::path::Path;

use stonefall_assets::tga;
use stonefall_sim::constants::{ROCK_SPRITE, WARRIOR_DEATH_SPRITE, WARRIOR_RUN_SPRITE};
use stonefall_sim::{Services, SimConfig};
use tempfile::TempDir;

fn write_sheet(root: &Path, relative: &str, frames: u16) {
    let (width, height) = (frames * 4, 4);
    let pixels = vec![200u8; usize::from(width) * usize::from(height) * 3];
    let bytes = tga::encode(width, height, 24, &pixels).unwrap();

    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}

/// Temp workspace holding small sheets for every sprite.
pub struct World {
    pub dir: TempDir,
    pub config: SimConfig,
}

impl World {
    pub fn new(seed: u64) -> Self {
        let dir = tempfile::tempdir().unwrap();
        write_sheet(dir.path(), WARRIOR_RUN_SPRITE, 6);
        write_sheet(dir.path(), WARRIOR_DEATH_SPRITE, 8);
        write_sheet(dir.path(), ROCK_SPRITE, 4);

        let config = SimConfig {
            asset_root: dir.path().to_path_buf(),
            save_dir: dir.path().join("saves"),
            arena_bytes: 64 * 1024,
            seed: Some(seed),
            ..SimConfig::default()
        };
        Self { dir, config }
    }

    pub fn services(&self) -> Services {
        Services::new(self.config.clone())
    }

    pub fn save_file(&self, name: &str) -> std::path::PathBuf {
        self.config.save_path(name)
    }
}
