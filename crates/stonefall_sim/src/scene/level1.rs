use stonefall_core::PoolHandle;

use super::{autosave, codec, LevelState, Scene};
use crate::constants::{
    LEVEL1_BACKGROUND, LEVEL1_SAVE_FILE, WARRIOR_SCALE, WARRIOR_SPACING, WARRIOR_SPAWN_X,
    WARRIOR_SPAWN_Y,
};
use crate::entities::{Spawn, Warrior};
use crate::error::SimResult;
use crate::services::Services;

/// First level: a column of warriors runs right across the screen.
///
/// Autosaves once and immediately reloads the file, adopting the reloaded
/// warriors as the live state.
#[derive(Debug)]
pub struct Level1 {
    pub(super) state: LevelState,
}

impl Level1 {
    /// Persisted level number.
    pub const NUMBER: i32 = 1;

    /// Spawns `spawn_count` warriors down the left edge.
    #[must_use]
    pub fn spawn(services: &mut Services) -> Self {
        let count = services.config.spawn_count;
        let mut warriors = Vec::with_capacity(count);

        for i in 0..count {
            let speed = services.spawn_speed();
            let spawn = Spawn::with_speed(
                WARRIOR_SPAWN_X,
                WARRIOR_SPAWN_Y + i as f32 * WARRIOR_SPACING,
                speed,
                WARRIOR_SCALE,
            );
            let handle = services.warriors.acquire();
            if let Some(warrior) = services.warriors.get_mut(handle) {
                warrior.initialize(spawn, &mut services.sprites);
            }
            warriors.push(handle);
        }

        tracing::info!("Level {} started with {} warriors", Self::NUMBER, count);
        Self::from_state(LevelState::new(LEVEL1_BACKGROUND, warriors))
    }

    pub(super) const fn from_state(state: LevelState) -> Self {
        Self { state }
    }

    /// Moves warriors, then runs the autosave check.
    pub fn update(&mut self, dt: f32, services: &mut Services) {
        self.state.game_time += dt;
        self.state.update_warriors(dt, &mut services.warriors);
        self.check_autosave(services);
    }

    /// True once the lead warrior is past the world's right edge.
    #[must_use]
    pub fn should_transition(&self, services: &Services) -> bool {
        self.state
            .lead_off_screen(&services.warriors, services.config.world_width)
    }

    /// Live warriors in sequence order.
    #[must_use]
    pub fn warriors(&self) -> &[PoolHandle<Warrior>] {
        &self.state.warriors
    }

    /// Encodes this level as a save file.
    ///
    /// # Errors
    ///
    /// Returns an error if a held handle no longer resolves.
    pub fn to_bytes(&self, services: &Services) -> SimResult<Vec<u8>> {
        codec::encode(Self::NUMBER, &self.state, None, services)
    }

    fn check_autosave(&mut self, services: &mut Services) {
        if !autosave::due(&self.state, services.config.autosave_after) {
            return;
        }

        let path = services.config.save_path(LEVEL1_SAVE_FILE);
        let written = autosave::write(&path, self.to_bytes(services));
        self.state.auto_saved = true;
        if !written {
            return;
        }

        match autosave::read_back(&path, services) {
            Ok(Scene::Level1(scratch)) => self.adopt(scratch, services),
            Ok(mut other) => {
                tracing::warn!(
                    "Autosave {} reloaded as level {}, keeping live state",
                    path.display(),
                    other.level_number()
                );
                other.release_all(services);
            }
            Err(err) => {
                tracing::warn!("Autosave {} failed verification: {}", path.display(), err);
            }
        }
    }

    /// Takes the reloaded warriors and game time, releasing the warriors
    /// they replace.
    fn adopt(&mut self, scratch: Self, services: &mut Services) {
        let replaced = std::mem::replace(&mut self.state.warriors, scratch.state.warriors);
        for handle in replaced {
            services.warriors.release(handle);
        }
        self.state.game_time = scratch.state.game_time;

        tracing::info!(
            "Autosave verified: {} warriors reloaded at {:.2}s",
            self.state.warriors.len(),
            self.state.game_time
        );
    }
}
