use stonefall_core::PoolHandle;

use super::{autosave, codec, LevelState};
use crate::constants::{
    LEVEL2_BACKGROUND, LEVEL2_SAVE_FILE, ROCK_SCALE, ROCK_SPACING, ROCK_SPAWN_X, ROCK_SPAWN_Y,
};
use crate::entities::{Rock, Spawn, Warrior};
use crate::error::SimResult;
use crate::services::Services;

/// Second level: the warriors from level 1 keep running while rocks fall.
#[derive(Debug)]
pub struct Level2 {
    pub(super) state: LevelState,
    rocks: Vec<PoolHandle<Rock>>,
}

impl Level2 {
    /// Persisted level number.
    pub const NUMBER: i32 = 2;

    /// Takes over `warriors` and spawns a row of rocks above the screen.
    #[must_use]
    pub fn spawn(warriors: Vec<PoolHandle<Warrior>>, services: &mut Services) -> Self {
        let count = services.config.spawn_count;
        let mut rocks = Vec::with_capacity(count);

        for i in 0..count {
            let speed = services.spawn_speed();
            let spawn = Spawn::with_speed(
                ROCK_SPAWN_X + i as f32 * ROCK_SPACING,
                ROCK_SPAWN_Y,
                speed,
                ROCK_SCALE,
            );
            let handle = services.rocks.acquire();
            if let Some(rock) = services.rocks.get_mut(handle) {
                rock.initialize(spawn, &mut services.sprites);
            }
            rocks.push(handle);
        }

        tracing::info!(
            "Level {} started with {} warriors and {} rocks",
            Self::NUMBER,
            warriors.len(),
            count
        );
        Self::from_parts(LevelState::new(LEVEL2_BACKGROUND, warriors), rocks)
    }

    pub(super) const fn from_parts(state: LevelState, rocks: Vec<PoolHandle<Rock>>) -> Self {
        Self { state, rocks }
    }

    /// Moves everything, resolves collisions, prunes, then autosaves.
    pub fn update(&mut self, dt: f32, services: &mut Services) {
        self.state.game_time += dt;
        self.state.update_warriors(dt, &mut services.warriors);
        for &handle in &self.rocks {
            if let Some(rock) = services.rocks.get_mut(handle) {
                rock.update(dt);
            }
        }

        self.resolve_collisions(services);
        self.prune(services);
        self.check_autosave(services);
    }

    /// Each active rock kills at most the first running warrior it overlaps.
    fn resolve_collisions(&self, services: &mut Services) {
        for &rock_handle in &self.rocks {
            let Some(rock) = services.rocks.get_mut(rock_handle) else {
                continue;
            };
            if !rock.is_active() {
                continue;
            }
            let rock_bounds = rock.bounds();

            for &warrior_handle in &self.state.warriors {
                let Some(warrior) = services.warriors.get_mut(warrior_handle) else {
                    continue;
                };
                if warrior.is_running() && warrior.bounds().overlaps(&rock_bounds) {
                    warrior.start_death();
                    rock.deactivate();
                    tracing::debug!("Rock {:?} hit warrior {:?}", rock_handle, warrior_handle);
                    break;
                }
            }
        }
    }

    /// Drops inactive rocks and dead warriors, returning them to their pools.
    fn prune(&mut self, services: &mut Services) {
        let rocks = &mut services.rocks;
        self.rocks.retain(|&handle| {
            let keep = rocks.get(handle).is_some_and(Rock::is_active);
            if !keep {
                rocks.release(handle);
            }
            keep
        });

        let warriors = &mut services.warriors;
        self.state.warriors.retain(|&handle| {
            let keep = warriors.get(handle).is_some_and(|w| !w.is_dead());
            if !keep {
                warriors.release(handle);
            }
            keep
        });
    }

    fn check_autosave(&mut self, services: &Services) {
        if !autosave::due(&self.state, services.config.autosave_after) {
            return;
        }
        let path = services.config.save_path(LEVEL2_SAVE_FILE);
        autosave::write(&path, self.to_bytes(services));
        self.state.auto_saved = true;
    }

    /// True once the lead warrior is past the world's right edge or no
    /// warrior is running or dying.
    #[must_use]
    pub fn should_quit(&self, services: &Services) -> bool {
        if self
            .state
            .lead_off_screen(&services.warriors, services.config.world_width)
        {
            return true;
        }
        !self.state.warriors.iter().any(|&handle| {
            services
                .warriors
                .get(handle)
                .is_some_and(|w| w.is_running() || w.is_dying())
        })
    }

    /// Live warriors in sequence order.
    #[must_use]
    pub fn warriors(&self) -> &[PoolHandle<Warrior>] {
        &self.state.warriors
    }

    /// Live rocks in sequence order.
    #[must_use]
    pub fn rocks(&self) -> &[PoolHandle<Rock>] {
        &self.rocks
    }

    /// Encodes this level as a save file.
    ///
    /// # Errors
    ///
    /// Returns an error if a held handle no longer resolves.
    pub fn to_bytes(&self, services: &Services) -> SimResult<Vec<u8>> {
        codec::encode(Self::NUMBER, &self.state, Some(&self.rocks), services)
    }

    pub(super) fn release_all(&mut self, services: &mut Services) {
        self.state.release_warriors(&mut services.warriors);
        for handle in self.rocks.drain(..) {
            services.rocks.release(handle);
        }
    }
}
