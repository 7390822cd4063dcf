//! # Services
//!
//! The explicitly constructed owner of every shared resource: sprite store
//! (asset cache + arena inside), entity pools and the spawn RNG. Scenes
//! borrow it mutably for the duration of one call; nothing is global.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stonefall_assets::{AssetCache, SpriteStore};
use stonefall_core::{Arena, ObjectPool};

use crate::config::SimConfig;
use crate::constants::{SPEED_MAX, SPEED_MIN};
use crate::entities::{Rock, Warrior};

/// Process-wide resources with a single owner.
#[derive(Debug)]
pub struct Services {
    /// Configuration the services were built from.
    pub config: SimConfig,
    /// Pooled sprites and the asset cache behind them.
    pub sprites: SpriteStore,
    /// Warrior pool.
    pub warriors: ObjectPool<Warrior>,
    /// Rock pool.
    pub rocks: ObjectPool<Rock>,
    /// Spawn randomness.
    pub rng: ChaCha8Rng,
}

impl Services {
    /// Builds the arena, cache and pools described by `config`.
    #[must_use]
    pub fn new(config: SimConfig) -> Self {
        let cache = AssetCache::with_root(Arena::new(config.arena_bytes), config.asset_root.clone());
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        tracing::info!(
            "Services ready: arena {} bytes, pools warriors={} rocks={} sprites={}",
            config.arena_bytes,
            config.warrior_pool,
            config.rock_pool,
            config.sprite_pool
        );

        Self {
            sprites: SpriteStore::new(cache, config.sprite_pool),
            warriors: ObjectPool::with_capacity(config.warrior_pool),
            rocks: ObjectPool::with_capacity(config.rock_pool),
            rng,
            config,
        }
    }

    /// Draws a spawn speed in `[80, 100)` pixels per second.
    pub fn spawn_speed(&mut self) -> f32 {
        self.rng.gen_range(SPEED_MIN..SPEED_MAX)
    }

    /// Logs pool usage and shuts the asset cache down.
    pub fn shutdown(&mut self) {
        tracing::info!(
            "Warrior pool: {} total, {} available",
            self.warriors.total_size(),
            self.warriors.available_size()
        );
        tracing::info!(
            "Rock pool: {} total, {} available",
            self.rocks.total_size(),
            self.rocks.available_size()
        );
        self.sprites.shutdown();
    }
}
