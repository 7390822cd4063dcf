//! # Scene State Machine
//!
//! ```text
//!            spawn                 first warrior past world edge
//! ──────► Level1 ─────────────────────────────────────────► Level2 ──► quit
//!          │  ▲                      (warriors handed over)   │
//!          └──┘ update / render / autosave+verify             └── update / collide / prune / autosave
//! ```
//!
//! A scene owns the ordered handle list of its entities; the entities
//! themselves live in the pools inside [`Services`]. Index 0 of the warrior
//! list is the lead warrior for the transition and quit tests.
//!
//! Within one update: entities move, rocks collide, spent entities are pruned
//! and released, then the autosave check runs.

mod autosave;
mod codec;
mod level1;
mod level2;

pub use level1::Level1;
pub use level2::Level2;

use stonefall_core::{ObjectPool, PoolHandle};

use crate::entities::{Rock, Warrior};
use crate::render::{Color, Renderer};
use crate::services::Services;

/// Fields every level carries and persists.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelState {
    game_time: f32,
    auto_saved: bool,
    background: Color,
    warriors: Vec<PoolHandle<Warrior>>,
}

impl LevelState {
    fn new(background: Color, warriors: Vec<PoolHandle<Warrior>>) -> Self {
        Self {
            game_time: 0.0,
            auto_saved: false,
            background,
            warriors,
        }
    }

    fn update_warriors(&self, dt: f32, pool: &mut ObjectPool<Warrior>) {
        for &handle in &self.warriors {
            if let Some(warrior) = pool.get_mut(handle) {
                warrior.update(dt);
            }
        }
    }

    fn lead_off_screen(&self, pool: &ObjectPool<Warrior>, world_width: f32) -> bool {
        self.warriors
            .first()
            .and_then(|&handle| pool.get(handle))
            .is_some_and(|warrior| warrior.is_off_screen(world_width))
    }

    fn release_warriors(&mut self, pool: &mut ObjectPool<Warrior>) {
        for handle in self.warriors.drain(..) {
            pool.release(handle);
        }
    }
}

/// The active level.
#[derive(Debug)]
pub enum Scene {
    /// Warriors run across a grey field.
    Level1(Level1),
    /// Rocks fall on the surviving warriors.
    Level2(Level2),
}

impl Scene {
    /// Builds level 1 with freshly spawned warriors.
    #[must_use]
    pub fn start(services: &mut Services) -> Self {
        Self::Level1(Level1::spawn(services))
    }

    /// Persisted level number, also the save-file discriminant.
    #[must_use]
    pub const fn level_number(&self) -> i32 {
        match self {
            Self::Level1(_) => Level1::NUMBER,
            Self::Level2(_) => Level2::NUMBER,
        }
    }

    const fn state(&self) -> &LevelState {
        match self {
            Self::Level1(level) => &level.state,
            Self::Level2(level) => &level.state,
        }
    }

    /// Seconds simulated in this level.
    #[must_use]
    pub const fn game_time(&self) -> f32 {
        self.state().game_time
    }

    /// True once the autosave has been attempted.
    #[must_use]
    pub const fn is_auto_saved(&self) -> bool {
        self.state().auto_saved
    }

    /// Clear colour.
    #[must_use]
    pub const fn background(&self) -> Color {
        self.state().background
    }

    /// Live warriors in sequence order.
    #[must_use]
    pub fn warriors(&self) -> &[PoolHandle<Warrior>] {
        &self.state().warriors
    }

    /// Live rocks in sequence order; empty for level 1.
    #[must_use]
    pub fn rocks(&self) -> &[PoolHandle<Rock>] {
        match self {
            Self::Level1(_) => &[],
            Self::Level2(level) => level.rocks(),
        }
    }

    /// Advances the level by `dt` seconds.
    pub fn update(&mut self, dt: f32, services: &mut Services) {
        match self {
            Self::Level1(level) => level.update(dt, services),
            Self::Level2(level) => level.update(dt, services),
        }
    }

    /// Draws warriors, then rocks.
    pub fn render(&self, services: &Services, renderer: &mut dyn Renderer) {
        for &handle in self.warriors() {
            if let Some(warrior) = services.warriors.get(handle) {
                warrior.draw(&services.sprites, renderer);
            }
        }
        for &handle in self.rocks() {
            if let Some(rock) = services.rocks.get(handle) {
                rock.draw(&services.sprites, renderer);
            }
        }
    }

    /// True when this level wants to hand over to the next one.
    #[must_use]
    pub fn should_transition(&self, services: &Services) -> bool {
        match self {
            Self::Level1(level) => level.should_transition(services),
            Self::Level2(_) => false,
        }
    }

    /// True when the simulation should stop.
    #[must_use]
    pub fn should_quit(&self, services: &Services) -> bool {
        match self {
            Self::Level1(_) => false,
            Self::Level2(level) => level.should_quit(services),
        }
    }

    /// Replaces level 1 with level 2, moving the live warrior handles across
    /// untouched. Returns false if there is no next level.
    pub fn transition(&mut self, services: &mut Services) -> bool {
        let Self::Level1(level) = self else {
            return false;
        };
        let warriors = std::mem::take(&mut level.state.warriors);
        *self = Self::Level2(Level2::spawn(warriors, services));
        tracing::info!("Transitioned to Level {}", Level2::NUMBER);
        true
    }

    /// Returns every held handle to its pool and empties the scene.
    pub fn release_all(&mut self, services: &mut Services) {
        match self {
            Self::Level1(level) => level.state.release_warriors(&mut services.warriors),
            Self::Level2(level) => level.release_all(services),
        }
    }
}
