//! Warrior: runs right, dies when hit.
//!
//! ## Lifecycle
//!
//! ```text
//! Running ──start_death()──► Dying ──8 frames──► Dead
//! ```
//!
//! Transitions only move forward.

use stonefall_assets::{Sprite, SpriteStore};
use stonefall_core::{ByteReader, ByteWriter, CoreError, CoreResult, PoolHandle, Serializable};

use super::{draw_frame, ensure_sprite, Spawn};
use crate::collision::Aabb;
use crate::constants::{FRAME_SIZE, WARRIOR_DEATH_SPRITE, WARRIOR_RUN_SPRITE};
use crate::render::Renderer;

/// Warrior lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifeState {
    /// Moving and looping the run animation.
    #[default]
    Running,
    /// Playing the death animation in place.
    Dying,
    /// Finished; no longer updated or drawn.
    Dead,
}

impl LifeState {
    /// Persisted code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Running => 0,
            Self::Dying => 1,
            Self::Dead => 2,
        }
    }

    /// Parses a persisted code.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidValue`] for anything but 0, 1 or 2.
    pub const fn from_code(code: i32) -> CoreResult<Self> {
        match code {
            0 => Ok(Self::Running),
            1 => Ok(Self::Dying),
            2 => Ok(Self::Dead),
            _ => Err(CoreError::InvalidValue {
                field: "lifecycle_state",
                value: code as i64,
            }),
        }
    }
}

/// Pooled warrior.
#[derive(Debug)]
pub struct Warrior {
    x: f32,
    y: f32,
    speed: f32,
    scale: f32,
    anim_speed: f32,
    anim_timer: f32,
    frame: i32,
    state: LifeState,
    run_sprite: Option<PoolHandle<Sprite>>,
    death_sprite: Option<PoolHandle<Sprite>>,
}

impl Default for Warrior {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            speed: 0.0,
            scale: 1.0,
            anim_speed: 0.0,
            anim_timer: 0.0,
            frame: 0,
            state: LifeState::Running,
            run_sprite: None,
            death_sprite: None,
        }
    }
}

impl Warrior {
    /// Frames in the run sheet.
    pub const RUN_FRAMES: i32 = 6;
    /// Frames in the death sheet.
    pub const DEATH_FRAMES: i32 = 8;

    /// Overwrites every field for a fresh spawn.
    pub fn initialize(&mut self, spawn: Spawn, sprites: &mut SpriteStore) {
        self.x = spawn.x;
        self.y = spawn.y;
        self.speed = spawn.speed;
        self.anim_speed = spawn.anim_speed;
        self.scale = spawn.scale;
        self.anim_timer = 0.0;
        self.frame = 0;
        self.state = LifeState::Running;
        self.ensure_sprites(sprites);
    }

    fn ensure_sprites(&mut self, sprites: &mut SpriteStore) {
        self.run_sprite = Some(ensure_sprite(self.run_sprite, WARRIOR_RUN_SPRITE, sprites));
        self.death_sprite = Some(ensure_sprite(self.death_sprite, WARRIOR_DEATH_SPRITE, sprites));
    }

    /// Advances position and animation by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.state == LifeState::Dead {
            return;
        }
        if self.state == LifeState::Running {
            self.x += self.speed * dt;
        }

        self.anim_timer += dt * self.anim_speed;
        if self.anim_timer >= 1.0 {
            self.anim_timer -= 1.0;
            match self.state {
                LifeState::Running => self.frame = (self.frame + 1) % Self::RUN_FRAMES,
                LifeState::Dying => {
                    self.frame += 1;
                    if self.frame >= Self::DEATH_FRAMES {
                        self.state = LifeState::Dead;
                    }
                }
                LifeState::Dead => {}
            }
        }
    }

    /// Switches a running warrior to its death animation. No-op otherwise.
    pub fn start_death(&mut self) {
        if self.state == LifeState::Running {
            self.state = LifeState::Dying;
            self.frame = 0;
            self.anim_timer = 0.0;
        }
    }

    /// Draws the current frame of the run or death sheet.
    pub fn draw(&self, sprites: &SpriteStore, renderer: &mut dyn Renderer) {
        let (sheet, frames) = match self.state {
            LifeState::Running => (self.run_sprite, Self::RUN_FRAMES),
            LifeState::Dying => (self.death_sprite, Self::DEATH_FRAMES),
            LifeState::Dead => return,
        };
        draw_frame(sprites, sheet, self.frame, frames, (self.x, self.y, self.scale), renderer);
    }

    /// World-space bounds.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let size = FRAME_SIZE * self.scale;
        Aabb::new(self.x, self.y, size, size)
    }

    /// True once the left edge is past `world_width`.
    #[must_use]
    pub fn is_off_screen(&self, world_width: f32) -> bool {
        self.x > world_width
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> LifeState {
        self.state
    }

    /// Running and collidable.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == LifeState::Running
    }

    /// Playing the death animation.
    #[must_use]
    pub fn is_dying(&self) -> bool {
        self.state == LifeState::Dying
    }

    /// Finished dying.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.state == LifeState::Dead
    }

    /// Left edge.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Top edge.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Pixels per second.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Animation frames per second.
    #[must_use]
    pub const fn anim_speed(&self) -> f32 {
        self.anim_speed
    }

    /// Current frame index in the active sheet.
    #[must_use]
    pub const fn frame(&self) -> i32 {
        self.frame
    }

    /// Run sheet handle.
    #[must_use]
    pub const fn run_sprite(&self) -> Option<PoolHandle<Sprite>> {
        self.run_sprite
    }

    /// Death sheet handle.
    #[must_use]
    pub const fn death_sprite(&self) -> Option<PoolHandle<Sprite>> {
        self.death_sprite
    }

    /// Moves the warrior. Used to stage collisions.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }
}

impl Serializable<SpriteStore> for Warrior {
    fn serialize(&self, out: &mut ByteWriter) {
        out.write_f32(self.x);
        out.write_f32(self.y);
        out.write_f32(self.speed);
        out.write_f32(self.scale);
        out.write_f32(self.anim_speed);
        out.write_f32(self.anim_timer);
        out.write_i32(self.frame);
        out.write_i32(self.state.code());
    }

    fn deserialize(&mut self, input: &mut ByteReader<'_>, sprites: &mut SpriteStore) -> CoreResult<()> {
        let x = input.read_f32()?;
        let y = input.read_f32()?;
        let speed = input.read_f32()?;
        let scale = input.read_f32()?;
        let anim_speed = input.read_f32()?;
        let anim_timer = input.read_f32()?;
        let frame = input.read_i32()?;
        let state = LifeState::from_code(input.read_i32()?)?;
        // Dead keeps the frame count it finished on.
        let frames = match state {
            LifeState::Running => Self::RUN_FRAMES,
            LifeState::Dying => Self::DEATH_FRAMES,
            LifeState::Dead => Self::DEATH_FRAMES + 1,
        };
        if !(0..frames).contains(&frame) {
            return Err(CoreError::InvalidValue {
                field: "current_frame",
                value: i64::from(frame),
            });
        }

        *self = Self {
            x,
            y,
            speed,
            scale,
            anim_speed,
            anim_timer,
            frame,
            state,
            run_sprite: self.run_sprite,
            death_sprite: self.death_sprite,
        };
        self.ensure_sprites(sprites);
        Ok(())
    }
}
