//! Rock: falls down until it hits a warrior.

use stonefall_assets::{Sprite, SpriteStore};
use stonefall_core::{ByteReader, ByteWriter, CoreError, CoreResult, PoolHandle, Serializable};

use super::{draw_frame, ensure_sprite, Spawn};
use crate::collision::Aabb;
use crate::constants::{FRAME_SIZE, ROCK_SPRITE};
use crate::render::Renderer;

/// Pooled falling rock.
#[derive(Debug)]
pub struct Rock {
    x: f32,
    y: f32,
    speed: f32,
    scale: f32,
    anim_speed: f32,
    anim_timer: f32,
    frame: i32,
    active: bool,
    sprite: Option<PoolHandle<Sprite>>,
}

impl Default for Rock {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            speed: 0.0,
            scale: 1.0,
            anim_speed: 0.0,
            anim_timer: 0.0,
            frame: 0,
            active: true,
            sprite: None,
        }
    }
}

impl Rock {
    /// Frames in the rock sheet.
    pub const FRAMES: i32 = 4;

    /// Overwrites every field for a fresh spawn.
    pub fn initialize(&mut self, spawn: Spawn, sprites: &mut SpriteStore) {
        self.x = spawn.x;
        self.y = spawn.y;
        self.speed = spawn.speed;
        self.anim_speed = spawn.anim_speed;
        self.scale = spawn.scale;
        self.anim_timer = 0.0;
        self.frame = 0;
        self.active = true;
        self.sprite = Some(ensure_sprite(self.sprite, ROCK_SPRITE, sprites));
    }

    /// Falls and animates while active.
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.y += self.speed * dt;

        self.anim_timer += dt * self.anim_speed;
        if self.anim_timer >= 1.0 {
            self.anim_timer -= 1.0;
            self.frame = (self.frame + 1) % Self::FRAMES;
        }
    }

    /// Draws the current frame while active.
    pub fn draw(&self, sprites: &SpriteStore, renderer: &mut dyn Renderer) {
        if self.active {
            draw_frame(sprites, self.sprite, self.frame, Self::FRAMES, (self.x, self.y, self.scale), renderer);
        }
    }

    /// World-space bounds.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let size = FRAME_SIZE * self.scale;
        Aabb::new(self.x, self.y, size, size)
    }

    /// Still falling and collidable.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Marks the rock spent.
    pub fn deactivate(&mut self) {
        self.active = false;
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

    /// Current frame index.
    #[must_use]
    pub const fn frame(&self) -> i32 {
        self.frame
    }

    /// Sheet handle.
    #[must_use]
    pub const fn sprite(&self) -> Option<PoolHandle<Sprite>> {
        self.sprite
    }

    /// Moves the rock. Used to stage collisions.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }
}

impl Serializable<SpriteStore> for Rock {
    fn serialize(&self, out: &mut ByteWriter) {
        out.write_f32(self.x);
        out.write_f32(self.y);
        out.write_f32(self.speed);
        out.write_f32(self.scale);
        out.write_f32(self.anim_speed);
        out.write_f32(self.anim_timer);
        out.write_i32(self.frame);
        out.write_bool(self.active);
    }

    fn deserialize(&mut self, input: &mut ByteReader<'_>, sprites: &mut SpriteStore) -> CoreResult<()> {
        let x = input.read_f32()?;
        let y = input.read_f32()?;
        let speed = input.read_f32()?;
        let scale = input.read_f32()?;
        let anim_speed = input.read_f32()?;
        let anim_timer = input.read_f32()?;
        let frame = input.read_i32()?;
        if !(0..Self::FRAMES).contains(&frame) {
            return Err(CoreError::InvalidValue {
                field: "current_frame",
                value: i64::from(frame),
            });
        }
        let active = input.read_bool()?;

        *self = Self {
            x,
            y,
            speed,
            scale,
            anim_speed,
            anim_timer,
            frame,
            active,
            sprite: Some(ensure_sprite(self.sprite, ROCK_SPRITE, sprites)),
        };
        Ok(())
    }
}
