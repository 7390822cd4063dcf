//! # Pooled Entities
//!
//! Warriors run right, rocks fall down. Both live in an `ObjectPool` and are
//! addressed by handle; a scene only owns the ordered list of handles.
//!
//! Reused objects keep stale fields until `initialize` or `deserialize`
//! overwrites them. Sprite handles survive reuse and are only re-acquired
//! when missing or stale.

mod rock;
mod warrior;

pub use rock::Rock;
pub use warrior::{LifeState, Warrior};

use stonefall_assets::{Sprite, SpriteStore};
use stonefall_core::PoolHandle;

use crate::constants::anim_speed_for;
use crate::render::Renderer;

/// Initial placement and motion for a freshly spawned entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Pixels per second.
    pub speed: f32,
    /// Animation frames per second.
    pub anim_speed: f32,
    /// Draw scale.
    pub scale: f32,
}

impl Spawn {
    /// Spawn whose animation rate follows from its speed.
    #[must_use]
    pub fn with_speed(x: f32, y: f32, speed: f32, scale: f32) -> Self {
        Self {
            x,
            y,
            speed,
            anim_speed: anim_speed_for(speed),
            scale,
        }
    }
}

/// Returns `slot` if it still resolves, otherwise acquires and loads `path`.
fn ensure_sprite(
    slot: Option<PoolHandle<Sprite>>,
    path: &str,
    sprites: &mut SpriteStore,
) -> PoolHandle<Sprite> {
    match slot {
        Some(handle) if sprites.get(handle).is_some() => handle,
        _ => sprites.acquire_loaded(path),
    }
}

/// Draws one frame of a sheet if the sprite resolves and holds an image.
fn draw_frame(
    sprites: &SpriteStore,
    handle: Option<PoolHandle<Sprite>>,
    frame: i32,
    frame_count: i32,
    (x, y, scale): (f32, f32, f32),
    renderer: &mut dyn Renderer,
) {
    let Some(sprite) = handle.and_then(|h| sprites.get(h)) else {
        return;
    };
    let (Ok(frame), Ok(frame_count)) = (u32::try_from(frame), u32::try_from(frame_count)) else {
        return;
    };
    if let Some(rect) = sprite.frame_rect(frame, frame_count) {
        renderer.draw_sprite_frame(sprite, rect, x, y, scale);
    }
}
