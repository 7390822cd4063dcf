//! World constants that are not configurable.

use crate::render::Color;

/// Width and height of one sprite-sheet frame, before scaling.
pub const FRAME_SIZE: f32 = 64.0;

/// Spawn speed range in pixels per second (upper bound exclusive).
pub const SPEED_MIN: f32 = 80.0;
/// See [`SPEED_MIN`].
pub const SPEED_MAX: f32 = 100.0;

/// Animation rate at [`SPEED_MIN`], in frames per second.
pub const ANIM_SPEED_MIN: f32 = 4.8;
/// Animation rate at [`SPEED_MAX`].
pub const ANIM_SPEED_MAX: f32 = 6.0;

/// Level 1 warrior column.
pub const WARRIOR_SPAWN_X: f32 = -100.0;
/// First warrior row.
pub const WARRIOR_SPAWN_Y: f32 = 10.0;
/// Vertical gap between warriors.
pub const WARRIOR_SPACING: f32 = 100.0;
/// Warrior draw scale.
pub const WARRIOR_SCALE: f32 = 1.8;

/// First rock column.
pub const ROCK_SPAWN_X: f32 = 50.0;
/// Horizontal gap between rocks.
pub const ROCK_SPACING: f32 = 100.0;
/// Level 2 rock row.
pub const ROCK_SPAWN_Y: f32 = -100.0;
/// Rock draw scale.
pub const ROCK_SCALE: f32 = 1.0;

/// Warrior run sheet.
pub const WARRIOR_RUN_SPRITE: &str = "Assets/Textures/warrior_run.tga";
/// Warrior death sheet.
pub const WARRIOR_DEATH_SPRITE: &str = "Assets/Textures/warrior_death.tga";
/// Rock sheet.
pub const ROCK_SPRITE: &str = "Assets/Textures/rock.tga";

/// Level 1 autosave file name.
pub const LEVEL1_SAVE_FILE: &str = "Level1.bin";
/// Level 2 autosave file name.
pub const LEVEL2_SAVE_FILE: &str = "Level2.bin";

/// Level 1 background.
pub const LEVEL1_BACKGROUND: Color = Color::rgba(128, 128, 128, 255);
/// Level 2 background.
pub const LEVEL2_BACKGROUND: Color = Color::rgba(0, 128, 0, 255);

/// Maps a spawn speed linearly onto the animation rate range.
#[must_use]
pub fn anim_speed_for(speed: f32) -> f32 {
    ANIM_SPEED_MIN + ((speed - SPEED_MIN) / (SPEED_MAX - SPEED_MIN)) * (ANIM_SPEED_MAX - ANIM_SPEED_MIN)
}
