//! # Renderer Collaborator
//!
//! The window, GPU upload and text rasterisation live outside this crate.
//! Scenes only need somewhere to send clear, sprite-frame and text calls.

use bytemuck::{Pod, Zeroable};
use stonefall_assets::{FrameRect, Sprite};

use crate::error::SimResult;

/// RGBA colour, persisted as four raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Creates a colour from its channels.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Draw target driven once per frame: `clear`, draws, `present`.
pub trait Renderer {
    /// Opens the output surface.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Renderer`](crate::SimError::Renderer) if the
    /// surface cannot be created.
    fn initialize(&mut self, title: &str, width: u32, height: u32) -> SimResult<()>;

    /// Fills the frame with `color`.
    fn clear(&mut self, color: Color);

    /// Draws one frame of a sprite sheet at world position `(x, y)`.
    fn draw_sprite_frame(&mut self, sprite: &Sprite, frame: FrameRect, x: f32, y: f32, scale: f32);

    /// Draws a line of HUD text.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color);

    /// Shows the finished frame.
    fn present(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_is_four_raw_bytes() {
        let c = Color::rgba(1, 2, 3, 4);
        assert_eq!(bytemuck::bytes_of(&c), &[1, 2, 3, 4]);
        assert_eq!(std::mem::size_of::<Color>(), 4);
    }
}
