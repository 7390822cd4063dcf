//! Renderer that records draw calls instead of drawing.

use stonefall_assets::{FrameRect, Sprite};
use stonefall_sim::{Color, Renderer, SimError, SimResult};

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// Frame cleared.
    Clear(Color),
    /// Sprite-sheet frame drawn.
    Sprite {
        /// Sheet path.
        path: String,
        /// Source rectangle.
        frame: FrameRect,
        /// World x.
        x: f32,
        /// World y.
        y: f32,
        /// Draw scale.
        scale: f32,
    },
    /// HUD text drawn.
    Text {
        /// Text content.
        text: String,
        /// Screen x.
        x: i32,
        /// Screen y.
        y: i32,
        /// Colour.
        color: Color,
    },
    /// Frame presented.
    Present,
}

/// Headless [`Renderer`]. Keeps the calls of the frame in progress (or the
/// last presented one) and counts presented frames.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    calls: Vec<DrawCall>,
    frames_presented: u64,
    surface: Option<(u32, u32)>,
    refuse_init: bool,
}

impl HeadlessRenderer {
    /// Creates a renderer that initializes successfully.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer whose initialization fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            refuse_init: true,
            ..Self::default()
        }
    }

    /// Calls recorded since the last clear.
    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of `present` calls.
    #[must_use]
    pub const fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Surface size once initialized.
    #[must_use]
    pub const fn surface(&self) -> Option<(u32, u32)> {
        self.surface
    }

    /// Text lines recorded since the last clear.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Sprite draws recorded since the last clear.
    #[must_use]
    pub fn sprite_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Sprite { .. }))
            .count()
    }
}

impl Renderer for HeadlessRenderer {
    fn initialize(&mut self, title: &str, width: u32, height: u32) -> SimResult<()> {
        if self.refuse_init {
            return Err(SimError::Renderer(format!("no surface available for '{title}'")));
        }
        self.surface = Some((width, height));
        tracing::info!("Headless renderer ready: '{}' {}x{}", title, width, height);
        Ok(())
    }

    fn clear(&mut self, color: Color) {
        self.calls.clear();
        self.calls.push(DrawCall::Clear(color));
    }

    fn draw_sprite_frame(&mut self, sprite: &Sprite, frame: FrameRect, x: f32, y: f32, scale: f32) {
        self.calls.push(DrawCall::Sprite {
            path: sprite.path().to_owned(),
            frame,
            x,
            y,
            scale,
        });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_owned(),
            x,
            y,
            color,
        });
    }

    fn present(&mut self) {
        self.calls.push(DrawCall::Present);
        self.frames_presented += 1;
    }
}
