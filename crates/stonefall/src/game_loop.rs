//! # STONEFALL Game Loop
//!
//! ```text
//! Frame N:
//! ┌──────────────────────────────────────────────────────────────┐
//! │ 1. CLAMP dt to max_frame_delta, record FPS                   │
//! │ 2. UPDATE   scene: move → collide → prune → autosave         │
//! │ 3. TRANSITION Level1 → Level2 (warrior handles move across)  │
//! │ 4. RENDER   clear(background) → scene → HUD → present        │
//! │ 5. QUIT TEST                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything happens on the calling thread; save and load stall the frame.

use std::time::{Duration, Instant};

use stonefall_sim::{Color, Renderer, Scene, Services, SimConfig, SimResult};

/// Window title handed to the renderer.
pub const WINDOW_TITLE: &str = "STONEFALL";

/// Target frame time for 60 FPS.
pub const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

/// HUD text colour.
pub const HUD_COLOR: Color = Color::rgba(0, 0, 255, 255);

/// Frames-per-second over a rolling one-second window.
#[derive(Clone, Copy, Debug, Default)]
pub struct FpsCounter {
    fps: f32,
    frames: u32,
    window: f32,
}

impl FpsCounter {
    /// Counts one frame of `dt` seconds.
    #[allow(clippy::cast_precision_loss)]
    pub fn record(&mut self, dt: f32) {
        self.frames += 1;
        self.window += dt;
        if self.window >= 1.0 {
            self.fps = self.frames as f32 / self.window;
            self.frames = 0;
            self.window = 0.0;
        }
    }

    /// FPS of the last completed window; zero before the first one.
    #[must_use]
    pub const fn fps(&self) -> f32 {
        self.fps
    }
}

/// What the loop should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep going.
    Continue,
    /// The scene asked to stop.
    Quit,
}

/// Owns the services, the active scene and the renderer, and drives frames.
#[derive(Debug)]
pub struct GameController<R: Renderer> {
    services: Services,
    scene: Option<Scene>,
    renderer: R,
    fps: FpsCounter,
    frames: u64,
}

impl<R: Renderer> GameController<R> {
    /// Builds the services from `config`. Call [`GameController::initialize`]
    /// before ticking.
    #[must_use]
    pub fn new(config: SimConfig, renderer: R) -> Self {
        Self {
            services: Services::new(config),
            scene: None,
            renderer,
            fps: FpsCounter::default(),
            frames: 0,
        }
    }

    /// Opens the render surface and starts level 1.
    ///
    /// # Errors
    ///
    /// Returns the renderer's error; no scene is built in that case.
    pub fn initialize(&mut self) -> SimResult<()> {
        // World size is positive after config validation.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (width, height) = (
            self.services.config.world_width as u32,
            self.services.config.world_height as u32,
        );
        if let Err(err) = self.renderer.initialize(WINDOW_TITLE, width, height) {
            tracing::error!("Renderer initialization failed: {}", err);
            return Err(err);
        }

        self.scene = Some(Scene::start(&mut self.services));
        tracing::info!("Game initialized at Level 1");
        Ok(())
    }

    /// Runs one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        let Some(scene) = self.scene.as_mut() else {
            tracing::warn!("Tick without an active scene");
            return TickOutcome::Quit;
        };

        let dt = dt.min(self.services.config.max_frame_delta).max(0.0);
        self.fps.record(dt);
        self.frames += 1;

        scene.update(dt, &mut self.services);
        if scene.should_transition(&self.services) {
            scene.transition(&mut self.services);
        }

        self.renderer.clear(scene.background());
        scene.render(&self.services, &mut self.renderer);
        draw_hud(&mut self.renderer, self.fps.fps(), scene);
        self.renderer.present();

        if scene.should_quit(&self.services) {
            tracing::info!(
                "Level {} finished after {} frames ({:.2}s in level)",
                scene.level_number(),
                self.frames,
                scene.game_time()
            );
            return TickOutcome::Quit;
        }
        TickOutcome::Continue
    }

    /// Ticks with a fixed `dt` until the scene quits or `max_frames` ran.
    /// Returns the frames run.
    pub fn run_fixed(&mut self, dt: f32, max_frames: u64) -> u64 {
        let mut ran = 0;
        while ran < max_frames {
            ran += 1;
            if self.tick(dt) == TickOutcome::Quit {
                break;
            }
        }
        ran
    }

    /// Ticks with wall-clock deltas, sleeping out the rest of each frame
    /// budget, until the scene quits. Returns the frames run.
    pub fn run_realtime(&mut self) -> u64 {
        let mut ran = 0;
        let mut last = Instant::now();
        loop {
            let start = Instant::now();
            let dt = start.duration_since(last).as_secs_f32();
            last = start;

            ran += 1;
            if self.tick(dt) == TickOutcome::Quit {
                return ran;
            }

            let spent = start.elapsed();
            if spent < TARGET_FRAME_TIME {
                std::thread::sleep(TARGET_FRAME_TIME - spent);
            }
        }
    }

    /// Returns every scene handle to its pool, logs pool statistics and
    /// resets the asset arena.
    pub fn shutdown(&mut self) {
        if let Some(mut scene) = self.scene.take() {
            scene.release_all(&mut self.services);
        }
        self.services.shutdown();
        tracing::info!("Shutdown complete after {} frames", self.frames);
    }

    /// Active scene, if initialized.
    #[must_use]
    pub const fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Shared resources.
    #[must_use]
    pub const fn services(&self) -> &Services {
        &self.services
    }

    /// Mutable shared resources.
    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    /// The renderer.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// FPS bookkeeping.
    #[must_use]
    pub const fn fps(&self) -> &FpsCounter {
        &self.fps
    }

    /// Frames ticked so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }
}

fn draw_hud(renderer: &mut impl Renderer, fps: f32, scene: &Scene) {
    let status = if scene.is_auto_saved() { "Saved" } else { "Not Saved" };
    renderer.draw_text(&format!("FPS: {fps:.1}"), 10, 10, HUD_COLOR);
    renderer.draw_text(&format!("Time: {:.2}s", scene.game_time()), 200, 10, HUD_COLOR);
    renderer.draw_text(&format!("Status: {status}"), 400, 10, HUD_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessRenderer;

    #[test]
    fn test_fps_window() {
        let mut fps = FpsCounter::default();
        for _ in 0..3 {
            fps.record(0.25);
        }
        assert!(fps.fps().abs() < f32::EPSILON);

        fps.record(0.25);
        assert!((fps.fps() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_tick_before_initialize_quits() {
        let mut game = GameController::new(SimConfig::default(), HeadlessRenderer::new());
        assert_eq!(game.tick(0.016), TickOutcome::Quit);
        assert_eq!(game.frames(), 0);
    }

    #[test]
    fn test_dt_is_clamped() {
        let config = SimConfig {
            seed: Some(1),
            arena_bytes: 1024,
            ..SimConfig::default()
        };
        let mut game = GameController::new(config, HeadlessRenderer::new());
        game.initialize().unwrap();

        game.tick(5.0);
        let time = game.scene().unwrap().game_time();
        assert!((time - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_hud_lines() {
        let config = SimConfig {
            seed: Some(1),
            arena_bytes: 1024,
            ..SimConfig::default()
        };
        let mut game = GameController::new(config, HeadlessRenderer::new());
        game.initialize().unwrap();
        game.tick(0.05);

        let texts: Vec<&str> = game.renderer().texts().collect();
        assert_eq!(texts, ["FPS: 0.0", "Time: 0.05s", "Status: Not Saved"]);
        assert_eq!(game.renderer().surface(), Some((1920, 1080)));
    }
}
