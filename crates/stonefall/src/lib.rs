//! # STONEFALL
//!
//! The frame loop that drives the level state machine, plus the pieces that
//! let it run without a window.
//!
//! ## Modules
//!
//! - `game_loop`: `GameController`, FPS counter and HUD
//! - `headless`: a `Renderer` that records draw calls
//! - `textures`: placeholder sprite sheets

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod game_loop;
pub mod headless;
pub mod textures;

pub use game_loop::{FpsCounter, GameController, TickOutcome};
pub use headless::{DrawCall, HeadlessRenderer};
pub use textures::write_placeholder_textures;

pub use stonefall_sim as sim;
