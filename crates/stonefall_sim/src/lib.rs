//! # STONEFALL Sim
//!
//! The scene state machine and the pooled entities it drives.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Services (single owner, passed by &mut)                 │
//! │  ├── SpriteStore ── AssetCache ── Arena                  │
//! │  ├── ObjectPool<Warrior>                                 │
//! │  ├── ObjectPool<Rock>                                    │
//! │  └── ChaCha8Rng (seedable)                               │
//! └──────────────────────────────────────────────────────────┘
//!                 ▲ handles                ▲ handles
//!         ┌───────┴──────┐         ┌───────┴──────┐
//!         │    Level1    │ ──────► │    Level2    │
//!         └──────────────┘ warriors└──────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use stonefall_sim::{Scene, Services, SimConfig};
//!
//! let config = SimConfig { seed: Some(1), arena_bytes: 1024, ..SimConfig::default() };
//! let mut services = Services::new(config);
//! let mut scene = Scene::start(&mut services);
//!
//! scene.update(0.016, &mut services);
//! assert_eq!(scene.level_number(), 1);
//! assert_eq!(scene.warriors().len(), 10);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod collision;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod render;
pub mod scene;
pub mod services;

pub use collision::Aabb;
pub use config::SimConfig;
pub use entities::{LifeState, Rock, Spawn, Warrior};
pub use error::{SimError, SimResult};
pub use render::{Color, Renderer};
pub use scene::{Level1, Level2, LevelState, Scene};
pub use services::Services;
