//! # STONEFALL Assets
//!
//! Everything between a path on disk and pixels a renderer can draw.
//!
//! ## Flow
//!
//! ```text
//! path ──► AssetCache::load ──► arena bytes ──► tga::decode ──► Sprite
//!            (read once)          (bump)          (BGR→RGB)      (pooled)
//! ```
//!
//! All reads are synchronous. Failures are logged where they happen and
//! returned; callers keep going with a sprite that draws nothing.

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cache;
pub mod error;
pub mod file_io;
pub mod sprite;
pub mod tga;

pub use cache::{AssetBlob, AssetCache};
pub use error::{AssetError, AssetResult, ImageError, ImageResult};
pub use sprite::{FrameRect, Sprite, SpriteStore};
pub use tga::{DecodedImage, Origin};
