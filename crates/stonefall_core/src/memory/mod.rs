//! # Memory Management
//!
//! Arena and pools that back every long-lived object in the simulation.
//!
//! ## Design Philosophy
//!
//! Memory is reserved once at startup. During a frame:
//! - Asset bytes come out of the arena and are only reclaimed by a bulk reset
//! - Entities come out of pools and go back to them; pools only grow
//! - Handles are generational, so a recycled slot never aliases an old owner

mod arena;
mod pool;

pub use arena::{Arena, ArenaBlock};
pub use pool::{ObjectPool, PoolHandle};
