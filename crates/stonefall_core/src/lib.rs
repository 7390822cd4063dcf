//! # STONEFALL Core
//!
//! Memory and persistence primitives shared by every other STONEFALL crate:
//!
//! - [`Arena`]: bump allocator over a fixed buffer, bulk reset only
//! - [`ObjectPool`]: generational recycler that never frees live objects
//! - [`ByteWriter`] / [`ByteReader`]: fixed-width little-endian codec
//! - [`Serializable`]: the contract entities implement to persist themselves
//!
//! ## Ownership Rules
//!
//! 1. **One owner** - the arena and every pool have exactly one logical owner
//!    (the frame loop). Nothing here is `Sync`-aware and nothing locks.
//! 2. **Handles, not pointers** - pooled objects are addressed through
//!    [`PoolHandle`], which carries a generation so stale handles are detected.
//! 3. **Symmetric records** - `serialize` and `deserialize` walk the same
//!    field order; counts prefix every variable-length sequence.
//!
//! ## Example
//!
//! ```rust
//! use stonefall_core::{ByteReader, ByteWriter, ObjectPool};
//!
//! let mut pool: ObjectPool<u32> = ObjectPool::with_capacity(4);
//! let handle = pool.acquire();
//! *pool.get_mut(handle).unwrap() = 7;
//!
//! let mut out = ByteWriter::new();
//! out.write_u32(*pool.get(handle).unwrap());
//! let bytes = out.into_bytes();
//! assert_eq!(ByteReader::new(&bytes).read_u32().unwrap(), 7);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod memory;
pub mod persist;

pub use error::{CoreError, CoreResult};
pub use memory::{Arena, ArenaBlock, ObjectPool, PoolHandle};
pub use persist::{read_sequence, write_sequence, ByteReader, ByteWriter, Serializable};
