//! # Core Error Types
//!
//! All errors raised by the arena, the pools and the byte codec.

use thiserror::Error;

/// Errors that can occur in the core memory and persistence layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The arena cannot satisfy an allocation without exceeding its capacity.
    #[error("arena exhausted: requested {requested} bytes, {remaining} remaining")]
    ArenaExhausted {
        /// Bytes requested.
        requested: usize,
        /// Bytes still free when the request was made.
        remaining: usize,
    },

    /// A record ended before all of its fields could be read.
    #[error("unexpected end of data: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes the next field needs.
        needed: usize,
        /// Bytes left in the source.
        remaining: usize,
    },

    /// A size-word does not fit the platform's `usize`.
    #[error("size word {0} does not fit in memory")]
    SizeOverflow(u64),

    /// A field decoded to a value outside its domain.
    #[error("invalid value {value} for field `{field}`")]
    InvalidValue {
        /// Field name as it appears in the record layout.
        field: &'static str,
        /// The raw decoded value.
        value: i64,
    },

    /// A persisted string was not valid UTF-8.
    #[error("persisted text is not valid UTF-8")]
    InvalidUtf8,

    /// A pool handle no longer refers to a checked-out object.
    #[error("stale pool handle (slot {index}, generation {generation})")]
    StaleHandle {
        /// Slot index.
        index: u32,
        /// Generation carried by the handle.
        generation: u32,
    },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
