//! # Asset Error Types
//!
//! I/O, capacity and format failures raised while loading assets.

use std::io;
use std::path::PathBuf;

use stonefall_core::CoreError;
use thiserror::Error;

/// Errors raised while decoding or encoding a TGA image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// The buffer is shorter than the fixed 18-byte header.
    #[error("image header too short: {len} bytes, need 18")]
    HeaderTooShort {
        /// Length of the buffer.
        len: usize,
    },

    /// Only uncompressed true-color (type 2) images are accepted.
    #[error("unsupported TGA image type {0} (only type 2, uncompressed true-color)")]
    UnsupportedImageType(u8),

    /// Only 24 and 32 bits per pixel are accepted.
    #[error("unsupported TGA bit depth {0} (only 24 or 32)")]
    UnsupportedBitDepth(u8),

    /// The pixel block after the header is shorter than width x height.
    #[error("pixel data truncated: need {expected} bytes, have {actual}")]
    PixelDataTruncated {
        /// Bytes the pixel block must hold.
        expected: usize,
        /// Bytes actually available after the data offset.
        actual: usize,
    },

    /// Encoder input does not match the declared dimensions.
    #[error("pixel buffer holds {actual} bytes, {width}x{height} needs {expected}")]
    PixelCountMismatch {
        /// Declared width.
        width: u16,
        /// Declared height.
        height: u16,
        /// Bytes the dimensions need.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
}

/// Errors that can occur while loading or storing assets.
#[derive(Error, Debug)]
pub enum AssetError {
    /// A file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A file could not be created or written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The arena had no room for the file's bytes.
    #[error("no arena space for {path}: {source}")]
    ArenaExhausted {
        /// File that was being cached.
        path: PathBuf,
        /// Arena failure.
        source: CoreError,
    },

    /// A blob was resolved after the cache was shut down.
    #[error("asset {0} is no longer resident")]
    NotResident(PathBuf),

    /// The bytes did not decode as a supported image.
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Result type for asset operations.
pub type AssetResult<T> = Result<T, AssetError>;

/// Result type for image codec operations.
pub type ImageResult<T> = Result<T, ImageError>;
