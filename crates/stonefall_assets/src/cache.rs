//! # Asset Cache
//!
//! Maps a requested path to the raw file bytes, copied once into the arena.
//! A path is read from disk at most once while it stays cached.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use stonefall_core::{Arena, ArenaBlock};

use crate::error::{AssetError, AssetResult};
use crate::file_io;

/// Handle to a cached file's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetBlob {
    block: ArenaBlock,
}

impl AssetBlob {
    /// Size of the cached file in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.block.len()
    }

    /// Returns true for an empty file.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.block.is_empty()
    }
}

/// Path-keyed cache of raw file bytes backed by an [`Arena`].
///
/// Relative paths are resolved against the cache's root directory; the key
/// is always the path as requested.
#[derive(Debug)]
pub struct AssetCache {
    root: PathBuf,
    arena: Arena,
    entries: HashMap<PathBuf, AssetBlob>,
}

impl AssetCache {
    /// Creates a cache that resolves relative paths against the working
    /// directory.
    #[must_use]
    pub fn new(arena: Arena) -> Self {
        Self::with_root(arena, PathBuf::new())
    }

    /// Creates a cache that resolves relative paths against `root`.
    #[must_use]
    pub fn with_root(arena: Arena, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            arena,
            entries: HashMap::new(),
        }
    }

    /// Root directory relative paths are resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Backing arena, for usage reporting.
    #[must_use]
    pub const fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Number of cached paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `path` is cached.
    #[must_use]
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(path.as_ref())
    }

    /// Returns the blob for `path`, reading the file on first request.
    ///
    /// On failure the cache is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Read`] if the file cannot be read or
    /// [`AssetError::ArenaExhausted`] if its bytes do not fit.
    pub fn load(&mut self, path: impl AsRef<Path>) -> AssetResult<AssetBlob> {
        let path = path.as_ref();
        if let Some(&blob) = self.entries.get(path) {
            return Ok(blob);
        }

        let bytes = file_io::read_file(&self.root.join(path))?;
        let block = self.arena.alloc_copy(&bytes).map_err(|source| {
            tracing::warn!(
                "Arena full, cannot cache {} ({} bytes, {} remaining)",
                path.display(),
                bytes.len(),
                self.arena.remaining()
            );
            AssetError::ArenaExhausted {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let blob = AssetBlob { block };
        self.entries.insert(path.to_path_buf(), blob);
        tracing::debug!("Cached {} ({} bytes)", path.display(), blob.len());
        Ok(blob)
    }

    /// Loads `path` and returns its bytes.
    ///
    /// # Errors
    ///
    /// Same as [`AssetCache::load`].
    pub fn load_bytes(&mut self, path: impl AsRef<Path>) -> AssetResult<&[u8]> {
        let path = path.as_ref();
        let blob = self.load(path)?;
        self.arena
            .get(blob.block)
            .ok_or_else(|| AssetError::NotResident(path.to_path_buf()))
    }

    /// Resolves a blob to its bytes. Returns `None` after [`shutdown`].
    ///
    /// [`shutdown`]: AssetCache::shutdown
    #[must_use]
    pub fn bytes(&self, blob: AssetBlob) -> Option<&[u8]> {
        self.arena.get(blob.block)
    }

    /// Forgets `path`. The arena bytes stay until the next shutdown.
    pub fn unload(&mut self, path: impl AsRef<Path>) -> bool {
        self.entries.remove(path.as_ref()).is_some()
    }

    /// Drops every entry and resets the arena. Outstanding blobs become
    /// unresolvable.
    pub fn shutdown(&mut self) {
        tracing::info!(
            "Asset cache shutdown: {} entries, {} of {} arena bytes used",
            self.entries.len(),
            self.arena.used(),
            self.arena.capacity()
        );
        self.entries.clear();
        self.arena.reset();
    }
}
