//! # Sprites
//!
//! A sprite is a pooled `(path, decoded image)` pair. Only the path is ever
//! persisted; pixels are re-decoded from the asset cache on load.
//!
//! Sprite sheets are horizontal strips of equally wide frames:
//!
//! ```text
//! +--------+--------+--------+-----
//! | frame0 | frame1 | frame2 | ...     width / frame_count each
//! +--------+--------+--------+-----
//! ```

use stonefall_core::{ByteReader, ByteWriter, CoreError, CoreResult, ObjectPool, PoolHandle, Serializable};

use crate::cache::AssetCache;
use crate::error::AssetResult;
use crate::tga::{self, DecodedImage};

/// Source rectangle of one frame inside a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

/// Pooled image resource remembered by path.
#[derive(Debug, Default)]
pub struct Sprite {
    path: String,
    image: Option<DecodedImage>,
}

impl Sprite {
    /// Points this sprite at `path` and decodes it through `cache`.
    ///
    /// On failure the path is kept and the sprite has no image.
    ///
    /// # Errors
    ///
    /// Returns the cache or decoder error.
    pub fn load(&mut self, path: &str, cache: &mut AssetCache) -> AssetResult<()> {
        self.path.clear();
        self.path.push_str(path);
        self.image = None;

        let bytes = cache.load_bytes(path)?;
        match tga::decode(bytes) {
            Ok(image) => {
                tracing::debug!(
                    "Sprite {} decoded: {}x{} @ {} bpp",
                    path,
                    image.width(),
                    image.height(),
                    image.bits_per_pixel()
                );
                self.image = Some(image);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Failed to decode {}: {}", path, err);
                Err(err.into())
            }
        }
    }

    /// Drops the decoded image, keeping the path.
    pub fn unload(&mut self) {
        self.image = None;
    }

    /// Path this sprite was last pointed at.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Decoded pixels, if the last load succeeded.
    #[must_use]
    pub const fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }

    /// Returns true if a decoded image is held.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// Rectangle of frame `frame` when the sheet holds `frame_count` frames.
    ///
    /// `None` without an image, with zero frames, or past the last frame.
    #[must_use]
    pub fn frame_rect(&self, frame: u32, frame_count: u32) -> Option<FrameRect> {
        let image = self.image.as_ref()?;
        if frame_count == 0 || frame >= frame_count {
            return None;
        }
        let width = image.width() / frame_count;
        Some(FrameRect {
            x: frame * width,
            y: 0,
            width,
            height: image.height(),
        })
    }
}

impl Serializable<AssetCache> for Sprite {
    fn serialize(&self, out: &mut ByteWriter) {
        out.write_size(self.path.len());
        out.write_bytes(self.path.as_bytes());
    }

    fn deserialize(&mut self, input: &mut ByteReader<'_>, cache: &mut AssetCache) -> CoreResult<()> {
        let len = input.read_size()?;
        let path = std::str::from_utf8(input.read_bytes(len)?).map_err(|_| CoreError::InvalidUtf8)?;

        // A missing or broken file degrades the sprite; the record itself is fine.
        if self.load(path, cache).is_err() {
            tracing::warn!("Sprite {} restored without an image", path);
        }
        Ok(())
    }
}

/// Sprite pool plus the cache sprites load through.
#[derive(Debug)]
pub struct SpriteStore {
    cache: AssetCache,
    pool: ObjectPool<Sprite>,
}

impl SpriteStore {
    /// Creates a store seeded with `initial` pooled sprites.
    #[must_use]
    pub fn new(cache: AssetCache, initial: usize) -> Self {
        Self {
            cache,
            pool: ObjectPool::with_capacity(initial),
        }
    }

    /// Acquires a sprite and loads `path` into it.
    ///
    /// The handle is returned even if loading fails; the sprite then draws
    /// nothing.
    pub fn acquire_loaded(&mut self, path: &str) -> PoolHandle<Sprite> {
        let handle = self.pool.acquire();
        if let Some(sprite) = self.pool.get_mut(handle) {
            if sprite.load(path, &mut self.cache).is_err() {
                tracing::warn!("Sprite {} acquired without an image", path);
            }
        }
        handle
    }

    /// Acquires a sprite and restores it from a sprite record.
    ///
    /// # Errors
    ///
    /// Returns the record's decoding error; the sprite is released first.
    pub fn acquire_from(&mut self, input: &mut ByteReader<'_>) -> CoreResult<PoolHandle<Sprite>> {
        let handle = self.pool.acquire();
        let result = match self.pool.get_mut(handle) {
            Some(sprite) => sprite.deserialize(input, &mut self.cache),
            None => Ok(()),
        };
        match result {
            Ok(()) => Ok(handle),
            Err(err) => {
                self.pool.release(handle);
                Err(err)
            }
        }
    }

    /// Looks up a sprite.
    #[must_use]
    pub fn get(&self, handle: PoolHandle<Sprite>) -> Option<&Sprite> {
        self.pool.get(handle)
    }

    /// Unloads a sprite and returns it to the pool.
    pub fn release(&mut self, handle: PoolHandle<Sprite>) -> bool {
        if let Some(sprite) = self.pool.get_mut(handle) {
            sprite.unload();
        }
        self.pool.release(handle)
    }

    /// Underlying asset cache.
    #[must_use]
    pub const fn cache(&self) -> &AssetCache {
        &self.cache
    }

    /// Sprite pool, for diagnostics.
    #[must_use]
    pub const fn pool(&self) -> &ObjectPool<Sprite> {
        &self.pool
    }

    /// Shuts the cache down. Sprites keep their decoded images.
    pub fn shutdown(&mut self) {
        tracing::info!(
            "Sprite pool: {} total, {} available",
            self.pool.total_size(),
            self.pool.available_size()
        );
        self.cache.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stonefall_core::Arena;

    fn store_with_sheet() -> (tempfile::TempDir, SpriteStore) {
        let dir = tempfile::tempdir().unwrap();
        let pixels: Vec<u8> = (0..8 * 2).flat_map(|i| [i as u8, 0, 255]).collect();
        let bytes = tga::encode(8, 2, 24, &pixels).unwrap();
        std::fs::write(dir.path().join("sheet.tga"), bytes).unwrap();

        let cache = AssetCache::with_root(Arena::new(1024), dir.path());
        (dir, SpriteStore::new(cache, 2))
    }

    #[test]
    fn test_acquire_loaded_decodes() {
        let (_dir, mut store) = store_with_sheet();
        let handle = store.acquire_loaded("sheet.tga");

        let sprite = store.get(handle).unwrap();
        assert_eq!(sprite.path(), "sheet.tga");
        assert_eq!(sprite.image().unwrap().width(), 8);
        assert_eq!(store.cache().len(), 1);
    }

    #[test]
    fn test_missing_file_degrades() {
        let (_dir, mut store) = store_with_sheet();
        let handle = store.acquire_loaded("missing.tga");

        let sprite = store.get(handle).unwrap();
        assert_eq!(sprite.path(), "missing.tga");
        assert!(!sprite.is_loaded());
        assert!(sprite.frame_rect(0, 1).is_none());
    }

    #[test]
    fn test_two_sprites_share_cached_bytes() {
        let (_dir, mut store) = store_with_sheet();
        let a = store.acquire_loaded("sheet.tga");
        let b = store.acquire_loaded("sheet.tga");

        assert_ne!(a, b);
        assert_eq!(store.cache().len(), 1);
        assert_eq!(store.cache().arena().used(), 18 + 8 * 2 * 3);
    }

    #[test]
    fn test_frame_rect_columns() {
        let (_dir, mut store) = store_with_sheet();
        let handle = store.acquire_loaded("sheet.tga");
        let sprite = store.get(handle).unwrap();

        assert_eq!(
            sprite.frame_rect(3, 4),
            Some(FrameRect {
                x: 6,
                y: 0,
                width: 2,
                height: 2
            })
        );
        assert!(sprite.frame_rect(4, 4).is_none());
        assert!(sprite.frame_rect(0, 0).is_none());
    }

    #[test]
    fn test_record_is_path_only() {
        let (_dir, mut store) = store_with_sheet();
        let handle = store.acquire_loaded("sheet.tga");

        let mut out = ByteWriter::new();
        store.get(handle).unwrap().serialize(&mut out);
        let bytes = out.into_bytes();

        assert_eq!(bytes.len(), 8 + "sheet.tga".len());
        assert_eq!(&bytes[8..], b"sheet.tga");

        let restored = store.acquire_from(&mut ByteReader::new(&bytes)).unwrap();
        let sprite = store.get(restored).unwrap();
        assert_eq!(sprite.path(), "sheet.tga");
        assert!(sprite.is_loaded());
    }

    #[test]
    fn test_bad_record_releases_sprite() {
        let (_dir, mut store) = store_with_sheet();
        let mut out = ByteWriter::new();
        out.write_size(4);
        out.write_bytes(&[0xFF, 0xFE, 0xFD, 0xFC]);
        let bytes = out.into_bytes();

        let err = store.acquire_from(&mut ByteReader::new(&bytes)).unwrap_err();
        assert_eq!(err, CoreError::InvalidUtf8);
        assert_eq!(store.pool().in_use(), 0);
    }

    #[test]
    fn test_release_unloads() {
        let (_dir, mut store) = store_with_sheet();
        let handle = store.acquire_loaded("sheet.tga");

        assert!(store.release(handle));
        assert!(store.get(handle).is_none());
        assert!(!store.release(handle));
    }
}
