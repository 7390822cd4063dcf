//! # Arena Allocator
//!
//! A bump allocator over a fixed-size buffer. Ranges are handed out in order
//! and are reclaimed all at once by [`Arena::reset`].

use std::fmt;

use crate::error::{CoreError, CoreResult};

/// A byte range issued by an [`Arena`].
///
/// The block remembers the arena epoch it was issued in; once the arena is
/// reset the block no longer resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArenaBlock {
    offset: usize,
    len: usize,
    epoch: u32,
}

impl ArenaBlock {
    /// Byte offset of the block inside the arena buffer.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the block in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true for a zero-length block.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A bump-pointer arena allocator.
///
/// Allocations never resize the buffer and are never freed one by one.
///
/// # Thread Safety
///
/// This arena is NOT thread-safe. It has a single logical owner.
///
/// # Example
///
/// ```rust
/// use stonefall_core::Arena;
///
/// let mut arena = Arena::new(16);
/// let block = arena.alloc_copy(b"hello").unwrap();
/// assert_eq!(arena.get(block), Some(&b"hello"[..]));
///
/// arena.reset();
/// assert_eq!(arena.get(block), None);
/// ```
pub struct Arena {
    /// The backing storage.
    storage: Box<[u8]>,
    /// Current allocation offset (`used`).
    offset: usize,
    /// Bumped on every reset.
    epoch: u32,
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity())
            .field("used", &self.offset)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl Arena {
    /// Creates a new arena with the specified capacity in bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: vec![0u8; capacity].into_boxed_slice(),
            offset: 0,
            epoch: 0,
        }
    }

    /// Returns the total capacity in bytes.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns the current used space in bytes.
    #[inline]
    #[must_use]
    pub const fn used(&self) -> usize {
        self.offset
    }

    /// Returns the remaining free space in bytes.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.offset
    }

    /// Returns the number of resets performed so far.
    #[inline]
    #[must_use]
    pub const fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Reserves `size` bytes.
    ///
    /// Succeeds iff `used + size <= capacity`. A failed request leaves the
    /// arena untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ArenaExhausted`] if the request does not fit.
    pub fn allocate(&mut self, size: usize) -> CoreResult<ArenaBlock> {
        let end = self
            .offset
            .checked_add(size)
            .filter(|end| *end <= self.capacity())
            .ok_or(CoreError::ArenaExhausted {
                requested: size,
                remaining: self.remaining(),
            })?;

        let block = ArenaBlock {
            offset: self.offset,
            len: size,
            epoch: self.epoch,
        };
        self.offset = end;
        Ok(block)
    }

    /// Reserves a block and copies `bytes` into it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ArenaExhausted`] if the bytes do not fit.
    pub fn alloc_copy(&mut self, bytes: &[u8]) -> CoreResult<ArenaBlock> {
        let block = self.allocate(bytes.len())?;
        self.storage[block.offset..block.offset + block.len].copy_from_slice(bytes);
        Ok(block)
    }

    /// Resolves a block into its bytes, or `None` if it predates a reset.
    #[must_use]
    pub fn get(&self, block: ArenaBlock) -> Option<&[u8]> {
        if block.epoch != self.epoch {
            return None;
        }
        self.storage.get(block.offset..block.offset + block.len)
    }

    /// Mutable variant of [`Arena::get`].
    pub fn get_mut(&mut self, block: ArenaBlock) -> Option<&mut [u8]> {
        if block.epoch != self.epoch {
            return None;
        }
        self.storage.get_mut(block.offset..block.offset + block.len)
    }

    /// Resets the arena, invalidating every block issued so far.
    ///
    /// No memory is freed or reallocated.
    #[inline]
    pub fn reset(&mut self) {
        self.offset = 0;
        self.epoch = self.epoch.wrapping_add(1);
    }
}
