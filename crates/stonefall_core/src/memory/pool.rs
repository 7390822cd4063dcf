//! # Object Pool
//!
//! Generational recycler for entity types that are frequently checked out
//! and returned.

use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Handle to an object checked out of an [`ObjectPool`].
///
/// Holds the slot index plus the slot generation at checkout time. Once the
/// object is released the slot generation moves on and the handle goes stale.
pub struct PoolHandle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PoolHandle<T> {
    const fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation,
            _marker: PhantomData,
        }
    }

    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Returns the generation this handle was issued with.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl<T> Clone for PoolHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PoolHandle<T> {}

impl<T> PartialEq for PoolHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for PoolHandle<T> {}

impl<T> Hash for PoolHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for PoolHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoolHandle({}v{})", self.index, self.generation)
    }
}

struct Slot<T> {
    value: T,
    generation: u32,
    checked_out: bool,
}

/// A growable pool of reusable objects.
///
/// `acquire` hands out a recycled instance when one is free and otherwise
/// constructs a new one; `release` puts it back. Objects are never dropped
/// before the pool itself, and released objects keep their old field values
/// until the next owner overwrites them.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. It has a single logical owner.
///
/// # Example
///
/// ```rust
/// use stonefall_core::ObjectPool;
///
/// let mut pool: ObjectPool<String> = ObjectPool::with_capacity(1);
/// let a = pool.acquire();
/// pool.get_mut(a).unwrap().push_str("stale");
/// assert!(pool.release(a));
///
/// let b = pool.acquire();
/// assert_eq!(a.index(), b.index()); // same slot reused
/// assert!(pool.get(a).is_none()); // old handle went stale
/// assert_eq!(pool.get(b).unwrap(), "stale"); // fields are not reset
/// ```
pub struct ObjectPool<T> {
    /// Every object ever constructed, in construction order.
    slots: Vec<Slot<T>>,
    /// Free slot indices, reused first-in first-out.
    free: VecDeque<u32>,
}

impl<T: Default> ObjectPool<T> {
    /// Creates a pool pre-seeded with `initial` default-constructed objects.
    #[must_use]
    pub fn with_capacity(initial: usize) -> Self {
        let mut pool = Self {
            slots: Vec::with_capacity(initial),
            free: VecDeque::with_capacity(initial),
        };
        for _ in 0..initial {
            let index = pool.push_slot();
            pool.free.push_back(index);
        }
        pool
    }

    /// Checks an object out of the pool.
    ///
    /// A recycled object still carries the field values of its previous use;
    /// the caller must reinitialize everything it relies on. When the free
    /// set is empty the pool grows by one object.
    pub fn acquire(&mut self) -> PoolHandle<T> {
        let index = match self.free.pop_front() {
            Some(index) => index,
            None => {
                let index = self.push_slot();
                tracing::debug!(
                    "{} pool grew to {} objects",
                    std::any::type_name::<T>(),
                    self.slots.len()
                );
                index
            }
        };

        let slot = &mut self.slots[index as usize];
        slot.checked_out = true;
        PoolHandle::new(index, slot.generation)
    }

    fn push_slot(&mut self) -> u32 {
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            value: T::default(),
            generation: 0,
            checked_out: false,
        });
        index
    }
}

impl<T> ObjectPool<T> {
    /// Returns an object to the free set.
    ///
    /// Field values are left as they are. Releasing a stale handle is a
    /// no-op and returns `false`.
    pub fn release(&mut self, handle: PoolHandle<T>) -> bool {
        let Some(slot) = self.live_slot_mut(handle) else {
            return false;
        };
        slot.checked_out = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push_back(handle.index);
        true
    }

    /// Returns true if `handle` refers to a currently checked-out object.
    #[inline]
    #[must_use]
    pub fn is_live(&self, handle: PoolHandle<T>) -> bool {
        self.get(handle).is_some()
    }

    /// Gets a reference to a checked-out object.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: PoolHandle<T>) -> Option<&T> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.checked_out && slot.generation == handle.generation)
            .map(|slot| &slot.value)
    }

    /// Gets a mutable reference to a checked-out object.
    #[inline]
    pub fn get_mut(&mut self, handle: PoolHandle<T>) -> Option<&mut T> {
        self.live_slot_mut(handle).map(|slot| &mut slot.value)
    }

    fn live_slot_mut(&mut self, handle: PoolHandle<T>) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.checked_out && slot.generation == handle.generation)
    }

    /// Number of objects the pool has ever constructed.
    #[inline]
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.slots.len()
    }

    /// Number of objects waiting in the free set.
    #[inline]
    #[must_use]
    pub fn available_size(&self) -> usize {
        self.free.len()
    }

    /// Number of objects currently checked out.
    #[inline]
    #[must_use]
    pub fn in_use(&self) -> usize {
        self.total_size() - self.available_size()
    }

    /// Iterates over all checked-out objects.
    pub fn iter(&self) -> impl Iterator<Item = (PoolHandle<T>, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.checked_out
                .then(|| (PoolHandle::new(index as u32, slot.generation), &slot.value))
        })
    }
}

impl<T> fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPool")
            .field("total", &self.total_size())
            .field("available", &self.available_size())
            .finish()
    }
}
