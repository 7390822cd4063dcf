//! # Persistence Protocol
//!
//! The contract persistable entities implement, plus the helpers containers
//! use to write and read pooled children.
//!
//! ## Container Layout
//!
//! ```text
//! [own fields...]
//! [size-word: child count]
//! [child record 0][child record 1]...   // index 0 is always rebuilt first
//! ```

mod codec;

pub use codec::{ByteReader, ByteWriter};

use crate::error::{CoreError, CoreResult};
use crate::memory::{ObjectPool, PoolHandle};

/// Entities that write and read themselves as flat byte records.
///
/// `Ctx` is whatever the entity needs to re-acquire its resources on load
/// (for example the sprite store for an entity that owns sprites).
///
/// # Contract
///
/// - `serialize` does not mutate the entity.
/// - `deserialize` reads the fields in the same order `serialize` wrote them
///   and overwrites every persisted field. Resource handles are re-acquired
///   through `ctx`, never read from the stream.
pub trait Serializable<Ctx: ?Sized> {
    /// Appends this entity's record.
    fn serialize(&self, out: &mut ByteWriter);

    /// Overwrites this entity from the next record in `input`.
    ///
    /// # Errors
    ///
    /// Returns a [`CoreError`] if the record is truncated or holds a value
    /// outside its field's domain.
    fn deserialize(&mut self, input: &mut ByteReader<'_>, ctx: &mut Ctx) -> CoreResult<()>;
}

/// Writes a count followed by each pooled child's record, in sequence order.
///
/// # Errors
///
/// Returns [`CoreError::StaleHandle`] if a handle no longer refers to a
/// checked-out object. Nothing is written in that case.
pub fn write_sequence<T, Ctx>(
    out: &mut ByteWriter,
    pool: &ObjectPool<T>,
    handles: &[PoolHandle<T>],
) -> CoreResult<()>
where
    T: Serializable<Ctx>,
    Ctx: ?Sized,
{
    let children = handles
        .iter()
        .map(|&handle| pool.get(handle).ok_or_else(|| stale(handle)))
        .collect::<CoreResult<Vec<_>>>()?;

    out.write_size(children.len());
    for child in children {
        child.serialize(out);
    }
    Ok(())
}

/// Reads a count and then that many child records into freshly acquired
/// pooled objects, preserving order.
///
/// If any record fails, every object acquired by this call is released
/// before the error is returned.
///
/// # Errors
///
/// Returns the first decoding error encountered.
pub fn read_sequence<T, Ctx>(
    input: &mut ByteReader<'_>,
    pool: &mut ObjectPool<T>,
    ctx: &mut Ctx,
) -> CoreResult<Vec<PoolHandle<T>>>
where
    T: Default + Serializable<Ctx>,
    Ctx: ?Sized,
{
    let count = input.read_size()?;
    // Every record is at least one byte wide.
    if count > input.remaining() {
        return Err(CoreError::UnexpectedEof {
            needed: count,
            remaining: input.remaining(),
        });
    }

    let mut handles = Vec::with_capacity(count);
    for _ in 0..count {
        let handle = pool.acquire();
        handles.push(handle);

        let result = match pool.get_mut(handle) {
            Some(child) => child.deserialize(input, ctx),
            None => Err(stale(handle)),
        };
        if let Err(err) = result {
            for handle in handles {
                pool.release(handle);
            }
            return Err(err);
        }
    }
    Ok(handles)
}

fn stale<T>(handle: PoolHandle<T>) -> CoreError {
    CoreError::StaleHandle {
        index: handle.index(),
        generation: handle.generation(),
    }
}
