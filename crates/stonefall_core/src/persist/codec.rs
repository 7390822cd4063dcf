//! # Byte Codec
//!
//! Fixed-width little-endian writer and reader used by every save record.
//!
//! ## Layout Rules
//!
//! ```text
//! i32 / u32 / f32   4 bytes, little-endian (f32 as IEEE-754 bits)
//! size-word         8 bytes, little-endian u64
//! bool              1 byte, 0 = false, anything else = true
//! Pod               raw bytes of the value, no padding
//! ```

use bytemuck::{bytes_of, Pod};

use crate::error::{CoreError, CoreResult};

/// Byte writer - appends fields to a growable buffer.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buffer: Vec<u8>,
}

impl ByteWriter {
    /// Creates an empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Returns the number of bytes written.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if no bytes have been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns a slice of the written data.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the writer, returning the written data.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    /// Writes a bool as one byte.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.buffer.push(u8::from(value));
    }

    /// Writes an i32 in little-endian format.
    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a u32 in little-endian format.
    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes an f32 in little-endian format.
    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a u64 in little-endian format.
    #[inline]
    pub fn write_u64(&mut self, value: u64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a size-word (element count or byte length).
    #[inline]
    pub fn write_size(&mut self, value: usize) {
        self.write_u64(value as u64);
    }

    /// Writes raw bytes with no length prefix.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Writes a Pod type directly.
    #[inline]
    pub fn write_pod<T: Pod>(&mut self, value: &T) {
        self.buffer.extend_from_slice(bytes_of(value));
    }
}

/// Byte reader - pulls fields out of a borrowed buffer in order.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new reader from a buffer.
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Returns the number of bytes consumed so far.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes remaining.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Reads exactly `len` raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnexpectedEof`] if fewer bytes remain.
    pub fn read_bytes(&mut self, len: usize) -> CoreResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(CoreError::UnexpectedEof {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.buffer[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> CoreResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Reads a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnexpectedEof`] at end of data.
    #[inline]
    pub fn read_u8(&mut self) -> CoreResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Reads a one-byte bool.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnexpectedEof`] at end of data.
    #[inline]
    pub fn read_bool(&mut self) -> CoreResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a little-endian i32.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnexpectedEof`] if fewer than 4 bytes remain.
    #[inline]
    pub fn read_i32(&mut self) -> CoreResult<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Reads a little-endian u32.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnexpectedEof`] if fewer than 4 bytes remain.
    #[inline]
    pub fn read_u32(&mut self) -> CoreResult<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Reads a little-endian f32.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnexpectedEof`] if fewer than 4 bytes remain.
    #[inline]
    pub fn read_f32(&mut self) -> CoreResult<f32> {
        self.read_array().map(f32::from_le_bytes)
    }

    /// Reads a little-endian u64.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnexpectedEof`] if fewer than 8 bytes remain.
    #[inline]
    pub fn read_u64(&mut self) -> CoreResult<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    /// Reads a size-word.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnexpectedEof`] at end of data or
    /// [`CoreError::SizeOverflow`] if the value does not fit in `usize`.
    pub fn read_size(&mut self) -> CoreResult<usize> {
        let raw = self.read_u64()?;
        usize::try_from(raw).map_err(|_| CoreError::SizeOverflow(raw))
    }

    /// Reads a Pod type directly.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnexpectedEof`] if the value does not fit.
    pub fn read_pod<T: Pod>(&mut self) -> CoreResult<T> {
        let bytes = self.read_bytes(std::mem::size_of::<T>())?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_widths() {
        let mut out = ByteWriter::new();
        out.write_i32(-1);
        assert_eq!(out.len(), 4);
        out.write_f32(1.5);
        assert_eq!(out.len(), 8);
        out.write_bool(true);
        assert_eq!(out.len(), 9);
        out.write_size(3);
        assert_eq!(out.len(), 17);
    }

    #[test]
    fn test_little_endian_layout() {
        let mut out = ByteWriter::new();
        out.write_i32(1);
        out.write_size(2);
        assert_eq!(out.as_slice(), &[1, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_read_back_in_order() {
        let mut out = ByteWriter::new();
        out.write_i32(-7);
        out.write_f32(f32::MIN_POSITIVE);
        out.write_bool(false);
        out.write_pod(&[9u8, 8, 7, 6]);
        out.write_size(12);
        let bytes = out.into_bytes();

        let mut input = ByteReader::new(&bytes);
        assert_eq!(input.read_i32().unwrap(), -7);
        assert_eq!(
            input.read_f32().unwrap().to_bits(),
            f32::MIN_POSITIVE.to_bits()
        );
        assert!(!input.read_bool().unwrap());
        assert_eq!(input.read_pod::<[u8; 4]>().unwrap(), [9, 8, 7, 6]);
        assert_eq!(input.read_size().unwrap(), 12);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_nonzero_bool_reads_true() {
        let mut input = ByteReader::new(&[0x02]);
        assert!(input.read_bool().unwrap());
    }

    #[test]
    fn test_truncated_read_fails_without_consuming() {
        let mut input = ByteReader::new(&[1, 2, 3]);
        let err = input.read_i32().unwrap_err();
        assert_eq!(
            err,
            CoreError::UnexpectedEof {
                needed: 4,
                remaining: 3
            }
        );
        assert_eq!(input.position(), 0);
        assert_eq!(input.read_u8().unwrap(), 1);
    }
}
