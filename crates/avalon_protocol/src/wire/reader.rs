//! # Read Cursor
//!
//! A bounds-checked forward cursor over a fixed byte buffer: one persisted
//! record or one packet body per reader. Every typed read consumes exactly
//! its primitive's width or fails without consuming anything; there is no
//! silent truncation.
//!
//! Object-typed fields are resolved through an injected
//! [`EntityLookup`], never a global. A serial of zero is "no object" and
//! skips the lookup entirely; a nonzero serial that resolves to nothing
//! *also* decodes to "no object" — partially-loaded and stale snapshots
//! reference objects that no longer exist, and the format defines that as
//! absence, not failure.

use std::io::SeekFrom;

use avalon_core::{EntityLookup, Point2D, Point3D, Rect2D, Rect3D, Serial};

use crate::error::{WireError, WireResult, MAX_ENCODED_INT_BYTES};

use super::writer::resolve_seek;

/// A bounds-checked forward cursor over a fixed byte buffer.
#[derive(Clone, Debug)]
pub struct RecordReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> RecordReader<'a> {
    /// Creates a reader over a buffer, positioned at its start.
    #[inline]
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Total buffer length.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if the buffer is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The current read position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Bytes left to read.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    fn take(&mut self, width: usize) -> WireResult<&'a [u8]> {
        if width > self.remaining() {
            return Err(WireError::OutOfRange {
                position: self.position,
                requested: width,
                length: self.buffer.len(),
            });
        }
        let bytes = &self.buffer[self.position..self.position + width];
        self.position += width;
        Ok(bytes)
    }

    /// Reads a single byte.
    ///
    /// # Errors
    ///
    /// [`WireError::OutOfRange`] past the end of the buffer; so do all
    /// reads below.
    #[inline]
    pub fn read_u8(&mut self) -> WireResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Reads a signed byte.
    #[inline]
    pub fn read_i8(&mut self) -> WireResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Reads a bool (any nonzero byte is true).
    #[inline]
    pub fn read_bool(&mut self) -> WireResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a `u16`, little-endian.
    #[inline]
    pub fn read_u16(&mut self) -> WireResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    /// Reads an `i16`, little-endian.
    #[inline]
    pub fn read_i16(&mut self) -> WireResult<i16> {
        Ok(self.read_u16()? as i16)
    }

    /// Reads a `u32`, little-endian.
    #[inline]
    pub fn read_u32(&mut self) -> WireResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads an `i32`, little-endian.
    #[inline]
    pub fn read_i32(&mut self) -> WireResult<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Reads a `u64`, little-endian.
    #[inline]
    pub fn read_u64(&mut self) -> WireResult<u64> {
        let b = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(b);
        Ok(u64::from_le_bytes(raw))
    }

    /// Reads an `i64`, little-endian.
    #[inline]
    pub fn read_i64(&mut self) -> WireResult<i64> {
        Ok(self.read_u64()? as i64)
    }

    /// Reads an `f32`, little-endian.
    #[inline]
    pub fn read_f32(&mut self) -> WireResult<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Reads an `f64`, little-endian.
    #[inline]
    pub fn read_f64(&mut self) -> WireResult<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Reads a serial.
    #[inline]
    pub fn read_serial(&mut self) -> WireResult<Serial> {
        Ok(Serial::new(self.read_u32()?))
    }

    /// Reads exactly `width` raw bytes.
    #[inline]
    pub fn read_bytes(&mut self, width: usize) -> WireResult<&'a [u8]> {
        self.take(width)
    }

    /// Reads a variable-length integer (see
    /// [`PacketWriter::write_encoded_int`](super::PacketWriter::write_encoded_int)).
    ///
    /// # Errors
    ///
    /// [`WireError::MalformedVarInt`] when the continuation bit is still
    /// set after [`MAX_ENCODED_INT_BYTES`] groups; [`WireError::OutOfRange`]
    /// when the stream ends mid-group.
    pub fn read_encoded_int(&mut self) -> WireResult<u32> {
        let mut value = 0u32;
        let mut shift = 0;

        for _ in 0..MAX_ENCODED_INT_BYTES {
            let byte = self.read_u8()?;
            value |= u32::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }

        Err(WireError::MalformedVarInt)
    }

    /// Reads fixed-budget text: consumes exactly `budget` bytes, the text
    /// ends at the first zero byte or the budget, whichever comes first.
    pub fn read_ascii_fixed(&mut self, budget: usize) -> WireResult<String> {
        let bytes = self.take(budget)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(budget);
        Ok(bytes[..end].iter().map(|&b| char::from(b)).collect())
    }

    /// Reads optional variable-length UTF-8 text. An absent value (flag
    /// false) is distinct from an explicit empty string (count zero).
    /// Invalid UTF-8 sequences decode to the replacement character.
    pub fn read_string(&mut self) -> WireResult<Option<String>> {
        if !self.read_bool()? {
            return Ok(None);
        }

        let length = self.read_encoded_int()? as usize;
        if length == 0 {
            return Ok(Some(String::new()));
        }

        let bytes = self.take(length)?;
        Ok(Some(String::from_utf8_lossy(bytes).into_owned()))
    }

    /// Reads a 2D point.
    pub fn read_point2d(&mut self) -> WireResult<Point2D> {
        Ok(Point2D::new(self.read_i32()?, self.read_i32()?))
    }

    /// Reads a 3D point.
    pub fn read_point3d(&mut self) -> WireResult<Point3D> {
        Ok(Point3D::new(
            self.read_i32()?,
            self.read_i32()?,
            self.read_i32()?,
        ))
    }

    /// Reads a 2D rectangle.
    pub fn read_rect2d(&mut self) -> WireResult<Rect2D> {
        Ok(Rect2D::new(self.read_point2d()?, self.read_point2d()?))
    }

    /// Reads a 3D box.
    pub fn read_rect3d(&mut self) -> WireResult<Rect3D> {
        Ok(Rect3D::new(self.read_point3d()?, self.read_point3d()?))
    }

    /// Reads an entity reference: a 32-bit serial resolved through the
    /// registry. Zero short-circuits to `None` without a lookup; a dangling
    /// serial resolves to `None` and decoding continues.
    pub fn read_entity<R: EntityLookup>(&mut self, registry: &R) -> WireResult<Option<R::Entity>> {
        let serial = self.read_serial()?;
        if serial.is_zero() {
            return Ok(None);
        }

        let entity = registry.find_entity(serial);
        if entity.is_none() {
            tracing::trace!(serial = serial.value(), "dangling entity reference");
        }
        Ok(entity)
    }

    /// Reads a counted list of entity references, skipping any that no
    /// longer resolve (no placeholders are inserted).
    ///
    /// # Errors
    ///
    /// [`WireError::Precondition`] on a negative count.
    pub fn read_entity_list<R: EntityLookup>(
        &mut self,
        registry: &R,
    ) -> WireResult<Vec<R::Entity>> {
        let count = self.read_i32()?;
        if count < 0 {
            return Err(WireError::Precondition("entity list count is negative"));
        }

        // Bound the preallocation by what the buffer can actually hold.
        let count = count as usize;
        let mut list = Vec::with_capacity(count.min(self.remaining() / 4));

        for _ in 0..count {
            if let Some(entity) = self.read_entity(registry)? {
                list.push(entity);
            }
        }
        Ok(list)
    }

    /// Moves the read position; same origin semantics and bounds
    /// discipline as the write cursor.
    ///
    /// # Errors
    ///
    /// [`WireError::InvalidSeek`] when the target is out of bounds.
    pub fn seek(&mut self, target: SeekFrom) -> WireResult<usize> {
        self.position = resolve_seek(target, self.position, self.buffer.len())?;
        Ok(self.position)
    }
}
