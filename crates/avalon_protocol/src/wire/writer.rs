//! # Write Cursor
//!
//! A byte sink with a movable write position. Packet compilers append
//! fields through it, then patch the 16-bit length header once the body
//! size is known (body length is data-dependent: item counts, text).
//!
//! Two flavors share one type: growable sinks reallocate as needed and
//! preserve everything already written; fixed-capacity sinks fail the
//! offending write instead. Writing behind the high-water mark overwrites
//! in place without moving it.

use std::io::SeekFrom;

use avalon_core::{Point2D, Point3D, Rect2D, Rect3D, Serial};

use crate::error::{WireError, WireResult};
use crate::LENGTH_OFFSET;

/// A growable or bounded byte sink with a movable write position.
#[derive(Clone, Debug, Default)]
pub struct PacketWriter {
    buffer: Vec<u8>,
    position: usize,
    capacity: Option<usize>,
}

impl PacketWriter {
    /// Creates a growable writer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            position: 0,
            capacity: None,
        }
    }

    /// Creates a growable writer with an initial allocation hint.
    #[must_use]
    pub fn with_estimate(estimate: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(estimate),
            position: 0,
            capacity: None,
        }
    }

    /// Creates a fixed-capacity writer. Writing past `capacity` is a fatal
    /// error, never a silent growth.
    #[must_use]
    pub fn fixed(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            position: 0,
            capacity: Some(capacity),
        }
    }

    /// Bytes written so far (the high-water mark, independent of the
    /// current position).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The current write position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The bytes written so far.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the writer, returning the finished buffer.
    #[inline]
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    fn put(&mut self, bytes: &[u8]) -> WireResult<()> {
        let end = self.position + bytes.len();

        if let Some(capacity) = self.capacity {
            if end > capacity {
                return Err(WireError::CapacityExceeded {
                    requested: end - self.position,
                    capacity,
                });
            }
        }

        if end > self.buffer.len() {
            self.buffer.resize(end, 0);
        }

        self.buffer[self.position..end].copy_from_slice(bytes);
        self.position = end;
        Ok(())
    }

    /// Writes a single byte.
    ///
    /// # Errors
    ///
    /// Fails on capacity overflow of a fixed sink; so do all writes below.
    #[inline]
    pub fn write_u8(&mut self, value: u8) -> WireResult<()> {
        self.put(&[value])
    }

    /// Writes a signed byte.
    #[inline]
    pub fn write_i8(&mut self, value: i8) -> WireResult<()> {
        self.put(&value.to_le_bytes())
    }

    /// Writes a bool as one byte (`0` or `1`).
    #[inline]
    pub fn write_bool(&mut self, value: bool) -> WireResult<()> {
        self.write_u8(u8::from(value))
    }

    /// Writes a `u16`, little-endian.
    #[inline]
    pub fn write_u16(&mut self, value: u16) -> WireResult<()> {
        self.put(&value.to_le_bytes())
    }

    /// Writes an `i16`, little-endian.
    #[inline]
    pub fn write_i16(&mut self, value: i16) -> WireResult<()> {
        self.put(&value.to_le_bytes())
    }

    /// Writes a `u32`, little-endian.
    #[inline]
    pub fn write_u32(&mut self, value: u32) -> WireResult<()> {
        self.put(&value.to_le_bytes())
    }

    /// Writes an `i32`, little-endian.
    #[inline]
    pub fn write_i32(&mut self, value: i32) -> WireResult<()> {
        self.put(&value.to_le_bytes())
    }

    /// Writes a `u64`, little-endian.
    #[inline]
    pub fn write_u64(&mut self, value: u64) -> WireResult<()> {
        self.put(&value.to_le_bytes())
    }

    /// Writes an `i64`, little-endian.
    #[inline]
    pub fn write_i64(&mut self, value: i64) -> WireResult<()> {
        self.put(&value.to_le_bytes())
    }

    /// Writes an `f32`, little-endian.
    #[inline]
    pub fn write_f32(&mut self, value: f32) -> WireResult<()> {
        self.put(&value.to_le_bytes())
    }

    /// Writes an `f64`, little-endian.
    #[inline]
    pub fn write_f64(&mut self, value: f64) -> WireResult<()> {
        self.put(&value.to_le_bytes())
    }

    /// Writes a serial as its raw 32-bit value.
    #[inline]
    pub fn write_serial(&mut self, serial: Serial) -> WireResult<()> {
        self.write_u32(serial.value())
    }

    /// Writes raw bytes as-is.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> WireResult<()> {
        self.put(bytes)
    }

    /// Writes a variable-length integer: 7-bit groups, least-significant
    /// first, high bit set on every group but the last.
    pub fn write_encoded_int(&mut self, value: u32) -> WireResult<()> {
        let mut remaining = value;
        loop {
            let group = (remaining & 0x7F) as u8;
            remaining >>= 7;
            if remaining == 0 {
                return self.write_u8(group);
            }
            self.write_u8(group | 0x80)?;
        }
    }

    /// Writes text into a fixed byte budget: truncated if longer,
    /// zero-padded if shorter. Non-ASCII characters degrade to `?`.
    pub fn write_ascii_fixed(&mut self, text: &str, budget: usize) -> WireResult<()> {
        let mut written = 0;
        for ch in text.chars() {
            if written == budget {
                break;
            }
            let byte = if ch.is_ascii() { ch as u8 } else { b'?' };
            self.write_u8(byte)?;
            written += 1;
        }
        while written < budget {
            self.write_u8(0)?;
            written += 1;
        }
        Ok(())
    }

    /// Writes optional variable-length UTF-8 text: a presence flag, then a
    /// variable-length byte count, then the bytes. `None` is distinct from
    /// an empty string.
    pub fn write_string(&mut self, text: Option<&str>) -> WireResult<()> {
        let Some(text) = text else {
            return self.write_bool(false);
        };
        self.write_bool(true)?;
        let bytes = text.as_bytes();
        self.write_encoded_int(bytes.len() as u32)?;
        self.put(bytes)
    }

    /// Writes a 2D point as two `i32`s.
    pub fn write_point2d(&mut self, point: Point2D) -> WireResult<()> {
        self.write_i32(point.x)?;
        self.write_i32(point.y)
    }

    /// Writes a 3D point as three `i32`s.
    pub fn write_point3d(&mut self, point: Point3D) -> WireResult<()> {
        self.write_i32(point.x)?;
        self.write_i32(point.y)?;
        self.write_i32(point.z)
    }

    /// Writes a 2D rectangle as its two corners.
    pub fn write_rect2d(&mut self, rect: Rect2D) -> WireResult<()> {
        self.write_point2d(rect.start)?;
        self.write_point2d(rect.end)
    }

    /// Writes a 3D box as its two corners.
    pub fn write_rect3d(&mut self, rect: Rect3D) -> WireResult<()> {
        self.write_point3d(rect.start)?;
        self.write_point3d(rect.end)
    }

    /// Moves the write position without altering contents.
    ///
    /// End-relative offsets must be `<= 0`; the resolved target must land
    /// within `[0, len]`.
    ///
    /// # Errors
    ///
    /// [`WireError::InvalidSeek`] when the target is out of bounds.
    pub fn seek(&mut self, target: SeekFrom) -> WireResult<usize> {
        self.position = resolve_seek(target, self.position, self.buffer.len())?;
        Ok(self.position)
    }

    /// Patches the 16-bit length header of a variable-length packet.
    ///
    /// Captures the current position as the finished packet length, writes
    /// it little-endian at byte offset 1, and restores the position. Call
    /// this exactly once, after the last body field.
    ///
    /// # Errors
    ///
    /// [`WireError::Precondition`] when the packet is too short to carry a
    /// header or too long for a 16-bit length field.
    pub fn patch_length(&mut self) -> WireResult<u16> {
        let length = self.position;
        if length < LENGTH_OFFSET + 2 {
            return Err(WireError::Precondition(
                "packet too short to carry a length field",
            ));
        }
        let Ok(length16) = u16::try_from(length) else {
            return Err(WireError::Precondition(
                "packet length exceeds the 16-bit length field",
            ));
        };

        self.seek(SeekFrom::Start(LENGTH_OFFSET as u64))?;
        self.write_u16(length16)?;
        self.seek(SeekFrom::Start(length as u64))?;
        Ok(length16)
    }
}

/// Shared seek-origin resolution for both cursors.
pub(crate) fn resolve_seek(target: SeekFrom, position: usize, length: usize) -> WireResult<usize> {
    let resolved = match target {
        SeekFrom::Start(offset) => i64::try_from(offset).unwrap_or(i64::MAX),
        SeekFrom::Current(offset) => position as i64 + offset,
        SeekFrom::End(offset) => {
            if offset > 0 {
                return Err(WireError::InvalidSeek { offset, length });
            }
            length as i64 + offset
        }
    };

    if resolved < 0 || resolved > length as i64 {
        return Err(WireError::InvalidSeek {
            offset: resolved,
            length,
        });
    }

    Ok(resolved as usize)
}
