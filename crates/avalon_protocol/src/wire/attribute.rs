//! # Attribute Bars
//!
//! A resource bar (health, mana, stamina) is a `(current, maximum)` pair
//! with two wire encodings:
//!
//! - **raw**: current then maximum, two little-endian `u16`s, exact values
//! - **normalized**: maximum mapped into a fixed band, current scaled
//!   proportionally — what other players see, so exact values stay hidden
//!
//! Both decode through the same two-`u16` read; the client cannot tell them
//! apart and does not need to. The normalized form never reports a nonzero
//! current as zero: a mobile at 1/1000 health is nearly dead, not dead.

use crate::config::CodecConfig;
use crate::error::WireResult;
use crate::wire::{PacketWriter, RecordReader};

/// A `(current, maximum)` resource-bar pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttributePair {
    /// Current value.
    pub current: i32,
    /// Maximum value.
    pub maximum: i32,
}

impl AttributePair {
    /// Creates a pair.
    #[inline]
    #[must_use]
    pub const fn new(current: i32, maximum: i32) -> Self {
        Self { current, maximum }
    }

    /// Writes the raw encoding: current then maximum, clamped to the
    /// representable `u16` range.
    ///
    /// # Errors
    ///
    /// Propagates writer capacity errors.
    pub fn write_raw(self, writer: &mut PacketWriter) -> WireResult<()> {
        writer.write_u16(clamp_u16(self.current))?;
        writer.write_u16(clamp_u16(self.maximum))
    }

    /// Writes the normalized encoding: maximum becomes the configured band,
    /// current becomes its proportional share, floored at 1 while the true
    /// current is nonzero.
    ///
    /// Falls back to the raw encoding when normalization is disabled or the
    /// maximum is not positive. The written pair always satisfies
    /// `0 <= current <= maximum`.
    ///
    /// # Errors
    ///
    /// Propagates writer capacity errors.
    pub fn write_normalized(self, writer: &mut PacketWriter, config: &CodecConfig) -> WireResult<()> {
        if !config.normalize_bars || self.maximum <= 0 {
            return self.write_raw(writer);
        }

        let band = i64::from(config.bar_band);
        let current = i64::from(self.current.clamp(0, self.maximum));
        let mut scaled = current * band / i64::from(self.maximum);

        if current > 0 && scaled == 0 {
            scaled = 1;
        }

        writer.write_u16(scaled as u16)?;
        writer.write_u16(config.bar_band)
    }

    /// Reads a pair; the inverse of both encodings.
    ///
    /// # Errors
    ///
    /// Propagates reader bounds errors.
    pub fn read(reader: &mut RecordReader<'_>) -> WireResult<Self> {
        let current = i32::from(reader.read_u16()?);
        let maximum = i32::from(reader.read_u16()?);
        Ok(Self { current, maximum })
    }
}

fn clamp_u16(value: i32) -> u16 {
    value.clamp(0, i32::from(u16::MAX)) as u16
}
