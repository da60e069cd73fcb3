//! # Serial Identifiers
//!
//! Every live or persisted object in the world is named by a 32-bit serial.
//! Zero is reserved: it means "no object" and terminates entity lists on the
//! wire. The remaining space is split into two disjoint ranges so a client
//! can tell the object category apart from the identifier alone:
//!
//! - `0x0000_0001..=0x3FFF_FFFF` - mobiles (players, creatures, vendors)
//! - `0x4000_0000..=0x7FFF_FFFF` - items (including containers and corpses)
//!
//! Some visual layers (hair, facial hair) are not backed by a real item and
//! have no serial of their own. They are addressed on the wire through a
//! *virtual* serial derived deterministically from the owning mobile's
//! serial, so that removal and replacement packets can target them across
//! sessions.

use std::fmt;

/// A 32-bit object identifier.
///
/// `Serial::ZERO` is "no object". All comparisons and hashing operate on the
/// raw value, so serials are usable as map keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Serial(u32);

impl Serial {
    /// The reserved "no object" serial.
    pub const ZERO: Self = Self(0);

    /// First valid mobile serial.
    pub const FIRST_MOBILE: Self = Self(0x0000_0001);

    /// Last valid mobile serial.
    pub const LAST_MOBILE: Self = Self(0x3FFF_FFFF);

    /// First valid item serial.
    pub const FIRST_ITEM: Self = Self(0x4000_0000);

    /// Last valid item serial.
    pub const LAST_ITEM: Self = Self(0x7FFF_FFFF);

    /// Base of the virtual-serial block, just below the top of the item
    /// range. Virtual serials grow downward from here, four slots per owner.
    const VIRTUAL_BASE: u32 = 0x7FFF_FFFF - 0x400;

    /// Creates a serial from its raw wire value.
    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw 32-bit value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns true if this is the reserved "no object" serial.
    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this serial falls in the mobile range.
    #[inline]
    #[must_use]
    pub const fn is_mobile(self) -> bool {
        self.0 >= Self::FIRST_MOBILE.0 && self.0 <= Self::LAST_MOBILE.0
    }

    /// Returns true if this serial falls in the item range.
    #[inline]
    #[must_use]
    pub const fn is_item(self) -> bool {
        self.0 >= Self::FIRST_ITEM.0 && self.0 <= Self::LAST_ITEM.0
    }

    /// Virtual serial addressing a mobile's hair layer.
    ///
    /// Deterministic: the same owner always yields the same serial, and
    /// distinct owners never collide (owners are spaced four slots apart).
    #[inline]
    #[must_use]
    pub const fn virtual_hair(owner: Self) -> Self {
        Self(Self::VIRTUAL_BASE.wrapping_sub(owner.0.wrapping_mul(4)))
    }

    /// Virtual serial addressing a mobile's facial-hair layer.
    ///
    /// Occupies the slot adjacent to [`Serial::virtual_hair`] for the same
    /// owner, so the two never collide with each other or across owners.
    #[inline]
    #[must_use]
    pub const fn virtual_facial_hair(owner: Self) -> Self {
        Self(
            Self::VIRTUAL_BASE
                .wrapping_sub(owner.0.wrapping_mul(4))
                .wrapping_sub(1),
        )
    }
}

impl From<u32> for Serial {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Serial> for u32 {
    fn from(serial: Serial) -> Self {
        serial.0
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_are_disjoint() {
        assert!(Serial::ZERO.is_zero());
        assert!(!Serial::ZERO.is_mobile());
        assert!(!Serial::ZERO.is_item());

        assert!(Serial::new(0x1).is_mobile());
        assert!(Serial::new(0x3FFF_FFFF).is_mobile());
        assert!(!Serial::new(0x4000_0000).is_mobile());

        assert!(Serial::new(0x4000_0000).is_item());
        assert!(Serial::new(0x7FFF_FFFF).is_item());
        assert!(!Serial::new(0x8000_0000).is_item());
    }

    #[test]
    fn test_virtual_serials_are_deterministic() {
        let owner = Serial::new(0x1234);
        assert_eq!(Serial::virtual_hair(owner), Serial::virtual_hair(owner));
        assert_eq!(
            Serial::virtual_facial_hair(owner),
            Serial::virtual_facial_hair(owner)
        );
    }

    #[test]
    fn test_virtual_serials_never_collide() {
        let a = Serial::new(0x100);
        let b = Serial::new(0x101);

        assert_ne!(Serial::virtual_hair(a), Serial::virtual_facial_hair(a));
        assert_ne!(Serial::virtual_hair(a), Serial::virtual_hair(b));
        assert_ne!(Serial::virtual_facial_hair(a), Serial::virtual_hair(b));
    }

    #[test]
    fn test_virtual_serials_land_in_item_range() {
        let owner = Serial::new(0x2F0);
        assert!(Serial::virtual_hair(owner).is_item());
        assert!(Serial::virtual_facial_hair(owner).is_item());
    }

    #[test]
    fn test_display_format() {
        assert_eq!(Serial::new(0xBEEF).to_string(), "0x0000BEEF");
    }
}
