//! # Connection Capabilities
//!
//! Each connection negotiates, at handshake time, which protocol eras and
//! features its client understands. The result is an immutable
//! [`CapabilitySet`] that every packet compiler receives as a parameter.
//! Compilers branch on *named* capability queries, never on raw client
//! version numbers, so each layout decision is testable in isolation.
//!
//! Eras are ordered and monotonic: a client of a later era carries every
//! capability bit of all earlier eras.

use std::fmt;
use std::ops::BitOr;

/// An immutable collection of capability bits for one connection.
///
/// Set once at handshake, read-only afterward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CapabilitySet {
    bits: u32,
}

impl CapabilitySet {
    /// No capabilities: the oldest client the server still speaks to.
    pub const NONE: Self = Self { bits: 0 };

    /// Status flag bit `0x04` means "flying" instead of "poisoned".
    pub const EXTENDED_FLAGS: Self = Self::from_bit(0);

    /// Movement packets carry a trailing notoriety byte.
    pub const MOVEMENT_NOTORIETY: Self = Self::from_bit(1);

    /// Item visual ids use the full 16-bit width (no legacy high-bit flag).
    pub const EXTENDED_ITEM_IDS: Self = Self::from_bit(2);

    /// Equipment-list entries always carry a hue field.
    pub const EXTENDED_EQUIPMENT: Self = Self::from_bit(3);

    /// The short animation packet replaces the legacy form.
    pub const NEW_ANIMATION: Self = Self::from_bit(4);

    /// Status packets include elemental resistances and luck.
    pub const EXPANDED_RESISTANCES: Self = Self::from_bit(5);

    /// Status packets include carry capacity and race.
    pub const EXPANDED_RACES: Self = Self::from_bit(6);

    /// Status packets include the fifteen extended numeric fields.
    pub const EXTENDED_STATUS: Self = Self::from_bit(7);

    const fn from_bit(bit: u32) -> Self {
        Self { bits: 1 << bit }
    }

    /// Creates a set from raw bits (as persisted or negotiated).
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Returns true if every bit of `other` is present in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }

    /// Returns the union of two sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Ordered threshold query: true if this connection carries every
    /// capability of the given era.
    #[inline]
    #[must_use]
    pub const fn supports(self, era: Era) -> bool {
        self.contains(era.capabilities())
    }
}

impl BitOr for CapabilitySet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010b}", self.bits)
    }
}

/// Protocol eras, oldest first.
///
/// An era names the newest expansion a client was built for. Eras are
/// strictly cumulative: [`Era::capabilities`] for a later era is a superset
/// of every earlier era's set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Era {
    /// The launch client.
    Classic = 0,
    /// The Reckoning expansion: notoriety on the move, resistances.
    Reckoning = 1,
    /// The Ascension expansion: playable races.
    Ascension = 2,
    /// The Tides expansion: flight, the short animation packet.
    Tides = 3,
    /// The Tempest expansion: wide item ids, full status fields.
    Tempest = 4,
}

impl Era {
    /// All eras, oldest first.
    pub const ALL: [Self; 5] = [
        Self::Classic,
        Self::Reckoning,
        Self::Ascension,
        Self::Tides,
        Self::Tempest,
    ];

    /// The cumulative capability set a client of this era negotiates.
    #[must_use]
    pub const fn capabilities(self) -> CapabilitySet {
        const RECKONING: CapabilitySet = CapabilitySet::MOVEMENT_NOTORIETY
            .union(CapabilitySet::EXPANDED_RESISTANCES);
        const ASCENSION: CapabilitySet = RECKONING.union(CapabilitySet::EXPANDED_RACES);
        const TIDES: CapabilitySet = ASCENSION
            .union(CapabilitySet::EXTENDED_FLAGS)
            .union(CapabilitySet::NEW_ANIMATION);
        const TEMPEST: CapabilitySet = TIDES
            .union(CapabilitySet::EXTENDED_ITEM_IDS)
            .union(CapabilitySet::EXTENDED_EQUIPMENT)
            .union(CapabilitySet::EXTENDED_STATUS);

        match self {
            Self::Classic => CapabilitySet::NONE,
            Self::Reckoning => RECKONING,
            Self::Ascension => ASCENSION,
            Self::Tides => TIDES,
            Self::Tempest => TEMPEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eras_are_monotonic() {
        // Every era must carry all capabilities of every earlier era.
        for pair in Era::ALL.windows(2) {
            let earlier = pair[0].capabilities();
            let later = pair[1].capabilities();
            assert!(
                later.contains(earlier),
                "{:?} lost capabilities of {:?}",
                pair[1],
                pair[0]
            );
        }
    }

    #[test]
    fn test_contains_and_union() {
        let set = CapabilitySet::EXTENDED_FLAGS | CapabilitySet::NEW_ANIMATION;

        assert!(set.contains(CapabilitySet::EXTENDED_FLAGS));
        assert!(set.contains(CapabilitySet::NONE));
        assert!(!set.contains(CapabilitySet::EXTENDED_ITEM_IDS));
        assert!(!CapabilitySet::NONE.contains(set));
    }

    #[test]
    fn test_supports_threshold() {
        let caps = Era::Tides.capabilities();

        assert!(caps.supports(Era::Classic));
        assert!(caps.supports(Era::Tides));
        assert!(!caps.supports(Era::Tempest));
    }

    #[test]
    fn test_bits_roundtrip() {
        let set = Era::Tempest.capabilities();
        assert_eq!(CapabilitySet::from_bits(set.bits()), set);
    }
}
