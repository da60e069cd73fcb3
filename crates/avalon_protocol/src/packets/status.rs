//! # Status Packets
//!
//! The status report is the protocol's most layout-variable packet. Its
//! content is *tiered*: an ascending sequence of field blocks, each gated
//! by a capability threshold, each strictly appended after the previous —
//! never reordered. The tier byte tells the client how many blocks follow.
//!
//! Tier selection starts with the viewer: anyone but the subject itself
//! gets tier 0 (the bare header) with the health bar normalized into the
//! configured band, so exact values stay hidden. The subject's own client
//! gets its true values and as many blocks as its capabilities allow.

use avalon_core::{MobileState, Serial};

use crate::caps::CapabilitySet;
use crate::config::CodecConfig;
use crate::error::WireResult;
use crate::packets::opcodes;
use crate::wire::{AttributePair, PacketWriter};

/// Name budget inside status packets.
const NAME_BUDGET: usize = 30;

/// Size with every block present (tier 6).
const STATUS_MAX_SIZE: usize = 121;

fn write_bar(
    w: &mut PacketWriter,
    pair: AttributePair,
    fogged: bool,
    config: &CodecConfig,
) -> WireResult<()> {
    if fogged {
        pair.write_normalized(w, config)
    } else {
        pair.write_raw(w)
    }
}

/// The tier of status report a viewer receives.
///
/// Non-self viewers always get tier 0. For the subject itself the tier
/// grows with capability thresholds; thresholds are ordered, so testing
/// from the highest down yields the single applicable tier.
fn status_tier(self_view: bool, caps: CapabilitySet) -> u8 {
    if !self_view {
        0
    } else if caps.contains(CapabilitySet::EXTENDED_STATUS) {
        6
    } else if caps.contains(CapabilitySet::EXPANDED_RACES) {
        5
    } else if caps.contains(CapabilitySet::EXPANDED_RESISTANCES) {
        4
    } else {
        3
    }
}

/// Compiles the compact status variant: just identity, a fogged health
/// bar, and the rename permission. Sent for mobiles that never expose
/// full statistics (other players' pets, vendors).
///
/// # Errors
///
/// Propagates writer errors; none occur for well-formed state.
pub fn status_compact(subject: &MobileState, config: &CodecConfig) -> WireResult<Vec<u8>> {
    let mut w = PacketWriter::fixed(43);
    w.write_u8(opcodes::MOBILE_STATUS)?;
    w.write_u16(0)?; // length placeholder
    w.write_serial(subject.serial)?;
    w.write_ascii_fixed(&subject.name, NAME_BUDGET)?;
    write_bar(
        &mut w,
        AttributePair::new(subject.hits, subject.hits_max),
        true,
        config,
    )?;
    w.write_bool(subject.can_be_renamed)?;
    w.write_u8(0)?; // tier: header only
    w.patch_length()?;

    Ok(w.finish())
}

/// Compiles the full status report for `subject` as seen by `viewer`.
///
/// Self-views carry unclamped bar values and the capability-selected tier
/// blocks; any other viewer gets the tier-0 header with a fogged health
/// bar. Higher tiers only ever append fields.
///
/// # Errors
///
/// Propagates writer errors; none occur for well-formed state.
pub fn status(
    viewer: Serial,
    subject: &MobileState,
    caps: CapabilitySet,
    config: &CodecConfig,
) -> WireResult<Vec<u8>> {
    let self_view = viewer == subject.serial;
    let tier = status_tier(self_view, caps);

    let mut w = PacketWriter::fixed(STATUS_MAX_SIZE);
    w.write_u8(opcodes::MOBILE_STATUS)?;
    w.write_u16(0)?; // length placeholder
    w.write_serial(subject.serial)?;
    w.write_ascii_fixed(&subject.name, NAME_BUDGET)?;
    write_bar(
        &mut w,
        AttributePair::new(subject.hits, subject.hits_max),
        !self_view,
        config,
    )?;
    w.write_bool(subject.can_be_renamed)?;
    w.write_u8(tier)?;

    if tier >= 3 {
        w.write_bool(subject.female)?;
        w.write_u16(subject.strength)?;
        w.write_u16(subject.dexterity)?;
        w.write_u16(subject.intelligence)?;
        AttributePair::new(subject.stamina, subject.stamina_max).write_raw(&mut w)?;
        AttributePair::new(subject.mana, subject.mana_max).write_raw(&mut w)?;
        w.write_u32(subject.gold)?;
        w.write_u16(subject.physical_resist)?;
        w.write_u16(subject.weight)?;
        w.write_u16(subject.stat_cap)?;
        w.write_u8(subject.followers)?;
        w.write_u8(subject.followers_max)?;
        w.write_u16(subject.damage_min)?;
        w.write_u16(subject.damage_max)?;
        w.write_u32(subject.tithing_points)?;
    }

    if tier >= 4 {
        w.write_u16(subject.fire_resist)?;
        w.write_u16(subject.cold_resist)?;
        w.write_u16(subject.poison_resist)?;
        w.write_u16(subject.energy_resist)?;
        w.write_u16(subject.luck)?;
    }

    if tier >= 5 {
        w.write_u16(subject.weight_max)?;
        w.write_u8(subject.race.wrapping_add(1))?; // zero means unsupported
    }

    if tier >= 6 {
        for value in subject.extended_status {
            w.write_u16(value)?;
        }
    }

    w.patch_length()?;
    Ok(w.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::Era;
    use avalon_core::Serial;

    /// Offset of the tier byte inside the packet.
    const TIER_OFFSET: usize = 42;

    fn subject() -> MobileState {
        let mut m = MobileState::new(Serial::new(0x2));
        m.name = "Random Mobile 2".to_string();
        m.hits = 7;
        m.hits_max = 100;
        m.mana = 40;
        m.mana_max = 50;
        m.stamina = 60;
        m.stamina_max = 80;
        m.strength = 100;
        m.dexterity = 90;
        m.intelligence = 80;
        m.gold = 1234;
        m.physical_resist = 50;
        m.fire_resist = 40;
        m.cold_resist = 30;
        m.poison_resist = 20;
        m.energy_resist = 10;
        m.luck = 200;
        m.weight = 77;
        m.weight_max = 120;
        m.stat_cap = 225;
        m.followers = 1;
        m.followers_max = 5;
        m.damage_min = 10;
        m.damage_max = 25;
        m.tithing_points = 99;
        m.race = 1;
        m.extended_status = [3; 15];
        m
    }

    #[test]
    fn test_compact_layout() {
        let m = subject();
        let config = CodecConfig::default();
        let data = status_compact(&m, &config).unwrap();

        assert_eq!(data.len(), 43);
        assert_eq!(data[0], 0x11);
        assert_eq!(&data[1..3], &43u16.to_le_bytes());
        assert_eq!(&data[3..7], &0x2u32.to_le_bytes());
        // Fogged bar: 7/100 scales to 1/25, floored away from zero.
        assert_eq!(&data[37..41], &[1, 0, 25, 0]);
        assert_eq!(data[41], 0); // not renamable
        assert_eq!(data[42], 0); // tier
    }

    #[test]
    fn test_self_view_keeps_exact_bars() {
        let m = subject();
        let config = CodecConfig::default();
        let data = status(m.serial, &m, Era::Classic.capabilities(), &config).unwrap();

        assert_eq!(&data[37..41], &[7, 0, 100, 0]);
        assert_eq!(data[TIER_OFFSET], 3);
        assert_eq!(data.len(), 78);
    }

    #[test]
    fn test_other_view_is_fogged_header() {
        let m = subject();
        let config = CodecConfig::default();
        let viewer = Serial::new(0x1);
        let data = status(viewer, &m, Era::Tempest.capabilities(), &config).unwrap();

        // Capabilities cannot buy a non-self viewer more than the header.
        assert_eq!(data.len(), 43);
        assert_eq!(data[TIER_OFFSET], 0);
        // A mobile at 7/100 must never read as dead.
        assert_eq!(&data[37..41], &[1, 0, 25, 0]);
    }

    #[test]
    fn test_tier_growth_by_capability() {
        let m = subject();
        let config = CodecConfig::default();
        let lengths: Vec<(u8, usize)> = [
            Era::Classic,
            Era::Reckoning,
            Era::Ascension,
            Era::Tempest,
        ]
        .into_iter()
        .map(|era| {
            let data = status(m.serial, &m, era.capabilities(), &config).unwrap();
            (data[TIER_OFFSET], data.len())
        })
        .collect();

        assert_eq!(lengths, vec![(3, 78), (4, 88), (5, 91), (6, 121)]);
    }

    #[test]
    fn test_tiers_only_append() {
        let m = subject();
        let config = CodecConfig::default();
        let eras = [Era::Classic, Era::Reckoning, Era::Ascension, Era::Tempest];

        for pair in eras.windows(2) {
            let lower = status(m.serial, &m, pair[0].capabilities(), &config).unwrap();
            let higher = status(m.serial, &m, pair[1].capabilities(), &config).unwrap();

            assert!(higher.len() > lower.len());
            for (i, byte) in lower.iter().enumerate() {
                // The length field and the tier byte differ by design;
                // everything else of the lower tier reappears unchanged.
                if i == 1 || i == 2 || i == TIER_OFFSET {
                    continue;
                }
                assert_eq!(higher[i], *byte, "tier reordered field at offset {i}");
            }
        }
    }

    #[test]
    fn test_length_field_matches_emitted_count() {
        let m = subject();
        let config = CodecConfig::default();
        let data = status(m.serial, &m, Era::Tempest.capabilities(), &config).unwrap();

        let framed = u16::from_le_bytes([data[1], data[2]]) as usize;
        assert_eq!(framed, data.len());
    }

    #[test]
    fn test_race_written_plus_one() {
        let m = subject();
        let config = CodecConfig::default();
        let data = status(m.serial, &m, Era::Ascension.capabilities(), &config).unwrap();

        // Tier 5: weight capacity then race occupy the final three bytes.
        assert_eq!(&data[88..90], &120u16.to_le_bytes());
        assert_eq!(data[90], 2);
    }
}
