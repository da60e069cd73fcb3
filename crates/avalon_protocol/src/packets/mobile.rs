//! # Mobile Packets
//!
//! Fixed-size packets describing a single mobile: movement deltas, full
//! refreshes, names, animations, death. The only variable-length member of
//! this family is the name packet.

use avalon_core::{MobileState, Serial};

use crate::caps::CapabilitySet;
use crate::error::WireResult;
use crate::packets::opcodes;
use crate::wire::PacketWriter;

/// Longest form of the movement packet (with the notoriety byte).
const MOVING_MAX_SIZE: usize = 17;

/// Fixed size of the update packet.
const UPDATE_SIZE: usize = 19;

/// Fixed size of the name packet.
const NAME_SIZE: usize = 37;

/// Name budget inside the name packet (one guaranteed NUL follows).
const NAME_BUDGET: usize = 29;

/// Compiles a movement/appearance delta for `subject`.
///
/// Layout is fixed except for one capability branch: connections with
/// [`CapabilitySet::MOVEMENT_NOTORIETY`] receive a trailing notoriety byte.
/// The notoriety value itself is computed by the content layer.
///
/// # Errors
///
/// Propagates writer errors; none occur for well-formed state.
pub fn mobile_moving(
    subject: &MobileState,
    notoriety: u8,
    caps: CapabilitySet,
) -> WireResult<Vec<u8>> {
    let extended_flags = caps.contains(CapabilitySet::EXTENDED_FLAGS);

    let mut w = PacketWriter::fixed(MOVING_MAX_SIZE);
    w.write_u8(opcodes::MOBILE_MOVING)?;
    w.write_serial(subject.serial)?;
    w.write_u16(subject.body)?;
    w.write_u16(subject.position.x as u16)?;
    w.write_u16(subject.position.y as u16)?;
    w.write_i8(subject.position.z as i8)?;
    w.write_u8(subject.direction.as_byte())?;
    w.write_u16(subject.display_hue())?;
    w.write_u8(subject.packet_flags(extended_flags))?;

    if caps.contains(CapabilitySet::MOVEMENT_NOTORIETY) {
        w.write_u8(notoriety)?;
    }

    Ok(w.finish())
}

/// Compiles a full single-mobile refresh.
///
/// The two reserved fields are always zero; legacy clients reject the
/// packet without them.
///
/// # Errors
///
/// Propagates writer errors; none occur for well-formed state.
pub fn mobile_update(subject: &MobileState, caps: CapabilitySet) -> WireResult<Vec<u8>> {
    let extended_flags = caps.contains(CapabilitySet::EXTENDED_FLAGS);

    let mut w = PacketWriter::fixed(UPDATE_SIZE);
    w.write_u8(opcodes::MOBILE_UPDATE)?;
    w.write_serial(subject.serial)?;
    w.write_u16(subject.body)?;
    w.write_u8(0)?; // reserved
    w.write_u16(subject.display_hue())?;
    w.write_u8(subject.packet_flags(extended_flags))?;
    w.write_u16(subject.position.x as u16)?;
    w.write_u16(subject.position.y as u16)?;
    w.write_u16(0)?; // reserved
    w.write_u8(subject.direction.as_byte())?;
    w.write_i8(subject.position.z as i8)?;

    Ok(w.finish())
}

/// Compiles a mobile's display name.
///
/// The name is truncated to its 29-byte budget and always followed by a
/// NUL, so the client sees a terminated string even at full budget.
///
/// # Errors
///
/// Propagates writer errors; none occur for well-formed state.
pub fn mobile_name(subject: &MobileState) -> WireResult<Vec<u8>> {
    let mut w = PacketWriter::fixed(NAME_SIZE);
    w.write_u8(opcodes::MOBILE_NAME)?;
    w.write_u16(0)?; // length placeholder
    w.write_serial(subject.serial)?;
    w.write_ascii_fixed(&subject.name, NAME_BUDGET)?;
    w.write_u8(0)?;
    w.patch_length()?;

    Ok(w.finish())
}

/// An animation to play on a mobile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationRequest {
    /// Animation action index.
    pub action: u16,
    /// Number of frames to play.
    pub frame_count: u16,
    /// Times to repeat (legacy layout only).
    pub repeat_count: u16,
    /// Play forward; backward when false (legacy layout only).
    pub forward: bool,
    /// Loop until replaced (legacy layout only).
    pub repeat: bool,
    /// Frame delay.
    pub delay: u8,
}

/// Compiles an animation request.
///
/// Connections with [`CapabilitySet::NEW_ANIMATION`] get the short form;
/// everyone else gets the legacy form with repeat and direction control.
///
/// # Errors
///
/// Propagates writer errors; none occur for well-formed state.
pub fn mobile_animation(
    serial: Serial,
    request: &AnimationRequest,
    caps: CapabilitySet,
) -> WireResult<Vec<u8>> {
    if caps.contains(CapabilitySet::NEW_ANIMATION) {
        let mut w = PacketWriter::fixed(10);
        w.write_u8(opcodes::ANIMATION_SHORT)?;
        w.write_serial(serial)?;
        w.write_u16(request.action)?;
        w.write_u16(request.frame_count)?;
        w.write_u8(request.delay)?;
        return Ok(w.finish());
    }

    let mut w = PacketWriter::fixed(14);
    w.write_u8(opcodes::ANIMATION)?;
    w.write_serial(serial)?;
    w.write_u16(request.action)?;
    w.write_u16(request.frame_count)?;
    w.write_u16(request.repeat_count)?;
    w.write_bool(!request.forward)?;
    w.write_bool(request.repeat)?;
    w.write_u8(request.delay)?;

    Ok(w.finish())
}

/// Compiles a death animation: `killed` falls and `corpse` appears in its
/// place. The corpse serial may be zero when no corpse is left behind.
///
/// # Errors
///
/// Propagates writer errors; none occur for well-formed state.
pub fn death_animation(killed: Serial, corpse: Serial) -> WireResult<Vec<u8>> {
    let mut w = PacketWriter::fixed(13);
    w.write_u8(opcodes::DEATH_ANIMATION)?;
    w.write_serial(killed)?;
    w.write_serial(corpse)?;
    w.write_u32(0)?; // reserved

    Ok(w.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::Era;
    use avalon_core::{Direction, Point3D};

    fn subject() -> MobileState {
        let mut m = MobileState::new(Serial::new(0x1));
        m.body = 0x190;
        m.position = Point3D::new(1000, 100, -10);
        m.direction = Direction::South;
        m.hue = 0x0455;
        m.war_mode = true;
        m
    }

    #[test]
    fn test_moving_legacy_has_no_notoriety() {
        let m = subject();
        let data = mobile_moving(&m, 10, CapabilitySet::NONE).unwrap();

        let mut expected = PacketWriter::fixed(16);
        expected.write_u8(0x77).unwrap();
        expected.write_serial(m.serial).unwrap();
        expected.write_u16(0x190).unwrap();
        expected.write_u16(1000).unwrap();
        expected.write_u16(100).unwrap();
        expected.write_i8(-10).unwrap();
        expected.write_u8(Direction::South.as_byte()).unwrap();
        expected.write_u16(0x0455).unwrap();
        expected.write_u8(0x40).unwrap();

        assert_eq!(data, expected.finish());
        assert_eq!(data.len(), 16);
    }

    #[test]
    fn test_moving_appends_notoriety_byte() {
        let m = subject();
        let legacy = mobile_moving(&m, 10, CapabilitySet::NONE).unwrap();
        let data = mobile_moving(&m, 10, CapabilitySet::MOVEMENT_NOTORIETY).unwrap();

        assert_eq!(data.len(), 17);
        assert_eq!(&data[..16], &legacy[..]);
        assert_eq!(data[16], 10);
    }

    #[test]
    fn test_moving_hue_override() {
        let mut m = subject();
        m.solid_hue_override = 0x0021;
        let data = mobile_moving(&m, 0, CapabilitySet::NONE).unwrap();

        assert_eq!(&data[13..15], &0x0021u16.to_le_bytes());
    }

    #[test]
    fn test_update_layout() {
        let m = subject();
        let data = mobile_update(&m, Era::Tides.capabilities()).unwrap();

        assert_eq!(data.len(), 19);
        assert_eq!(data[0], 0x20);
        assert_eq!(&data[1..5], &0x1u32.to_le_bytes());
        assert_eq!(&data[5..7], &0x190u16.to_le_bytes());
        assert_eq!(data[7], 0); // reserved
        assert_eq!(&data[8..10], &0x0455u16.to_le_bytes());
        assert_eq!(data[10], 0x40);
        assert_eq!(&data[11..13], &1000u16.to_le_bytes());
        assert_eq!(&data[13..15], &100u16.to_le_bytes());
        assert_eq!(&data[15..17], &[0, 0]);
        assert_eq!(data[17], Direction::South.as_byte());
        assert_eq!(data[18] as i8, -10);
    }

    #[test]
    fn test_name_truncates_and_terminates() {
        let mut m = subject();
        m.name = "Some Really Long Mobile Name That Gets Cut off".to_string();
        let data = mobile_name(&m).unwrap();

        assert_eq!(data.len(), 37);
        assert_eq!(data[0], 0x98);
        assert_eq!(&data[1..3], &37u16.to_le_bytes());
        assert_eq!(&data[7..36], &m.name.as_bytes()[..29]);
        assert_eq!(data[36], 0);
    }

    #[test]
    fn test_animation_variant_selection() {
        let request = AnimationRequest {
            action: 200,
            frame_count: 5,
            repeat_count: 1,
            forward: true,
            repeat: false,
            delay: 5,
        };

        let legacy = mobile_animation(Serial::new(0x1), &request, CapabilitySet::NONE).unwrap();
        assert_eq!(legacy.len(), 14);
        assert_eq!(legacy[0], 0x6E);
        assert_eq!(&legacy[5..7], &200u16.to_le_bytes());
        assert_eq!(legacy[11], 0); // reverse flag: playing forward
        assert_eq!(legacy[12], 0); // repeat flag
        assert_eq!(legacy[13], 5);

        let short =
            mobile_animation(Serial::new(0x1), &request, CapabilitySet::NEW_ANIMATION).unwrap();
        assert_eq!(short.len(), 10);
        assert_eq!(short[0], 0xE2);
        assert_eq!(&short[5..7], &200u16.to_le_bytes());
        assert_eq!(short[9], 5);
    }

    #[test]
    fn test_death_animation_layout() {
        let data = death_animation(Serial::new(0x1), Serial::new(0x1000)).unwrap();

        assert_eq!(data.len(), 13);
        assert_eq!(data[0], 0xAF);
        assert_eq!(&data[1..5], &0x1u32.to_le_bytes());
        assert_eq!(&data[5..9], &0x1000u32.to_le_bytes());
        assert_eq!(&data[9..13], &[0, 0, 0, 0]);
    }
}
