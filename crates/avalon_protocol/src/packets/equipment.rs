//! # Equipment & Appearance Packets
//!
//! The full-appearance packet announces a mobile and everything it wears in
//! one variable-length unit. Item entries obey three skip rules (deleted,
//! layer already emitted, invisible to the viewer) and two capability
//! branches (id width, hue presence). Hair and facial hair are not real
//! items; they are appended as synthetic entries addressed by virtual
//! serials so later removal packets can target them.

use avalon_core::{layers, HairState, MobileState, Serial};

use crate::caps::CapabilitySet;
use crate::error::WireResult;
use crate::packets::opcodes;
use crate::wire::PacketWriter;

/// Header bytes before the first item entry.
const HEADER_SIZE: usize = 19;

/// Worst-case bytes per item entry.
const ENTRY_MAX_SIZE: usize = 9;

/// Legacy visual-id mask: ids are 15-bit wide.
const LEGACY_ID_MASK: u16 = 0x7FFF;

/// Legacy high bit set on every visual id.
const LEGACY_ID_FLAG: u16 = 0x8000;

struct EntryFormat {
    id_mask: u16,
    wide_ids: bool,
    always_hue: bool,
}

impl EntryFormat {
    fn for_caps(caps: CapabilitySet) -> Self {
        let wide_ids = caps.contains(CapabilitySet::EXTENDED_ITEM_IDS);
        Self {
            id_mask: if wide_ids { 0xFFFF } else { LEGACY_ID_MASK },
            wide_ids,
            always_hue: caps.contains(CapabilitySet::EXTENDED_EQUIPMENT),
        }
    }

    fn write_entry(
        &self,
        w: &mut PacketWriter,
        serial: Serial,
        item_id: u16,
        layer: u8,
        hue: u16,
    ) -> WireResult<()> {
        let mut item_id = item_id & self.id_mask;
        if !self.wide_ids {
            item_id |= LEGACY_ID_FLAG;
        }

        w.write_serial(serial)?;
        w.write_u16(item_id)?;
        w.write_u8(layer)?;
        if self.always_hue || hue != 0 {
            w.write_u16(hue)?;
        }
        Ok(())
    }
}

fn virtual_entry(
    format: &EntryFormat,
    w: &mut PacketWriter,
    emitted: &mut [bool; 256],
    subject: &MobileState,
    hair: HairState,
    layer: u8,
    serial: Serial,
) -> WireResult<()> {
    if hair.item_id == 0 || emitted[layer as usize] {
        return Ok(());
    }
    emitted[layer as usize] = true;

    let hue = subject.item_display_hue(hair.hue);
    format.write_entry(w, serial, hair.item_id, layer, hue)
}

/// Compiles the full appearance of `subject`: header, deduplicated
/// equipment entries, synthetic hair entries, and the zero-serial
/// terminator, with the length patched last.
///
/// Items are visited in their current order; the first visible item on a
/// layer wins and later occupants of that layer are silently skipped.
///
/// # Errors
///
/// Propagates writer errors; none occur for well-formed state.
pub fn equipment_list(
    subject: &MobileState,
    notoriety: u8,
    caps: CapabilitySet,
) -> WireResult<Vec<u8>> {
    let format = EntryFormat::for_caps(caps);
    let extended_flags = caps.contains(CapabilitySet::EXTENDED_FLAGS);

    // Worst case: every item plus both virtual layers, every entry with hue.
    let estimate = HEADER_SIZE + (subject.items.len() + 2) * ENTRY_MAX_SIZE + 4;
    let mut w = PacketWriter::with_estimate(estimate);

    w.write_u8(opcodes::EQUIPMENT_LIST)?;
    w.write_u16(0)?; // length placeholder
    w.write_serial(subject.serial)?;
    w.write_u16(subject.body)?;
    w.write_u16(subject.position.x as u16)?;
    w.write_u16(subject.position.y as u16)?;
    w.write_i8(subject.position.z as i8)?;
    w.write_u8(subject.direction.as_byte())?;
    w.write_u16(subject.display_hue())?;
    w.write_u8(subject.packet_flags(extended_flags))?;
    w.write_u8(notoriety)?;

    let mut emitted = [false; 256];

    for item in &subject.items {
        if item.deleted || emitted[item.layer as usize] || !item.visible {
            continue;
        }
        emitted[item.layer as usize] = true;

        let hue = subject.item_display_hue(item.hue);
        format.write_entry(&mut w, item.serial, item.item_id, item.layer, hue)?;
    }

    virtual_entry(
        &format,
        &mut w,
        &mut emitted,
        subject,
        subject.hair,
        layers::HAIR,
        Serial::virtual_hair(subject.serial),
    )?;
    virtual_entry(
        &format,
        &mut w,
        &mut emitted,
        subject,
        subject.facial_hair,
        layers::FACIAL_HAIR,
        Serial::virtual_facial_hair(subject.serial),
    )?;

    w.write_u32(0)?; // zero serial terminates the list
    w.patch_length()?;

    Ok(w.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::Era;
    use crate::wire::RecordReader;
    use avalon_core::{Direction, EquippedItem, Point3D};

    fn subject() -> MobileState {
        let mut m = MobileState::new(Serial::new(0x2));
        m.body = 0x190;
        m.position = Point3D::new(500, 600, 5);
        m.direction = Direction::East;
        m.hue = 0x0099;
        m
    }

    #[test]
    fn test_duplicate_layer_first_seen_wins() {
        let mut m = subject();
        m.items.push(EquippedItem::new(
            Serial::new(0x1000),
            0x13B9,
            layers::ONE_HANDED,
            0,
        ));
        m.items.push(EquippedItem::new(
            Serial::new(0x1001),
            0x13BA,
            layers::ONE_HANDED,
            0,
        ));

        let data = equipment_list(&m, 1, Era::Tempest.capabilities()).unwrap();

        let mut r = RecordReader::new(&data);
        r.seek(std::io::SeekFrom::Start(HEADER_SIZE as u64)).unwrap();
        assert_eq!(r.read_u32().unwrap(), 0x1000);
        r.read_u16().unwrap();
        r.read_u8().unwrap();
        r.read_u16().unwrap(); // hue always present in the extended format
        assert_eq!(r.read_u32().unwrap(), 0); // straight to the terminator
    }

    #[test]
    fn test_deleted_and_invisible_items_skipped() {
        let mut m = subject();
        let mut ghost = EquippedItem::new(Serial::new(0x1000), 0x13B9, layers::ONE_HANDED, 0);
        ghost.deleted = true;
        let mut cloaked = EquippedItem::new(Serial::new(0x1001), 0x1F03, layers::CLOAK, 0);
        cloaked.visible = false;
        m.items.push(ghost);
        m.items.push(cloaked);

        let data = equipment_list(&m, 1, Era::Tempest.capabilities()).unwrap();

        let mut r = RecordReader::new(&data);
        r.seek(std::io::SeekFrom::Start(HEADER_SIZE as u64)).unwrap();
        assert_eq!(r.read_u32().unwrap(), 0); // no entries at all
    }

    #[test]
    fn test_zero_hair_never_appears() {
        let m = subject(); // hair.item_id == 0
        let data = equipment_list(&m, 1, Era::Tempest.capabilities()).unwrap();

        let mut r = RecordReader::new(&data);
        r.seek(std::io::SeekFrom::Start(HEADER_SIZE as u64)).unwrap();
        assert_eq!(r.read_u32().unwrap(), 0);
        // Terminator is the last thing in the packet.
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_hair_uses_virtual_serial() {
        let mut m = subject();
        m.hair = HairState::new(0x203B, 0x0455);
        m.facial_hair = HairState::new(0x203E, 0x0466);

        let data = equipment_list(&m, 1, Era::Tempest.capabilities()).unwrap();

        let mut r = RecordReader::new(&data);
        r.seek(std::io::SeekFrom::Start(HEADER_SIZE as u64)).unwrap();

        assert_eq!(
            r.read_u32().unwrap(),
            Serial::virtual_hair(m.serial).value()
        );
        assert_eq!(r.read_u16().unwrap(), 0x203B);
        assert_eq!(r.read_u8().unwrap(), layers::HAIR);
        assert_eq!(r.read_u16().unwrap(), 0x0455);

        assert_eq!(
            r.read_u32().unwrap(),
            Serial::virtual_facial_hair(m.serial).value()
        );
    }

    #[test]
    fn test_real_item_on_hair_layer_suppresses_virtual_entry() {
        let mut m = subject();
        m.hair = HairState::new(0x203B, 0);
        m.items
            .push(EquippedItem::new(Serial::new(0x1000), 0x1F00, layers::HAIR, 0));

        let data = equipment_list(&m, 1, Era::Tempest.capabilities()).unwrap();

        let mut r = RecordReader::new(&data);
        r.seek(std::io::SeekFrom::Start(HEADER_SIZE as u64)).unwrap();
        assert_eq!(r.read_u32().unwrap(), 0x1000);
        r.read_u16().unwrap();
        r.read_u8().unwrap();
        r.read_u16().unwrap();
        assert_eq!(r.read_u32().unwrap(), 0);
    }

    #[test]
    fn test_legacy_entry_format() {
        let mut m = subject();
        m.items.push(EquippedItem::new(
            Serial::new(0x1000),
            0x93B9, // above the 15-bit range on purpose
            layers::ONE_HANDED,
            0,
        ));
        m.items
            .push(EquippedItem::new(Serial::new(0x1001), 0x13BA, layers::HELM, 0x21));

        let data = equipment_list(&m, 1, CapabilitySet::NONE).unwrap();

        let mut r = RecordReader::new(&data);
        r.seek(std::io::SeekFrom::Start(HEADER_SIZE as u64)).unwrap();

        // Masked to 15 bits, legacy flag set, zero hue omitted.
        assert_eq!(r.read_u32().unwrap(), 0x1000);
        assert_eq!(r.read_u16().unwrap(), (0x93B9 & LEGACY_ID_MASK) | LEGACY_ID_FLAG);
        assert_eq!(r.read_u8().unwrap(), layers::ONE_HANDED);

        // Nonzero hue is written even in the legacy format.
        assert_eq!(r.read_u32().unwrap(), 0x1001);
        assert_eq!(r.read_u16().unwrap(), 0x13BA | LEGACY_ID_FLAG);
        assert_eq!(r.read_u8().unwrap(), layers::HELM);
        assert_eq!(r.read_u16().unwrap(), 0x21);

        assert_eq!(r.read_u32().unwrap(), 0);
    }

    #[test]
    fn test_terminator_and_length_patch() {
        let mut m = subject();
        m.items.push(EquippedItem::new(
            Serial::new(0x1000),
            0x13B9,
            layers::ONE_HANDED,
            0x44,
        ));
        m.hair = HairState::new(0x203B, 0);

        let data = equipment_list(&m, 7, Era::Tempest.capabilities()).unwrap();

        // Length field frames the whole packet.
        let framed = u16::from_le_bytes([data[1], data[2]]) as usize;
        assert_eq!(framed, data.len());

        // Packet ends in the four-byte zero terminator.
        assert_eq!(&data[data.len() - 4..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_solid_hue_override_covers_items() {
        let mut m = subject();
        m.solid_hue_override = 0x00BB;
        m.items.push(EquippedItem::new(
            Serial::new(0x1000),
            0x13B9,
            layers::ONE_HANDED,
            0x44,
        ));

        let data = equipment_list(&m, 1, Era::Tempest.capabilities()).unwrap();

        let mut r = RecordReader::new(&data);
        r.seek(std::io::SeekFrom::Start(HEADER_SIZE as u64)).unwrap();
        r.read_u32().unwrap();
        r.read_u16().unwrap();
        r.read_u8().unwrap();
        assert_eq!(r.read_u16().unwrap(), 0x00BB);
    }
}
