//! # Resource-Bar Packets
//!
//! Thin wrappers around the attribute-pair encodings: one packet per bar,
//! plus the combined form and the overlay-state packet that recolors a bar
//! on the client (poisoned green, invulnerable gold).
//!
//! Every bar packet exists in two variants selected by the caller, not by
//! capabilities: the *plain* variant carries exact values (sent to the
//! subject itself and its party), the *normalized* variant carries
//! band-scaled values (sent to everyone else).

use avalon_core::{MobileState, Serial};

use crate::config::CodecConfig;
use crate::error::WireResult;
use crate::packets::opcodes;
use crate::wire::{AttributePair, PacketWriter};

/// Fixed size of a single-bar packet.
const BAR_SIZE: usize = 9;

/// Fixed size of the combined three-bar packet.
const VITALS_SIZE: usize = 17;

/// Fixed size of the overlay-state packet.
const HEALTHBAR_STATE_SIZE: usize = 12;

fn bar_packet(
    opcode: u8,
    serial: Serial,
    pair: AttributePair,
    normalized: bool,
    config: &CodecConfig,
) -> WireResult<Vec<u8>> {
    let mut w = PacketWriter::fixed(BAR_SIZE);
    w.write_u8(opcode)?;
    w.write_serial(serial)?;
    if normalized {
        pair.write_normalized(&mut w, config)?;
    } else {
        pair.write_raw(&mut w)?;
    }
    Ok(w.finish())
}

/// Compiles a health-bar packet.
///
/// # Errors
///
/// Propagates writer errors; none occur for well-formed state.
pub fn health_bar(
    subject: &MobileState,
    normalized: bool,
    config: &CodecConfig,
) -> WireResult<Vec<u8>> {
    bar_packet(
        opcodes::HEALTH_BAR,
        subject.serial,
        AttributePair::new(subject.hits, subject.hits_max),
        normalized,
        config,
    )
}

/// Compiles a mana-bar packet.
///
/// # Errors
///
/// Propagates writer errors; none occur for well-formed state.
pub fn mana_bar(
    subject: &MobileState,
    normalized: bool,
    config: &CodecConfig,
) -> WireResult<Vec<u8>> {
    bar_packet(
        opcodes::MANA_BAR,
        subject.serial,
        AttributePair::new(subject.mana, subject.mana_max),
        normalized,
        config,
    )
}

/// Compiles a stamina-bar packet.
///
/// # Errors
///
/// Propagates writer errors; none occur for well-formed state.
pub fn stamina_bar(
    subject: &MobileState,
    normalized: bool,
    config: &CodecConfig,
) -> WireResult<Vec<u8>> {
    bar_packet(
        opcodes::STAMINA_BAR,
        subject.serial,
        AttributePair::new(subject.stamina, subject.stamina_max),
        normalized,
        config,
    )
}

/// Compiles the combined three-bar packet: health, mana, stamina, in that
/// order.
///
/// # Errors
///
/// Propagates writer errors; none occur for well-formed state.
pub fn vitals(
    subject: &MobileState,
    normalized: bool,
    config: &CodecConfig,
) -> WireResult<Vec<u8>> {
    let mut w = PacketWriter::fixed(VITALS_SIZE);
    w.write_u8(opcodes::VITALS)?;
    w.write_serial(subject.serial)?;

    let bars = [
        AttributePair::new(subject.hits, subject.hits_max),
        AttributePair::new(subject.mana, subject.mana_max),
        AttributePair::new(subject.stamina, subject.stamina_max),
    ];
    for pair in bars {
        if normalized {
            pair.write_normalized(&mut w, config)?;
        } else {
            pair.write_raw(&mut w)?;
        }
    }

    Ok(w.finish())
}

/// Overlay state a client can apply to a health bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum HealthbarKind {
    /// Green overlay: the mobile is poisoned. Level conveys severity,
    /// zero clears the overlay.
    Poison = 1,
    /// Gold overlay: the mobile is blessed/invulnerable. Level is a flag.
    Golden = 2,
}

/// Compiles a health-bar overlay update.
///
/// # Errors
///
/// Propagates writer errors; none occur for well-formed state.
pub fn healthbar_state(serial: Serial, kind: HealthbarKind, level: u8) -> WireResult<Vec<u8>> {
    let mut w = PacketWriter::fixed(HEALTHBAR_STATE_SIZE);
    w.write_u8(opcodes::HEALTHBAR_STATE)?;
    w.write_u16(0)?; // length placeholder
    w.write_serial(serial)?;
    w.write_u16(1)?; // one overlay per packet
    w.write_u16(kind as u16)?;
    w.write_u8(level)?;
    w.patch_length()?;

    Ok(w.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> MobileState {
        let mut m = MobileState::new(Serial::new(0x1));
        m.hits = 7;
        m.hits_max = 100;
        m.mana = 40;
        m.mana_max = 50;
        m.stamina = 60;
        m.stamina_max = 80;
        m
    }

    #[test]
    fn test_plain_health_bar_is_nine_exact_bytes() {
        // The canonical wire example: (7, 100) raw after opcode + serial.
        let m = subject();
        let config = CodecConfig::default();
        let data = health_bar(&m, false, &config).unwrap();

        assert_eq!(
            data,
            vec![0xA1, 0x01, 0x00, 0x00, 0x00, 0x07, 0x00, 0x64, 0x00]
        );
    }

    #[test]
    fn test_normalized_health_bar() {
        let m = subject();
        let config = CodecConfig::default();
        let data = health_bar(&m, true, &config).unwrap();

        assert_eq!(data.len(), 9);
        // 7/100 scales to 1/25, floored away from zero.
        assert_eq!(&data[5..9], &[1, 0, 25, 0]);
    }

    #[test]
    fn test_mana_and_stamina_opcodes() {
        let m = subject();
        let config = CodecConfig::default();

        assert_eq!(mana_bar(&m, false, &config).unwrap()[0], 0xA2);
        assert_eq!(stamina_bar(&m, false, &config).unwrap()[0], 0xA3);
    }

    #[test]
    fn test_vitals_order_and_size() {
        let m = subject();
        let config = CodecConfig::default();
        let data = vitals(&m, false, &config).unwrap();

        assert_eq!(data.len(), 17);
        assert_eq!(data[0], 0x2D);
        assert_eq!(&data[5..9], &[7, 0, 100, 0]); // health
        assert_eq!(&data[9..13], &[40, 0, 50, 0]); // mana
        assert_eq!(&data[13..17], &[60, 0, 80, 0]); // stamina
    }

    #[test]
    fn test_healthbar_state_layout() {
        let data = healthbar_state(Serial::new(0x1), HealthbarKind::Poison, 3).unwrap();

        assert_eq!(data.len(), 12);
        assert_eq!(data[0], 0x17);
        assert_eq!(&data[1..3], &12u16.to_le_bytes());
        assert_eq!(&data[3..7], &0x1u32.to_le_bytes());
        assert_eq!(&data[7..9], &1u16.to_le_bytes());
        assert_eq!(&data[9..11], &1u16.to_le_bytes());
        assert_eq!(data[11], 3);
    }

    #[test]
    fn test_healthbar_golden_kind() {
        let data = healthbar_state(Serial::new(0x1), HealthbarKind::Golden, 1).unwrap();
        assert_eq!(&data[9..11], &2u16.to_le_bytes());
    }
}
