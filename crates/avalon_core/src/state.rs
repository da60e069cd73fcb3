//! # Subject State Views
//!
//! Plain-data snapshots of a mobile's network-relevant state. The packet
//! compilers read these and nothing else: no game rules, no world access.
//! Viewer-dependent decisions that belong to the content layer (item
//! visibility, notoriety) arrive pre-computed — visibility as a flag on each
//! item, notoriety as a parameter to the compiler.

use crate::geometry::{Direction, Point3D};
use crate::serial::Serial;

/// Equipment layer slot constants.
///
/// A layer names the body position an equipped item occupies. At most one
/// visible item per layer appears in any single equipment packet.
pub mod layers {
    /// One-handed weapon.
    pub const ONE_HANDED: u8 = 0x01;
    /// Two-handed weapon or shield.
    pub const TWO_HANDED: u8 = 0x02;
    /// Footwear.
    pub const SHOES: u8 = 0x03;
    /// Legs.
    pub const PANTS: u8 = 0x04;
    /// Torso underlayer.
    pub const SHIRT: u8 = 0x05;
    /// Head.
    pub const HELM: u8 = 0x06;
    /// Hands.
    pub const GLOVES: u8 = 0x07;
    /// Finger.
    pub const RING: u8 = 0x08;
    /// Talisman slot.
    pub const TALISMAN: u8 = 0x09;
    /// Neck.
    pub const NECK: u8 = 0x0A;
    /// Hair. Virtual: no real item backs this layer.
    pub const HAIR: u8 = 0x0B;
    /// Waist.
    pub const WAIST: u8 = 0x0C;
    /// Torso overlayer.
    pub const INNER_TORSO: u8 = 0x0D;
    /// Wrist.
    pub const BRACELET: u8 = 0x0E;
    /// Facial hair. Virtual: no real item backs this layer.
    pub const FACIAL_HAIR: u8 = 0x10;
    /// Cloak.
    pub const CLOAK: u8 = 0x14;
    /// Backpack.
    pub const BACKPACK: u8 = 0x15;
}

/// Status-flag bits carried in movement/update/appearance packets.
mod flags {
    pub const FEMALE: u8 = 0x02;
    pub const POISONED_OR_FLYING: u8 = 0x04;
    pub const BLESSED: u8 = 0x08;
    pub const WAR_MODE: u8 = 0x40;
    pub const HIDDEN: u8 = 0x80;
}

/// A visual layer with no backing item (hair, facial hair).
///
/// A zero `item_id` means the layer is empty and is never emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HairState {
    /// Visual id of the hair style, zero for none.
    pub item_id: u16,
    /// Dye hue.
    pub hue: u16,
}

impl HairState {
    /// Creates a hair layer state.
    #[inline]
    #[must_use]
    pub const fn new(item_id: u16, hue: u16) -> Self {
        Self { item_id, hue }
    }
}

/// One equipped item as the compiler sees it.
///
/// `visible` is the *viewer's* visibility verdict, computed by the content
/// layer before compilation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EquippedItem {
    /// The item's serial.
    pub serial: Serial,
    /// Visual id (client art index).
    pub item_id: u16,
    /// Equipment layer slot.
    pub layer: u8,
    /// Dye hue.
    pub hue: u16,
    /// Set once the item is removed from the world but not yet unlinked.
    pub deleted: bool,
    /// Whether the requesting viewer can see this item.
    pub visible: bool,
}

impl EquippedItem {
    /// Creates a visible, live equipped item.
    #[must_use]
    pub const fn new(serial: Serial, item_id: u16, layer: u8, hue: u16) -> Self {
        Self {
            serial,
            item_id,
            layer,
            hue,
            deleted: false,
            visible: true,
        }
    }
}

/// Network-relevant snapshot of a mobile.
///
/// This is a view, not the authoritative object: the world simulation owns
/// the mobile and produces one of these per compilation.
#[derive(Clone, Debug, PartialEq)]
pub struct MobileState {
    /// The mobile's serial.
    pub serial: Serial,
    /// Display name.
    pub name: String,
    /// Body (client art index).
    pub body: u16,
    /// World position.
    pub position: Point3D,
    /// Facing direction.
    pub direction: Direction,
    /// Skin hue.
    pub hue: u16,
    /// When non-negative, overrides every hue on the mobile and its
    /// equipment (used for polymorph-style effects).
    pub solid_hue_override: i32,
    /// Gender flag.
    pub female: bool,
    /// Currently poisoned.
    pub poisoned: bool,
    /// Currently flying (only meaningful to clients with extended flags).
    pub flying: bool,
    /// Blessed / invulnerable.
    pub blessed: bool,
    /// In war mode.
    pub war_mode: bool,
    /// Hidden from normal sight.
    pub hidden: bool,
    /// Whether the viewer may rename this mobile (pets).
    pub can_be_renamed: bool,
    /// Raw strength.
    pub strength: u16,
    /// Raw dexterity.
    pub dexterity: u16,
    /// Raw intelligence.
    pub intelligence: u16,
    /// Current hit points.
    pub hits: i32,
    /// Maximum hit points.
    pub hits_max: i32,
    /// Current mana.
    pub mana: i32,
    /// Maximum mana.
    pub mana_max: i32,
    /// Current stamina.
    pub stamina: i32,
    /// Maximum stamina.
    pub stamina_max: i32,
    /// Gold carried.
    pub gold: u32,
    /// Physical resistance.
    pub physical_resist: u16,
    /// Fire resistance.
    pub fire_resist: u16,
    /// Cold resistance.
    pub cold_resist: u16,
    /// Poison resistance.
    pub poison_resist: u16,
    /// Energy resistance.
    pub energy_resist: u16,
    /// Luck.
    pub luck: u16,
    /// Stones carried.
    pub weight: u16,
    /// Carry capacity.
    pub weight_max: u16,
    /// Total stat cap.
    pub stat_cap: u16,
    /// Current follower slots used.
    pub followers: u8,
    /// Maximum follower slots.
    pub followers_max: u8,
    /// Weapon damage, low end.
    pub damage_min: u16,
    /// Weapon damage, high end.
    pub damage_max: u16,
    /// Tithing points.
    pub tithing_points: u32,
    /// Race index (written to the wire as index + 1; 0 = unsupported).
    pub race: u8,
    /// The fifteen extended status values of the highest status tier.
    pub extended_status: [u16; 15],
    /// Hair layer.
    pub hair: HairState,
    /// Facial-hair layer.
    pub facial_hair: HairState,
    /// Equipped items in their current order.
    pub items: Vec<EquippedItem>,
}

impl MobileState {
    /// Creates a mobile snapshot with neutral defaults.
    #[must_use]
    pub fn new(serial: Serial) -> Self {
        Self {
            serial,
            name: String::new(),
            body: 0x190,
            position: Point3D::default(),
            direction: Direction::default(),
            hue: 0,
            solid_hue_override: -1,
            female: false,
            poisoned: false,
            flying: false,
            blessed: false,
            war_mode: false,
            hidden: false,
            can_be_renamed: false,
            strength: 0,
            dexterity: 0,
            intelligence: 0,
            hits: 0,
            hits_max: 0,
            mana: 0,
            mana_max: 0,
            stamina: 0,
            stamina_max: 0,
            gold: 0,
            physical_resist: 0,
            fire_resist: 0,
            cold_resist: 0,
            poison_resist: 0,
            energy_resist: 0,
            luck: 0,
            weight: 0,
            weight_max: 0,
            stat_cap: 0,
            followers: 0,
            followers_max: 0,
            damage_min: 0,
            damage_max: 0,
            tithing_points: 0,
            race: 0,
            extended_status: [0; 15],
            hair: HairState::default(),
            facial_hair: HairState::default(),
            items: Vec::new(),
        }
    }

    /// The hue to put on the wire: the solid override when set, the base
    /// hue otherwise.
    #[inline]
    #[must_use]
    pub fn display_hue(&self) -> u16 {
        if self.solid_hue_override >= 0 {
            // Override values are always small; the cast cannot lose data
            // for any hue the client understands.
            (self.solid_hue_override as u32 & 0xFFFF) as u16
        } else {
            self.hue
        }
    }

    /// The hue an equipped item shows under this mobile's override rule.
    #[inline]
    #[must_use]
    pub fn item_display_hue(&self, item_hue: u16) -> u16 {
        if self.solid_hue_override >= 0 {
            (self.solid_hue_override as u32 & 0xFFFF) as u16
        } else {
            item_hue
        }
    }

    /// The status-flag byte.
    ///
    /// Bit `0x04` is overloaded: legacy clients read it as "poisoned",
    /// clients with the extended-flags capability read it as "flying".
    #[must_use]
    pub fn packet_flags(&self, extended_flags: bool) -> u8 {
        let mut value = 0;

        if self.female {
            value |= flags::FEMALE;
        }

        if extended_flags {
            if self.flying {
                value |= flags::POISONED_OR_FLYING;
            }
        } else if self.poisoned {
            value |= flags::POISONED_OR_FLYING;
        }

        if self.blessed {
            value |= flags::BLESSED;
        }
        if self.war_mode {
            value |= flags::WAR_MODE;
        }
        if self.hidden {
            value |= flags::HIDDEN;
        }

        value
    }
}
