//! # Packet Compilers
//!
//! One pure function per packet kind: `(subject state, capability set)` in,
//! finished bytes out. All conditional-layout complexity of the protocol
//! lives here — each compiler gathers its capability branches in one place
//! instead of scattering flag checks, so every layout variant is a unit
//! test away.
//!
//! Compilers never retry and never coerce: malformed subject state is a
//! programming error upstream and fails fast.

mod equipment;
mod mobile;
mod status;
mod vitals;

pub use equipment::equipment_list;
pub use mobile::{
    death_animation, mobile_animation, mobile_moving, mobile_name, mobile_update, AnimationRequest,
};
pub use status::{status, status_compact};
pub use vitals::{
    health_bar, healthbar_state, mana_bar, stamina_bar, vitals, HealthbarKind,
};

/// Wire opcodes, one per packet kind.
pub mod opcodes {
    /// Movement/appearance delta for a mobile in view.
    pub const MOBILE_MOVING: u8 = 0x77;
    /// Full refresh of a single mobile.
    pub const MOBILE_UPDATE: u8 = 0x20;
    /// A mobile's display name.
    pub const MOBILE_NAME: u8 = 0x98;
    /// Compact or tiered status report.
    pub const MOBILE_STATUS: u8 = 0x11;
    /// A mobile and its full equipment list.
    pub const EQUIPMENT_LIST: u8 = 0x78;
    /// Health bar.
    pub const HEALTH_BAR: u8 = 0xA1;
    /// Mana bar.
    pub const MANA_BAR: u8 = 0xA2;
    /// Stamina bar.
    pub const STAMINA_BAR: u8 = 0xA3;
    /// All three resource bars at once.
    pub const VITALS: u8 = 0x2D;
    /// Legacy animation request.
    pub const ANIMATION: u8 = 0x6E;
    /// Short animation request (new-animation capability).
    pub const ANIMATION_SHORT: u8 = 0xE2;
    /// Health-bar overlay state (poison, golden).
    pub const HEALTHBAR_STATE: u8 = 0x17;
    /// Death animation: a mobile falls, a corpse appears.
    pub const DEATH_ANIMATION: u8 = 0xAF;
}
