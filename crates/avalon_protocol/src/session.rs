//! # Session Façade
//!
//! One [`Session`] per connection: the negotiated capability set, the codec
//! configuration, and the producer half of that connection's outbound
//! pipe. The `send_*` helpers compile and enqueue in one call, which is how
//! the rest of the server talks to the codec.
//!
//! A session adds no hidden codec state — every helper is the matching
//! pure compiler from [`crate::packets`] followed by a pipe commit, and the
//! compilers stay directly callable for tests and captures.

use avalon_core::{MobileState, Serial};

use crate::caps::CapabilitySet;
use crate::config::CodecConfig;
use crate::error::SendError;
use crate::packets;
use crate::packets::{AnimationRequest, HealthbarKind};
use crate::pipe::PacketSender;

/// A connection's view of the codec.
pub struct Session {
    caps: CapabilitySet,
    config: CodecConfig,
    sender: PacketSender,
}

impl Session {
    /// Creates a session from handshake results.
    #[must_use]
    pub fn new(caps: CapabilitySet, config: CodecConfig, sender: PacketSender) -> Self {
        tracing::debug!(caps = %caps, "session opened");
        Self {
            caps,
            config,
            sender,
        }
    }

    /// The negotiated capability set. Immutable for the session's life.
    #[inline]
    #[must_use]
    pub const fn capabilities(&self) -> CapabilitySet {
        self.caps
    }

    /// The codec configuration in effect.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn dispatch(&self, packet: Vec<u8>) -> Result<(), SendError> {
        self.sender.send(packet)?;
        Ok(())
    }

    /// Compiles and sends a movement delta.
    ///
    /// # Errors
    ///
    /// Compilation failures and pipe disconnection.
    pub fn send_mobile_moving(
        &self,
        subject: &MobileState,
        notoriety: u8,
    ) -> Result<(), SendError> {
        self.dispatch(packets::mobile_moving(subject, notoriety, self.caps)?)
    }

    /// Compiles and sends a full mobile refresh.
    ///
    /// # Errors
    ///
    /// Compilation failures and pipe disconnection.
    pub fn send_mobile_update(&self, subject: &MobileState) -> Result<(), SendError> {
        self.dispatch(packets::mobile_update(subject, self.caps)?)
    }

    /// Compiles and sends a mobile's name.
    ///
    /// # Errors
    ///
    /// Compilation failures and pipe disconnection.
    pub fn send_mobile_name(&self, subject: &MobileState) -> Result<(), SendError> {
        self.dispatch(packets::mobile_name(subject)?)
    }

    /// Compiles and sends the status report `viewer` is entitled to.
    ///
    /// # Errors
    ///
    /// Compilation failures and pipe disconnection.
    pub fn send_status(&self, viewer: Serial, subject: &MobileState) -> Result<(), SendError> {
        self.dispatch(packets::status(viewer, subject, self.caps, &self.config)?)
    }

    /// Compiles and sends the compact status variant.
    ///
    /// # Errors
    ///
    /// Compilation failures and pipe disconnection.
    pub fn send_status_compact(&self, subject: &MobileState) -> Result<(), SendError> {
        self.dispatch(packets::status_compact(subject, &self.config)?)
    }

    /// Compiles and sends a full appearance with equipment.
    ///
    /// # Errors
    ///
    /// Compilation failures and pipe disconnection.
    pub fn send_equipment_list(
        &self,
        subject: &MobileState,
        notoriety: u8,
    ) -> Result<(), SendError> {
        self.dispatch(packets::equipment_list(subject, notoriety, self.caps)?)
    }

    /// Compiles and sends a health bar; `normalized` fogs the values.
    ///
    /// # Errors
    ///
    /// Compilation failures and pipe disconnection.
    pub fn send_health_bar(
        &self,
        subject: &MobileState,
        normalized: bool,
    ) -> Result<(), SendError> {
        self.dispatch(packets::health_bar(subject, normalized, &self.config)?)
    }

    /// Compiles and sends a mana bar.
    ///
    /// # Errors
    ///
    /// Compilation failures and pipe disconnection.
    pub fn send_mana_bar(&self, subject: &MobileState, normalized: bool) -> Result<(), SendError> {
        self.dispatch(packets::mana_bar(subject, normalized, &self.config)?)
    }

    /// Compiles and sends a stamina bar.
    ///
    /// # Errors
    ///
    /// Compilation failures and pipe disconnection.
    pub fn send_stamina_bar(
        &self,
        subject: &MobileState,
        normalized: bool,
    ) -> Result<(), SendError> {
        self.dispatch(packets::stamina_bar(subject, normalized, &self.config)?)
    }

    /// Compiles and sends all three resource bars.
    ///
    /// # Errors
    ///
    /// Compilation failures and pipe disconnection.
    pub fn send_vitals(&self, subject: &MobileState, normalized: bool) -> Result<(), SendError> {
        self.dispatch(packets::vitals(subject, normalized, &self.config)?)
    }

    /// Compiles and sends an animation in the capability-selected form.
    ///
    /// # Errors
    ///
    /// Compilation failures and pipe disconnection.
    pub fn send_animation(
        &self,
        serial: Serial,
        request: &AnimationRequest,
    ) -> Result<(), SendError> {
        self.dispatch(packets::mobile_animation(serial, request, self.caps)?)
    }

    /// Compiles and sends a health-bar overlay update.
    ///
    /// # Errors
    ///
    /// Compilation failures and pipe disconnection.
    pub fn send_healthbar_state(
        &self,
        serial: Serial,
        kind: HealthbarKind,
        level: u8,
    ) -> Result<(), SendError> {
        self.dispatch(packets::healthbar_state(serial, kind, level)?)
    }

    /// Compiles and sends a death animation.
    ///
    /// # Errors
    ///
    /// Compilation failures and pipe disconnection.
    pub fn send_death_animation(&self, killed: Serial, corpse: Serial) -> Result<(), SendError> {
        self.dispatch(packets::death_animation(killed, corpse)?)
    }
}
