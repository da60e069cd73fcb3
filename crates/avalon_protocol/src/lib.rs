//! # AVALON Protocol - The Wire Codec
//!
//! The binary wire-protocol layer of the AVALON world server: live object
//! state in, byte-exact packets out, and persisted byte streams back into
//! typed values.
//!
//! ## Architecture
//!
//! - **Capabilities**: per-connection negotiated feature bits select which
//!   member of a packet-layout family a client receives
//! - **Wire**: little-endian primitive codec over seekable write and
//!   bounds-checked read cursors
//! - **Packets**: pure per-kind compilers, `(state, capabilities) -> bytes`
//! - **Pipe**: bounded handoff of finished packets to the network writer
//!
//! ## The Contract
//!
//! The client is fixed and closed-source. Every field width, every
//! conditional byte, every truncation rule below is load-bearing: a one-byte
//! deviation and the client misreads the rest of the stream.
//!
//! ## Example
//!
//! ```rust,ignore
//! use avalon_protocol::{packets, CapabilitySet, Era};
//!
//! let caps = Era::Tempest.capabilities();
//! let packet = packets::equipment_list(&mobile, notoriety, caps)?;
//! sender.send(packet)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod caps;
pub mod config;
pub mod error;
pub mod packets;
pub mod pipe;
pub mod session;
pub mod wire;

pub use caps::{CapabilitySet, Era};
pub use config::CodecConfig;
pub use error::{PipeError, SendError, WireError, WireResult};
pub use pipe::{OutboundPipe, PacketReceiver, PacketSender};
pub use session::Session;
pub use wire::{AttributePair, PacketWriter, RecordReader};

/// Largest packet the wire format can express.
///
/// Variable-length packets carry a 16-bit total length, so nothing larger
/// can ever be framed.
pub const MAX_PACKET_SIZE: usize = u16::MAX as usize;

/// Byte offset of the length field in variable-length packets.
pub const LENGTH_OFFSET: usize = 1;
