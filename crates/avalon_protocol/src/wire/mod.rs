//! # Wire Primitives
//!
//! The primitive vocabulary of the protocol and the two cursors that speak
//! it:
//!
//! - [`PacketWriter`]: a seekable byte sink for packet compilation and
//!   persistence, with the seek-and-patch length contract
//! - [`RecordReader`]: a bounds-checked forward cursor over a fixed buffer,
//!   with entity-reference resolution
//! - [`AttributePair`]: the two alternate resource-bar encodings
//!
//! Every multi-byte value on the wire is little-endian. Write/read pairs
//! are exact inverses, bit for bit; there is no self-describing schema, so
//! a reader must know the field sequence in advance.

mod attribute;
mod reader;
mod writer;

pub use attribute::AttributePair;
pub use reader::RecordReader;
pub use writer::PacketWriter;
