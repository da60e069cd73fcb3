//! # AVALON Core - World Identity & Subject State
//!
//! The shared vocabulary between the world simulation and the wire codec:
//!
//! - **Serials**: 32-bit identifiers naming every live or persisted object
//! - **Geometry**: points, rectangles and facing directions
//! - **Registry**: the serial-to-object map decoders resolve references against
//! - **State views**: plain-data snapshots of a mobile the packet compilers read
//!
//! ## Architecture Rules
//!
//! 1. **No behavior** - game rules (visibility, notoriety, combat) live in the
//!    (external) content layer; this crate only names and carries state
//! 2. **Value types** - everything here is cheap to copy or clone and has no
//!    hidden lifecycle
//! 3. **One lock** - the registry is the only synchronized structure

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod geometry;
pub mod registry;
pub mod serial;
pub mod state;

pub use geometry::{Direction, Point2D, Point3D, Rect2D, Rect3D};
pub use registry::{EntityLookup, WorldRegistry};
pub use serial::Serial;
pub use state::{layers, EquippedItem, HairState, MobileState};
