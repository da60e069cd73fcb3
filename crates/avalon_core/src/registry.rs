//! # Live-Object Registry
//!
//! When persisted state is decoded, object-typed fields arrive as raw
//! serials and must be resolved against whatever is currently loaded. The
//! codec never touches a global world: it is handed an [`EntityLookup`] and
//! asks it, serial by serial. A registry miss is a defined outcome (stale or
//! partially-loaded snapshots reference objects that no longer exist), not
//! an error.
//!
//! [`WorldRegistry`] is the production implementation: a serial-keyed map
//! behind a read-write lock. Decodes of independent records can resolve
//! concurrently; mutation happens between load phases.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::serial::Serial;

/// Resolves serials to live objects.
///
/// Implementations must treat "not found" as a normal answer. The decoder
/// never calls this for [`Serial::ZERO`].
pub trait EntityLookup {
    /// The resolved object handle.
    type Entity;

    /// Looks up a live object by serial, or `None` if nothing is loaded
    /// under that identifier.
    fn find_entity(&self, serial: Serial) -> Option<Self::Entity>;
}

/// A serial-keyed registry of live objects.
///
/// Readers (decoders) take the lock shared; inserts and removals take it
/// exclusive. Entries are cloned out on lookup, so `T` is typically a cheap
/// handle (an `Arc`, an index, a copyable id) rather than a whole object.
pub struct WorldRegistry<T> {
    entries: RwLock<HashMap<Serial, T>>,
}

impl<T: Clone> WorldRegistry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Registers an object under its serial, returning the previous entry
    /// if the serial was already bound.
    pub fn insert(&self, serial: Serial, entity: T) -> Option<T> {
        debug_assert!(!serial.is_zero(), "serial zero is reserved");
        self.entries.write().insert(serial, entity)
    }

    /// Removes the object bound to a serial.
    pub fn remove(&self, serial: Serial) -> Option<T> {
        self.entries.write().remove(&serial)
    }

    /// Returns true if a serial is currently bound.
    #[must_use]
    pub fn contains(&self, serial: Serial) -> bool {
        self.entries.read().contains_key(&serial)
    }

    /// Number of registered objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<T: Clone> Default for WorldRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> EntityLookup for WorldRegistry<T> {
    type Entity = T;

    fn find_entity(&self, serial: Serial) -> Option<T> {
        self.entries.read().get(&serial).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_find_remove() {
        let registry = WorldRegistry::new();
        let serial = Serial::new(0x42);

        assert!(registry.is_empty());
        assert_eq!(registry.insert(serial, "goblin"), None);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find_entity(serial), Some("goblin"));

        assert_eq!(registry.insert(serial, "orc"), Some("goblin"));
        assert_eq!(registry.remove(serial), Some("orc"));
        assert_eq!(registry.find_entity(serial), None);
    }

    #[test]
    fn test_missing_serial_is_none() {
        let registry: WorldRegistry<u32> = WorldRegistry::new();
        assert_eq!(registry.find_entity(Serial::new(0xDEAD)), None);
        assert!(!registry.contains(Serial::new(0xDEAD)));
    }
}
