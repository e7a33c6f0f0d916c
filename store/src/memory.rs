//! In-memory snapshot store for testing.

use std::sync::Mutex;

use crate::{SnapshotStore, StoreError};

/// Holds the snapshot in memory. Deterministic, never touches the
/// filesystem; the default backend in tests.
#[derive(Default)]
pub struct MemoryStore {
    bytes: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&self, bytes: &[u8]) -> Result<(), StoreError> {
        *self.bytes.lock().unwrap() = Some(bytes.to_vec());
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.bytes.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_none() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let store = MemoryStore::new();
        store.save(b"state v1").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some(&b"state v1"[..]));

        store.save(b"state v2").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some(&b"state v2"[..]));
    }
}
