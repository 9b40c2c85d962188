//! Per-channel map ownership.
//!
//! `MapRegistry` maps an opaque session key (a chat channel id, a REPL
//! session name, ...) to at most one [`SquareMap`]. The table has its own
//! lock, separate from every map's chit lock, so creating or dropping one
//! channel's map never waits on another channel's chit mutations.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::rpgmap::{MapError, SquareMap};

/// Registry of maps keyed by session key.
#[derive(Debug, Default)]
pub struct MapRegistry {
    maps: RwLock<HashMap<String, Arc<SquareMap>>>,
}

impl MapRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { maps: RwLock::new(HashMap::new()) }
    }

    /// Create a new map for `key`, replacing any map already there.
    ///
    /// On error the previous map (if any) is kept.
    pub fn initialize(&self, key: &str, width: i32, height: i32) -> Result<Arc<SquareMap>, MapError> {
        let map = Arc::new(SquareMap::new(width, height)?);

        let previous = self.write().insert(key.to_string(), Arc::clone(&map));
        tracing::debug!(
            key,
            size = %map.size_str(),
            replaced = previous.is_some(),
            "initialized map"
        );

        Ok(map)
    }

    /// Remove the map for `key`. Returns whether one existed.
    pub fn clear(&self, key: &str) -> bool {
        let removed = self.write().remove(key).is_some();
        if removed {
            tracing::debug!(key, "cleared map");
        }
        removed
    }

    /// The map currently owned by `key`.
    pub fn get(&self, key: &str) -> Option<Arc<SquareMap>> {
        self.read().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All keys that currently own a map, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<SquareMap>>> {
        self.maps.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<SquareMap>>> {
        self.maps.write().unwrap_or_else(PoisonError::into_inner)
    }
}
