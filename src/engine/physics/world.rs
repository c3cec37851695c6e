// Map ids and the registry of loaded tilemaps

use std::collections::HashMap;
use std::fmt;

use super::tilemap::Tilemap;
use super::MapError;

/// Identifier of a level/region an actor can occupy
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapId(String);

impl MapId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for MapId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owns every loaded tilemap, keyed by map id
///
/// The game resolves an actor's map here once per tick and hands the result
/// straight to the integrator.
#[derive(Debug, Default)]
pub struct MapRegistry {
    maps: HashMap<MapId, Tilemap>,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self {
            maps: HashMap::new(),
        }
    }

    /// Register a tilemap under an id that is not yet taken
    pub fn insert(&mut self, id: MapId, map: Tilemap) -> Result<(), MapError> {
        if self.maps.contains_key(&id) {
            return Err(MapError::DuplicateMap(id.to_string()));
        }

        log::info!(
            "Registered map '{}' ({}x{} tiles of {}px)",
            id,
            map.columns(),
            map.rows(),
            map.tile_size()
        );
        self.maps.insert(id, map);
        Ok(())
    }

    /// Collision source for a map; `None` means the map is an open world
    pub fn source_for(&self, id: &MapId) -> Option<&Tilemap> {
        let source = self.maps.get(id);
        if source.is_none() {
            log::debug!("No tilemap registered for '{}', treating it as open world", id);
        }
        source
    }

    /// Number of registered maps
    pub fn count(&self) -> usize {
        self.maps.len()
    }
}
