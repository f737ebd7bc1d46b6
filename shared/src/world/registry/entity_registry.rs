use std::collections::{hash_map, HashMap};

use log::debug;

use crate::NetworkId;

/// Network id -> local entity handle.
///
/// The single source of truth for whether a networked entity exists locally.
/// Handles are owned by the scene graph; the registry keeps a lookup copy and
/// never destroys them.
pub struct EntityRegistry<H> {
    entities: HashMap<NetworkId, H>,
}

impl<H> Default for EntityRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> EntityRegistry<H> {
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
        }
    }

    /// Inserts the handle, overwriting any handle already registered under
    /// the same id.
    pub fn register_entity(&mut self, network_id: NetworkId, handle: H) {
        if self.entities.insert(network_id.clone(), handle).is_some() {
            debug!("EntityRegistry: replaced handle for entity {}", network_id);
        }
    }

    pub fn get_entity(&self, network_id: &NetworkId) -> Option<&H> {
        self.entities.get(network_id)
    }

    pub fn has_entity(&self, network_id: &NetworkId) -> bool {
        self.entities.contains_key(network_id)
    }

    pub fn remove_entity(&mut self, network_id: &NetworkId) -> Option<H> {
        self.entities.remove(network_id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, NetworkId, H> {
        self.entities.iter()
    }

    pub fn handles(&self) -> hash_map::Values<'_, NetworkId, H> {
        self.entities.values()
    }

    pub fn network_ids(&self) -> hash_map::Keys<'_, NetworkId, H> {
        self.entities.keys()
    }

    /// Empties the registry, handing every handle back to the caller.
    pub fn drain(&mut self) -> Vec<H> {
        self.entities.drain().map(|(_, handle)| handle).collect()
    }
}
