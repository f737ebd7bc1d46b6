use crate::{ClientId, ComponentKey, ComponentMap, ComponentValue, NetworkId, TemplateId};

/// Normalized state of one networked entity, as handed to the entity
/// factory and to `networkUpdate` listeners.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkedEntityData {
    pub network_id: NetworkId,
    pub owner: ClientId,
    pub parent: Option<NetworkId>,
    pub template: TemplateId,
    pub components: ComponentMap,
    /// True when the payload carried the full schema. Compressed deltas are
    /// not full state and can never originate an entity.
    pub is_full_state: bool,
}

impl NetworkedEntityData {
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub fn component(&self, key: &ComponentKey) -> Option<&ComponentValue> {
        self.components.get(key)
    }
}
