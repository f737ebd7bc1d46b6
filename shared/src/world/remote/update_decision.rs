use crate::{EntityRegistry, NetworkId, NetworkedEntityData};

/// What to do with one normalized update, computed once from registry
/// membership.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateDecision {
    /// Entity exists locally, apply in place
    Update,
    /// Entity is new and can be built now; `parent` is set when it mounts
    /// under an existing entity
    Create { parent: Option<NetworkId> },
    /// Entity is new but its parent does not exist yet
    Defer { parent: NetworkId },
    /// Entity is new and the update is not full state, so it cannot
    /// originate the entity
    Ignore,
}

impl UpdateDecision {
    pub fn decide<H>(registry: &EntityRegistry<H>, data: &NetworkedEntityData) -> Self {
        if registry.has_entity(&data.network_id) {
            return UpdateDecision::Update;
        }
        if !data.is_full_state {
            return UpdateDecision::Ignore;
        }
        match &data.parent {
            None => UpdateDecision::Create { parent: None },
            Some(parent) if registry.has_entity(parent) => UpdateDecision::Create {
                parent: Some(parent.clone()),
            },
            Some(parent) => UpdateDecision::Defer {
                parent: parent.clone(),
            },
        }
    }
}
