use crate::NetworkId;

/// Result of dispatching one entity update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Existing entity received a `networkUpdate`
    Updated(NetworkId),
    /// Entity was created; `flushed` lists buffered descendants created in
    /// the same call, in creation order
    Created {
        network_id: NetworkId,
        flushed: Vec<NetworkId>,
    },
    /// Entity was buffered until `parent` is created
    Deferred { network_id: NetworkId, parent: NetworkId },
    /// Compressed update for an entity that does not exist locally
    Ignored(NetworkId),
}

impl UpdateOutcome {
    pub fn network_id(&self) -> &NetworkId {
        match self {
            UpdateOutcome::Updated(network_id) => network_id,
            UpdateOutcome::Created { network_id, .. } => network_id,
            UpdateOutcome::Deferred { network_id, .. } => network_id,
            UpdateOutcome::Ignored(network_id) => network_id,
        }
    }

    /// Number of entities this update created, including flushed descendants.
    pub fn created_count(&self) -> usize {
        match self {
            UpdateOutcome::Created { flushed, .. } => 1 + flushed.len(),
            _ => 0,
        }
    }
}
