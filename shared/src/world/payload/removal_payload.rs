use crate::NetworkId;

/// Remote notification that an entity was deleted by its owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovalPayload {
    pub network_id: NetworkId,
}

impl RemovalPayload {
    pub fn new(network_id: impl Into<NetworkId>) -> Self {
        Self {
            network_id: network_id.into(),
        }
    }
}
