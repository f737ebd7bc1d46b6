use netsync_shared::{ClientId, OwnershipIndex};

use crate::test_world::TestEntity;

/// Reads the owner recorded on the node itself.
pub struct NodeOwnership;

impl OwnershipIndex<TestEntity> for NodeOwnership {
    fn owner_of(&self, handle: &TestEntity) -> Option<ClientId> {
        handle.owner()
    }
}

/// Reports the same owner for every handle.
pub struct FixedOwner(pub ClientId);

impl FixedOwner {
    pub fn new(owner: impl Into<ClientId>) -> Self {
        Self(owner.into())
    }
}

impl OwnershipIndex<TestEntity> for FixedOwner {
    fn owner_of(&self, _: &TestEntity) -> Option<ClientId> {
        Some(self.0.clone())
    }
}
