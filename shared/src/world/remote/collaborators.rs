use crate::{ClientId, NetworkedEntityData};

/// Builds the local scene node for a networked entity.
///
/// The returned handle must be usable immediately, even if the node finishes
/// attaching its resources later.
pub trait EntityFactory<H> {
    /// `parent` is the parent's handle when `data` declares one, to be used as
    /// the mount point.
    fn create(&mut self, data: &NetworkedEntityData, parent: Option<&H>) -> H;
}

impl<H, F> EntityFactory<H> for F
where
    F: FnMut(&NetworkedEntityData, Option<&H>) -> H,
{
    fn create(&mut self, data: &NetworkedEntityData, parent: Option<&H>) -> H {
        self(data, parent)
    }
}

/// Reports which client currently has authority over an entity.
pub trait OwnershipIndex<H> {
    /// `None` when the owner cannot be determined for this handle.
    fn owner_of(&self, handle: &H) -> Option<ClientId>;
}

impl<H, F> OwnershipIndex<H> for F
where
    F: Fn(&H) -> Option<ClientId>,
{
    fn owner_of(&self, handle: &H) -> Option<ClientId> {
        self(handle)
    }
}
