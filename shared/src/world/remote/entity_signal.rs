use crate::NetworkedEntityData;

/// Lifecycle signals emitted on entity handles for the renderer and other
/// scene-side listeners.
#[derive(Clone, Debug, PartialEq)]
pub enum EntitySignal {
    /// New state for an entity that already exists locally
    NetworkUpdate(NetworkedEntityData),
    /// Retransmit complete current state to newly joined peers
    SyncAll,
}

impl EntitySignal {
    pub fn name(&self) -> &'static str {
        match self {
            EntitySignal::NetworkUpdate(_) => "networkUpdate",
            EntitySignal::SyncAll => "syncAll",
        }
    }
}

/// Handle to a scene node created for a networked entity.
///
/// Handles are cheap references (an id, an `Rc`, ..) into a scene graph that
/// owns the node; listeners attached to the node react to emitted signals.
pub trait NetworkedHandle {
    fn emit(&self, signal: EntitySignal);
}
