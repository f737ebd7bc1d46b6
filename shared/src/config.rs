use std::default::Default;

/// Contains Config properties which will be used by [`NetworkEntities`]
///
/// [`NetworkEntities`]: crate::NetworkEntities
#[derive(Clone, Debug)]
pub struct EntitiesConfig {
    /// When an entity is removed, also discard any buffered children still
    /// waiting on it (transitively), and any buffered payload for the removed
    /// id itself. When a client is purged, also discard every buffered payload
    /// it owns.
    pub prune_pending_on_removal: bool,
    /// Log a warning once the pending-parent buffer holds this many payloads.
    /// The buffer has no expiry, so a steadily growing count usually means a
    /// parent that will never arrive.
    pub pending_warn_threshold: Option<usize>,
}

impl Default for EntitiesConfig {
    fn default() -> Self {
        Self {
            prune_pending_on_removal: true,
            pending_warn_threshold: Some(1024),
        }
    }
}
