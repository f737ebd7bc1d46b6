use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::{
    world::remote::{
        collaborators::{EntityFactory, OwnershipIndex},
        entity_signal::{EntitySignal, NetworkedHandle},
        pending_parents::PendingParents,
        update_decision::UpdateDecision,
        update_outcome::UpdateOutcome,
    },
    ClientId, DataType, EntitiesConfig, EntityPayload, EntityRegistry, NetworkEntitiesError,
    NetworkId, NetworkedEntityData, RemovalPayload, SchemaRegistry,
};

/// Tracks every entity that exists locally because of network
/// synchronization.
///
/// Owns the entity registry and the pending-parent buffer. Collaborators
/// (schemas, factory, ownership index) are passed into the operations that
/// need them, so the caller that owns the network session decides their
/// lifetime.
pub struct NetworkEntities<H: NetworkedHandle> {
    config: EntitiesConfig,
    registry: EntityRegistry<H>,
    pending: PendingParents,
    pending_warned: bool,
}

impl<H: NetworkedHandle> Default for NetworkEntities<H> {
    fn default() -> Self {
        Self::new(EntitiesConfig::default())
    }
}

impl<H: NetworkedHandle> NetworkEntities<H> {
    pub fn new(config: EntitiesConfig) -> Self {
        Self {
            config,
            registry: EntityRegistry::new(),
            pending: PendingParents::new(),
            pending_warned: false,
        }
    }

    pub fn config(&self) -> &EntitiesConfig {
        &self.config
    }

    pub fn registry(&self) -> &EntityRegistry<H> {
        &self.registry
    }

    pub fn pending_parents(&self) -> &PendingParents {
        &self.pending
    }

    // Registry

    pub fn register_entity(&mut self, network_id: NetworkId, handle: H) {
        self.registry.register_entity(network_id, handle);
    }

    pub fn get_entity(&self, network_id: &NetworkId) -> Option<&H> {
        self.registry.get_entity(network_id)
    }

    pub fn has_entity(&self, network_id: &NetworkId) -> bool {
        self.registry.has_entity(network_id)
    }

    /// Removes the entity from the registry and returns its handle. The
    /// handle's resources are left to the caller.
    pub fn remove_entity(&mut self, network_id: &NetworkId) -> Option<H> {
        if self.config.prune_pending_on_removal {
            let mut pruned = self.pending.prune_parent(network_id);
            if self.pending.remove_child(network_id).is_some() {
                pruned.push(network_id.clone());
            }
            if !pruned.is_empty() {
                debug!(
                    "NetworkEntities: removal of entity {} discarded pending entities {:?}",
                    network_id, pruned
                );
                self.check_pending_threshold();
            }
        }

        let handle = self.registry.remove_entity(network_id);
        if handle.is_some() {
            info!("NetworkEntities: removed entity {}", network_id);
        }
        handle
    }

    // Updates

    /// Applies one incoming entity update.
    ///
    /// The payload is normalized first; nothing is mutated if that fails.
    /// Creating an entity also creates, in the same call, every buffered
    /// descendant that was waiting on it, ancestors strictly first.
    pub fn update_entity(
        &mut self,
        schemas: &dyn SchemaRegistry,
        factory: &mut dyn EntityFactory<H>,
        from_client: &ClientId,
        data_type: &DataType,
        payload: EntityPayload,
    ) -> Result<UpdateOutcome, NetworkEntitiesError> {
        let payload_id = payload.network_id().clone();
        let data = payload.normalize(schemas).map_err(|error| {
            warn!(
                "NetworkEntities: dropping update '{}' for entity {} from client {}: {}",
                data_type.tag(),
                payload_id,
                from_client,
                error
            );
            error
        })?;

        let network_id = data.network_id.clone();
        let outcome = match UpdateDecision::decide(&self.registry, &data) {
            UpdateDecision::Update => {
                self.apply_update(data);
                UpdateOutcome::Updated(network_id)
            }
            UpdateDecision::Create { parent } => {
                self.create(factory, data, parent.as_ref());
                let flushed = self.flush_children(factory, &network_id);
                UpdateOutcome::Created {
                    network_id,
                    flushed,
                }
            }
            UpdateDecision::Defer { parent } => {
                self.defer(&parent, data);
                UpdateOutcome::Deferred { network_id, parent }
            }
            UpdateDecision::Ignore => {
                debug!(
                    "NetworkEntities: ignoring partial update for unknown entity {} from client {}",
                    network_id, from_client
                );
                UpdateOutcome::Ignored(network_id)
            }
        };

        Ok(outcome)
    }

    fn apply_update(&mut self, data: NetworkedEntityData) {
        if let Some(handle) = self.registry.get_entity(&data.network_id) {
            handle.emit(EntitySignal::NetworkUpdate(data));
        }
    }

    fn create(
        &mut self,
        factory: &mut dyn EntityFactory<H>,
        data: NetworkedEntityData,
        parent: Option<&NetworkId>,
    ) {
        // a stale buffered payload for this entity is superseded by creation
        self.pending.remove_child(&data.network_id);

        let parent_handle = parent.and_then(|parent| self.registry.get_entity(parent));
        let handle = factory.create(&data, parent_handle);

        info!(
            "NetworkEntities: created entity {} from template {} (owner {}, parent {:?})",
            data.network_id, data.template, data.owner, data.parent
        );
        self.registry.register_entity(data.network_id, handle);
    }

    fn defer(&mut self, parent: &NetworkId, data: NetworkedEntityData) {
        debug!(
            "NetworkEntities: entity {} waits for parent {}",
            data.network_id, parent
        );
        self.pending.queue(parent, data);
        self.check_pending_threshold();
    }

    /// Creates everything that was waiting on `parent`, then everything that
    /// was waiting on those, breadth first.
    fn flush_children(
        &mut self,
        factory: &mut dyn EntityFactory<H>,
        parent: &NetworkId,
    ) -> Vec<NetworkId> {
        let mut flushed = Vec::new();
        let mut ready: VecDeque<NetworkedEntityData> = self.pending.take_children(parent).into();

        while let Some(child) = ready.pop_front() {
            match UpdateDecision::decide(&self.registry, &child) {
                UpdateDecision::Create { parent } => {
                    let network_id = child.network_id.clone();
                    self.create(factory, child, parent.as_ref());
                    ready.extend(self.pending.take_children(&network_id));
                    flushed.push(network_id);
                }
                UpdateDecision::Update => {
                    // registered directly while it was waiting
                    self.apply_update(child);
                }
                UpdateDecision::Defer { parent } => {
                    self.pending.queue(&parent, child);
                }
                UpdateDecision::Ignore => {}
            }
        }

        if !flushed.is_empty() {
            info!(
                "NetworkEntities: created {} pending entities under {}",
                flushed.len(),
                parent
            );
            self.check_pending_threshold();
        }

        flushed
    }

    fn check_pending_threshold(&mut self) {
        let Some(threshold) = self.config.pending_warn_threshold else {
            return;
        };
        if self.pending.len() < threshold {
            self.pending_warned = false;
            return;
        }
        if !self.pending_warned {
            warn!(
                "NetworkEntities: {} entities are waiting on parents that do not exist locally",
                self.pending.len()
            );
            self.pending_warned = true;
        }
    }

    // Full sync

    /// Asks every registered entity to retransmit its complete state. Returns
    /// the number of entities signalled.
    pub fn complete_sync(&self) -> usize {
        let mut signalled = 0;
        for handle in self.registry.handles() {
            handle.emit(EntitySignal::SyncAll);
            signalled += 1;
        }
        debug!("NetworkEntities: requested full sync from {} entities", signalled);
        signalled
    }

    // Removal

    pub fn remove_remote_entity(
        &mut self,
        from_client: &ClientId,
        data_type: &DataType,
        payload: &RemovalPayload,
    ) -> Option<H> {
        debug!(
            "NetworkEntities: client {} sent '{}' for entity {}",
            from_client,
            data_type.tag(),
            payload.network_id
        );
        self.remove_entity(&payload.network_id)
    }

    /// Removes every entity owned by `client_id`, typically because that
    /// client disconnected. Entities whose owner cannot be resolved are
    /// skipped.
    pub fn remove_entities_of_client(
        &mut self,
        ownership: &dyn OwnershipIndex<H>,
        client_id: &ClientId,
    ) -> Vec<H> {
        let owned: Vec<NetworkId> = self
            .registry
            .iter()
            .filter_map(|(network_id, handle)| match ownership.owner_of(handle) {
                Some(owner) if &owner == client_id => Some(network_id.clone()),
                Some(_) => None,
                None => {
                    warn!(
                        "NetworkEntities: cannot resolve owner of entity {}, skipping",
                        network_id
                    );
                    None
                }
            })
            .collect();

        let removed: Vec<H> = owned
            .iter()
            .filter_map(|network_id| self.remove_entity(network_id))
            .collect();

        if self.config.prune_pending_on_removal && !self.pending.prune_owner(client_id).is_empty() {
            self.check_pending_threshold();
        }

        info!(
            "NetworkEntities: removed {} entities of client {}",
            removed.len(),
            client_id
        );
        removed
    }

    /// Removes every entity not owned by `local_client` and forgets every
    /// buffered payload. Used when leaving a session.
    pub fn remove_remote_entities(
        &mut self,
        ownership: &dyn OwnershipIndex<H>,
        local_client: &ClientId,
    ) -> Vec<H> {
        let remote: Vec<NetworkId> = self
            .registry
            .iter()
            .filter(|(_, handle)| ownership.owner_of(handle).as_ref() != Some(local_client))
            .map(|(network_id, _)| network_id.clone())
            .collect();

        self.pending.clear();
        self.pending_warned = false;

        remote
            .iter()
            .filter_map(|network_id| self.registry.remove_entity(network_id))
            .collect()
    }

    /// Empties the registry and the pending buffer, returning every handle.
    pub fn clear(&mut self) -> Vec<H> {
        self.pending.clear();
        self.pending_warned = false;
        self.registry.drain()
    }
}
