use log::{info, warn};

use crate::{
    session::incoming_event::IncomingEvent, ClientId, EntitiesConfig, EntityFactory,
    NetworkEntities, NetworkEntitiesError, NetworkedHandle, OwnershipIndex, SchemaRegistry,
    UpdateOutcome,
};

/// What a single [`IncomingEvent`] did to the local entity set.
#[derive(Debug)]
pub enum SessionOutcome<H> {
    Update(UpdateOutcome),
    Removed(Option<H>),
    ClientPurged(ClientId, Vec<H>),
    Synced(usize),
}

/// Outcomes and errors collected while draining a batch of events.
pub struct SessionEvents<H> {
    outcomes: Vec<SessionOutcome<H>>,
    errors: Vec<NetworkEntitiesError>,
}

impl<H> SessionEvents<H> {
    fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn outcomes(&self) -> &[SessionOutcome<H>] {
        &self.outcomes
    }

    pub fn errors(&self) -> &[NetworkEntitiesError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_outcomes(self) -> Vec<SessionOutcome<H>> {
        self.outcomes
    }
}

/// One network session's worth of entity replication state.
///
/// Constructing the session starts it; [`EntitySession::end`] consumes it and
/// hands back every handle that was still registered, so nothing outlives
/// the session by accident.
pub struct EntitySession<H, S, F, O>
where
    H: NetworkedHandle,
    S: SchemaRegistry,
    F: EntityFactory<H>,
    O: OwnershipIndex<H>,
{
    local_client: ClientId,
    entities: NetworkEntities<H>,
    schemas: S,
    factory: F,
    ownership: O,
}

impl<H, S, F, O> EntitySession<H, S, F, O>
where
    H: NetworkedHandle,
    S: SchemaRegistry,
    F: EntityFactory<H>,
    O: OwnershipIndex<H>,
{
    pub fn start(
        local_client: ClientId,
        config: EntitiesConfig,
        schemas: S,
        factory: F,
        ownership: O,
    ) -> Self {
        info!("EntitySession: starting session for client {}", local_client);
        Self {
            local_client,
            entities: NetworkEntities::new(config),
            schemas,
            factory,
            ownership,
        }
    }

    /// Tears the session down, returning every handle still registered so the
    /// caller can detach them from the scene.
    pub fn end(mut self) -> Vec<H> {
        let handles = self.entities.clear();
        info!(
            "EntitySession: ended session for client {}, released {} entities",
            self.local_client,
            handles.len()
        );
        handles
    }

    pub fn local_client(&self) -> &ClientId {
        &self.local_client
    }

    pub fn entities(&self) -> &NetworkEntities<H> {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut NetworkEntities<H> {
        &mut self.entities
    }

    pub fn schemas(&self) -> &S {
        &self.schemas
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn ownership(&self) -> &O {
        &self.ownership
    }

    pub fn receive_event(
        &mut self,
        event: IncomingEvent,
    ) -> Result<SessionOutcome<H>, NetworkEntitiesError> {
        match event {
            IncomingEvent::Update {
                from,
                data_type,
                payload,
            } => {
                let outcome = self.entities.update_entity(
                    &self.schemas,
                    &mut self.factory,
                    &from,
                    &data_type,
                    payload,
                )?;
                Ok(SessionOutcome::Update(outcome))
            }
            IncomingEvent::Remove {
                from,
                data_type,
                payload,
            } => Ok(SessionOutcome::Removed(
                self.entities
                    .remove_remote_entity(&from, &data_type, &payload),
            )),
            IncomingEvent::ClientDisconnected(client_id) => {
                let removed = self
                    .entities
                    .remove_entities_of_client(&self.ownership, &client_id);
                Ok(SessionOutcome::ClientPurged(client_id, removed))
            }
            IncomingEvent::SyncRequested => Ok(SessionOutcome::Synced(self.entities.complete_sync())),
        }
    }

    /// Handles events in order. A failing event is recorded and skipped; it
    /// never stops the rest of the batch.
    pub fn receive_events(&mut self, events: Vec<IncomingEvent>) -> SessionEvents<H> {
        let mut session_events = SessionEvents::new();
        for event in events {
            let name = event.name();
            match self.receive_event(event) {
                Ok(outcome) => session_events.outcomes.push(outcome),
                Err(error) => {
                    warn!("EntitySession: {} event failed: {}", name, error);
                    session_events.errors.push(error);
                }
            }
        }
        session_events
    }
}
