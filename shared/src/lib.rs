//! # Netsync Shared
//! Registry and replication state machine for networked scene entities.
//!
//! Remote clients stream entity updates (full or compressed) and removals;
//! [`NetworkEntities`] turns them into local entity creation, in-place updates
//! and removal, creating parents strictly before their children whatever
//! order the updates arrive in.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod config;
mod session;
mod types;
mod world;

pub use config::EntitiesConfig;
pub use session::{
    entity_session::{EntitySession, SessionEvents, SessionOutcome},
    incoming_event::IncomingEvent,
};
pub use types::{ClientId, DataType, NetworkId, TemplateId};
pub use world::{
    component::component_key::{ComponentKey, ComponentMap, ComponentValue},
    payload::{
        entity_data::NetworkedEntityData,
        entity_payload::{CompressedPayload, EntityPayload, UncompressedPayload},
        error::PayloadError,
        removal_payload::RemovalPayload,
    },
    registry::entity_registry::EntityRegistry,
    remote::{
        collaborators::{EntityFactory, OwnershipIndex},
        entity_signal::{EntitySignal, NetworkedHandle},
        error::NetworkEntitiesError,
        network_entities::NetworkEntities,
        pending_parents::PendingParents,
        update_decision::UpdateDecision,
        update_outcome::UpdateOutcome,
    },
    schema::{
        error::SchemaError,
        schemas::{SchemaRegistry, Schemas},
    },
};
