pub mod collaborators;
pub mod entity_signal;
pub mod error;
pub mod network_entities;
pub mod pending_parents;
pub mod update_decision;
pub mod update_outcome;
