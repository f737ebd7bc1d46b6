pub mod entity_session;
pub mod incoming_event;
