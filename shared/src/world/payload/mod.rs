pub mod entity_data;
pub mod entity_payload;
pub mod error;
pub mod json;
pub mod removal_payload;
