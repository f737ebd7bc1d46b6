pub mod component;
pub mod payload;
pub mod registry;
pub mod remote;
pub mod schema;
