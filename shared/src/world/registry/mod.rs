pub mod entity_registry;
