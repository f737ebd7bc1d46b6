use thiserror::Error;

/// Errors that can occur while registering or resolving template schemas
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// No schema registered for the template referenced by an update
    #[error("Schema not found for template {template}. Must call `add_schema()` for every template that can be synced")]
    NotFound { template: String },

    /// A compressed update referenced a component index beyond the schema
    #[error("Component index {index} out of range for template {template}, schema has {len} components")]
    IndexOutOfRange {
        template: String,
        index: usize,
        len: usize,
    },

    /// Schema rejected at registration time
    #[error("Invalid schema for template {template}: {reason}")]
    InvalidSchema {
        template: String,
        reason: &'static str,
    },

    /// Schemas are locked and cannot be modified
    #[error("Schemas are already locked and cannot be modified. Schemas.lock() has been called and no further changes are allowed")]
    AlreadyLocked,
}
