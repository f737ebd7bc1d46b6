use thiserror::Error;

/// Errors raised while reading an entity payload off the wire
///
/// A payload that fails here is dropped as a whole; nothing about it reaches
/// the entity registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// A required field is absent, null, or empty
    #[error("Entity payload is missing required field '{field}'")]
    MissingField { field: &'static str },

    /// A field is present but holds an unusable value
    #[error("Entity payload field '{field}' is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    /// A compressed payload does not have the fixed positional layout
    #[error("Compressed entity payload has {actual} elements, expected {expected}")]
    WrongLength { expected: usize, actual: usize },

    /// A compressed component key is not a schema index
    #[error("Compressed component key '{key}' is not a valid schema index")]
    InvalidComponentIndex { key: String },

    /// Payload is neither a positional array nor a keyed object
    #[error("Entity payload must be an array (compressed) or an object (uncompressed)")]
    NotAnObjectOrArray,
}
