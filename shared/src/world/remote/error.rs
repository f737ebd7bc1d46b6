use thiserror::Error;

use crate::{PayloadError, SchemaError};

/// Errors that can fail a single entity update
///
/// Each error is local to the update that raised it: the update is dropped
/// and no registry or pending-parent state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkEntitiesError {
    /// Compressed update referenced a template or index the schemas cannot resolve
    #[error("Cannot decompress entity update: {0}")]
    Schema(#[from] SchemaError),

    /// Update payload was malformed
    #[error("Malformed entity update: {0}")]
    Payload(#[from] PayloadError),
}
