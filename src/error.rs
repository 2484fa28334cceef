//! Error types for the fleet manager function.
//!
//! Every error here is terminal for a single invocation: the function turns
//! it into a fatal result on the response instead of returning it to the host.

use thiserror::Error;

/// A required part of the request document is absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no composite resource found")]
    CompositeMissing,

    /// A required field is missing; carries the field name.
    #[error("{field} is required")]
    RequiredFieldMissing { field: &'static str },
}

impl ValidationError {
    pub(crate) fn missing(field: &'static str) -> Self {
        ValidationError::RequiredFieldMissing { field }
    }
}

/// The synthesized resource could not be encoded into the wire document.
#[derive(Debug, Error)]
#[error("cannot marshal resource to JSON: {source}")]
pub struct SerializationError {
    #[from]
    source: serde_json::Error,
}

/// Any failure that ends an invocation on the fatal path.
#[derive(Debug, Error)]
pub enum FunctionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),
}
