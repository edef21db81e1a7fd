//! Error types for field extraction and marshaling.

use thiserror::Error;

use crate::resource_data::StateError;
use crate::schema::ValueType;

/// Errors raised while extracting tagged fields from a struct.
#[derive(Debug, Error)]
pub enum MapError {
    /// The source was not a tagged struct (or was absent).
    #[error("source must be a tagged struct, got {kind}")]
    NotAStruct {
        /// Kind of the value that was supplied instead.
        kind: &'static str,
    },

    /// Two fields of the same struct map onto the same destination key.
    #[error("duplicate destination key '{key}' in {type_name}")]
    DuplicateKey {
        /// Type name of the offending struct.
        type_name: Box<str>,
        /// The destination key claimed more than once.
        key: Box<str>,
    },
}

/// Errors raised while marshaling a tagged struct into resource data.
///
/// Every variant except [`MarshalError::State`] is detected before the
/// destination is touched.
#[derive(Debug, Error)]
pub enum MarshalError {
    /// The source or a nested struct could not be mapped.
    #[error(transparent)]
    Map(#[from] MapError),

    /// A tagged field maps onto a key the schema does not declare.
    #[error("field '{key}' has no attribute in the resource schema")]
    UnknownAttribute {
        /// The destination key.
        key: Box<str>,
    },

    /// A set-typed attribute was given something other than a struct.
    #[error("attribute '{key}' is a set, but the source value is a {kind}, not a struct")]
    NotAStructForSet {
        /// The destination key.
        key: Box<str>,
        /// Kind of the value that was supplied.
        kind: &'static str,
    },

    /// A value does not fit the attribute's declared type.
    #[error("attribute '{key}' expects {expected}, but the source value is a {kind}")]
    TypeMismatch {
        /// The destination key.
        key: Box<str>,
        /// The declared attribute type.
        expected: ValueType,
        /// Kind of the value that was supplied.
        kind: &'static str,
    },

    /// The destination container rejected a write.
    #[error("setting '{key}' failed: {source}")]
    State {
        /// The destination key.
        key: Box<str>,
        /// The container's error.
        #[source]
        source: StateError,
    },
}
