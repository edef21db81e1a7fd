//! Typed marshaling of API records into Terraform resource state.
//!
//! Structs declare their destination keys in a static descriptor table built
//! by [`tagged!`]. The mapper walks that table instead of reflecting over
//! fields at runtime.
//!
//! # Main Types
//!
//! - [`Value`] - Tagged union of everything a field or attribute can hold
//! - [`Tagged`] / [`Record`] - Descriptor tables and captured struct snapshots
//! - [`Schema`] / [`Attribute`] - Declared attribute types of a resource
//! - [`ResourceData`] / [`MemoryResourceData`] - Destination state containers
//! - [`FormParams`] - URL-encoded request parameters
//!
//! # Operations
//!
//! - [`map_struct_by_tag`] - Field extraction by tag name
//! - [`marshal_to_terraform`] - Struct to resource data, with nested sets
//! - [`simple_hashcode`] - Structural hash used for set element identity
//! - [`marshal_to_form`] - Struct to form parameters
//!
//! # Error Handling
//!
//! Errors are [`thiserror`] enums: [`MapError`], [`MarshalError`],
//! [`StateError`] and [`SchemaError`].

/// Error types for extraction and marshaling.
pub mod error;
/// Struct-to-map field extraction.
pub mod extract;
/// URL-encoded form parameters.
pub mod form;
/// Structural hash codes for set elements.
pub mod hashcode;
/// Struct-to-resource-data marshaling.
pub mod marshal;
/// Common re-exports.
pub mod prelude;
/// Resource data containers.
pub mod resource_data;
/// Resource schema declarations.
pub mod schema;
/// Field descriptor tables.
pub mod tag;
#[cfg(test)]
pub(crate) mod test_utils;
/// Value types.
pub mod value;

pub use error::{MapError, MarshalError};
pub use extract::{TERRAFORM_TAG, map_record_by_tag, map_struct_by_tag, map_value_by_tag};
pub use form::{FORM_TAG, FormParams, marshal_map_to_form, marshal_to_form};
pub use hashcode::{UNSUPPORTED_HASHCODE, hash_string, simple_hashcode};
pub use marshal::{TERRAFORM_ID_FIELD_NAME, marshal_record, marshal_to_terraform, marshal_value, undeclared_keys};
pub use resource_data::{MemoryResourceData, ResourceData, StateError};
pub use schema::{Attribute, Elem, Schema, SchemaError, ValueType};
pub use tag::{FieldDescriptor, Record, RecordField, Tag, Tagged};
pub use value::{Fields, HashFn, Set, ToValue, Value};
