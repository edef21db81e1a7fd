//! Convenience re-exports of the most commonly used types.

pub use crate::error::{MapError, MarshalError};
pub use crate::extract::{TERRAFORM_TAG, map_struct_by_tag, map_value_by_tag};
pub use crate::form::{FORM_TAG, FormParams, marshal_to_form};
pub use crate::hashcode::simple_hashcode;
pub use crate::marshal::{marshal_to_terraform, marshal_value};
pub use crate::resource_data::{MemoryResourceData, ResourceData, StateError};
pub use crate::schema::{Attribute, Elem, Schema, SchemaError, ValueType};
pub use crate::tag::{Record, Tagged};
pub use crate::tagged;
pub use crate::value::{Fields, Set, ToValue, Value};
