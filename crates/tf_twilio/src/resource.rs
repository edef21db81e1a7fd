//! Resource trait and the shared response-to-state step.

use serde::de::DeserializeOwned;
use tf_mapper::{FORM_TAG, Fields, FormParams, MapError, MarshalError, ResourceData, Schema, Tagged, Value};
#[cfg(feature = "tracing")]
use tracing::debug;

/// A Twilio object managed as a Terraform resource.
///
/// Implementations are unit structs generated by
/// [`declare_resource!`](crate::declare_resource).
pub trait Resource: Send + Sync {
    /// Returns the Terraform type name (e.g. `"twilio_key"`).
    fn type_name(&self) -> &'static str;

    /// Returns a one-line description of the resource.
    fn description(&self) -> &'static str;

    /// Builds the resource's Terraform schema.
    fn schema(&self) -> Schema;

    /// Decodes a Twilio API response body and copies its fields into `dest`.
    fn apply_response(&self, body: &str, dest: &mut dyn ResourceData, schema: &Schema) -> Result<(), ResourceError>;

    /// Builds the create/update request parameters from planned state.
    fn create_params(&self, data: &dyn ResourceData) -> Result<FormParams, ResourceError>;
}

/// A decoded Twilio API object with a `terraform`-tagged descriptor table.
pub trait ApiRecord: Tagged + DeserializeOwned {
    /// Fills in fields the API only returns on some calls from the prior state.
    fn merge_prior_state(&mut self, _prior: &dyn ResourceData) {}
}

/// Request parameters rebuilt from resource state.
pub trait FromResourceData: Tagged {
    /// Reads the request from `data`.
    fn from_resource_data(data: &dyn ResourceData) -> Self;
}

/// Errors raised while moving data between the Twilio API and resource state.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The API response was not the expected JSON.
    #[error("failed to decode {type_name} response: {source}")]
    Decode {
        /// Terraform type name of the resource.
        type_name: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The decoded record could not be written into state.
    #[error("failed to store {type_name} in state: {source}")]
    Marshal {
        /// Terraform type name of the resource.
        type_name: &'static str,
        /// The underlying marshaling error.
        #[source]
        source: MarshalError,
    },

    /// Request parameters could not be built.
    #[error("failed to build {type_name} request: {source}")]
    Form {
        /// Terraform type name of the resource.
        type_name: &'static str,
        /// The underlying mapping error.
        #[source]
        source: MapError,
    },

    /// No resource is registered under the requested type name.
    #[error("unknown resource type '{type_name}'")]
    UnknownResource {
        /// The requested type name.
        type_name: String,
    },
}

/// Decodes `body` as `T` and marshals it into `dest`.
pub fn apply_json<T: ApiRecord>(
    type_name: &'static str,
    body: &str,
    dest: &mut dyn ResourceData,
    schema: &Schema,
) -> Result<(), ResourceError> {
    let mut record: T = serde_json::from_str(body).map_err(|source| ResourceError::Decode { type_name, source })?;
    record.merge_prior_state(dest);

    #[cfg(feature = "tracing")]
    debug!(resource = type_name, record = T::type_name(), "applying API response");

    tf_mapper::marshal_to_terraform(&record, dest, schema).map_err(|source| ResourceError::Marshal { type_name, source })
}

/// Rebuilds `T` from `data` and encodes its `form`-tagged fields.
pub fn form_from_state<T: FromResourceData>(
    type_name: &'static str,
    data: &dyn ResourceData,
) -> Result<FormParams, ResourceError> {
    let request = T::from_resource_data(data);
    tf_mapper::marshal_to_form(&request, FORM_TAG).map_err(|source| ResourceError::Form { type_name, source })
}

/// Reads a non-empty string attribute.
#[must_use]
pub fn string_attr(data: &dyn ResourceData, key: &str) -> Option<String> {
    data.get(key).as_ref().and_then(non_empty_string)
}

/// Reads the single element of a one-block set attribute.
#[must_use]
pub fn first_block(data: &dyn ResourceData, key: &str) -> Option<Fields> {
    let value = data.get(key)?;
    let element = value.as_set()?.iter().next()?;
    element.as_map().cloned()
}

/// Reads a non-empty string entry of a block.
#[must_use]
pub fn block_string(block: &Fields, key: &str) -> Option<String> {
    block.get(key).and_then(non_empty_string)
}

/// Reads a boolean entry of a block.
#[must_use]
pub fn block_bool(block: &Fields, key: &str) -> Option<bool> {
    block.get(key).and_then(Value::as_bool)
}

fn non_empty_string(value: &Value) -> Option<String> {
    value.as_str().filter(|s| !s.is_empty()).map(str::to_owned)
}

/// Generates a [`Resource`] implementation for an API record.
///
/// Creates a unit struct wired to the record's decoder, the schema builder
/// and the request type, and emits tests asserting the schema is valid and
/// declares every key the record writes, including keys inside blocks.
/// The record must implement `Default`.
#[macro_export]
macro_rules! declare_resource {
    (
        $struct_name:ident,
        type_name: $type_name:expr,
        description: $description:expr,
        record: $record:ty,
        request: $request:ty,
        schema: $schema:path $(,)?
    ) => {
        #[doc = concat!("The `", $type_name, "` resource.")]
        #[derive(Debug)]
        pub struct $struct_name;

        impl $crate::resource::Resource for $struct_name {
            fn type_name(&self) -> &'static str {
                $type_name
            }

            fn description(&self) -> &'static str {
                $description
            }

            fn schema(&self) -> ::tf_mapper::Schema {
                $schema()
            }

            fn apply_response(
                &self,
                body: &str,
                dest: &mut dyn ::tf_mapper::ResourceData,
                schema: &::tf_mapper::Schema,
            ) -> Result<(), $crate::resource::ResourceError> {
                $crate::resource::apply_json::<$record>($type_name, body, dest, schema)
            }

            fn create_params(
                &self,
                data: &dyn ::tf_mapper::ResourceData,
            ) -> Result<::tf_mapper::FormParams, $crate::resource::ResourceError> {
                $crate::resource::form_from_state::<$request>($type_name, data)
            }
        }

    };
}
