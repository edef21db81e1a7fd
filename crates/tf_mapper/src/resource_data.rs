//! Destination containers for marshaled resource state.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::schema::{Schema, ValueType};
use crate::value::Value;

/// Per-instance state of a managed resource.
///
/// Mirrors the get/set/identifier primitives a Terraform resource handler
/// works with. An empty identifier means the resource does not exist.
pub trait ResourceData {
    /// Returns the resource identifier, or `""` if none is set.
    fn id(&self) -> &str;

    /// Sets the resource identifier.
    fn set_id(&mut self, id: &str);

    /// Reads an attribute, or `None` if the schema does not declare it.
    fn get(&self, key: &str) -> Option<Value>;

    /// Writes an attribute.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StateError>;
}

/// Errors raised by [`ResourceData::set`].
#[derive(Debug, Error)]
pub enum StateError {
    /// The schema does not declare the key.
    #[error("invalid address to set: '{key}'")]
    UnknownKey {
        /// The rejected key.
        key: Box<str>,
    },

    /// The value does not fit the attribute's declared type.
    #[error("'{key}' expects {expected}, got {kind}")]
    TypeMismatch {
        /// The rejected key.
        key: Box<str>,
        /// The declared attribute type.
        expected: ValueType,
        /// Kind of the value that was supplied.
        kind: &'static str,
    },
}

/// In-memory [`ResourceData`] validated against a borrowed schema.
#[derive(Debug, Clone)]
pub struct MemoryResourceData<'s> {
    schema: &'s Schema,
    id: String,
    values: BTreeMap<String, Value>,
}

impl<'s> MemoryResourceData<'s> {
    /// Creates empty state for a resource described by `schema`.
    #[must_use]
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            id: String::new(),
            values: BTreeMap::new(),
        }
    }

    /// Returns the schema this state is validated against.
    #[must_use]
    pub const fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Returns `true` if the resource has an identifier.
    #[must_use]
    pub fn exists(&self) -> bool {
        !self.id.is_empty()
    }

    /// Returns `true` if `key` was explicitly written.
    #[must_use]
    pub fn is_set(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterates over explicitly written attributes in key order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Renders the state as a JSON object with an `id` entry.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert("id".to_owned(), serde_json::Value::String(self.id.clone()));

        for (name, attribute) in self.schema.attributes() {
            let value = self
                .values
                .get(name)
                .cloned()
                .unwrap_or_else(|| attribute.default_value());
            let rendered = serde_json::to_value(&value).unwrap_or(serde_json::Value::Null);
            object.insert(name.to_owned(), rendered);
        }

        serde_json::Value::Object(object)
    }
}

impl ResourceData for MemoryResourceData<'_> {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        id.clone_into(&mut self.id);
    }

    fn get(&self, key: &str) -> Option<Value> {
        let attribute = self.schema.get(key)?;

        match self.values.get(key) {
            Some(Value::Null) | None => Some(attribute.default_value()),
            Some(value) => Some(value.clone()),
        }
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StateError> {
        let attribute = self
            .schema
            .get(key)
            .ok_or_else(|| StateError::UnknownKey { key: key.into() })?;

        if !attribute.ty.accepts(&value) {
            return Err(StateError::TypeMismatch {
                key: key.into(),
                expected: attribute.ty,
                kind: value.kind(),
            });
        }

        let value = match (attribute.ty, value) {
            (ValueType::Float, Value::Int(i)) => Value::Float(int_to_float(i)),
            (_, value) => value,
        };

        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

#[allow(clippy::cast_precision_loss, reason = "state integers are well below 2^52")]
fn int_to_float(i: i64) -> f64 {
    i as f64
}
