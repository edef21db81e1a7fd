//! URL-encoded form parameters for API requests.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::error::MapError;
use crate::extract::map_record_by_tag;
use crate::tag::{Record, Tagged};
use crate::value::Value;

/// Tag name read by [`marshal_to_form`] in request records.
pub const FORM_TAG: &str = "form";

/// An ordered list of form parameters. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormParams {
    pairs: Vec<(String, String)>,
}

impl FormParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn add(&mut self, key: &str, value: &str) {
        self.pairs.push((key.to_owned(), value.to_owned()));
    }

    /// Replaces every parameter named `key` with a single value.
    pub fn set(&mut self, key: &str, value: &str) {
        self.pairs.retain(|(k, _)| k != key);
        self.add(key, value);
    }

    /// Appends `value`'s string form unless it is null or empty.
    pub fn add_if_not_empty(&mut self, key: &str, value: &Value) {
        if value.is_null() {
            return;
        }

        let rendered = value.to_string();
        if !rendered.is_empty() {
            self.pairs.push((key.to_owned(), rendered));
        }
    }

    /// Returns the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Iterates over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encodes the parameters as an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

/// Builds form parameters from a string map.
#[must_use]
pub fn marshal_map_to_form(map: &BTreeMap<String, String>) -> FormParams {
    let mut params = FormParams::new();
    for (key, value) in map {
        params.add(key, value);
    }
    params
}

/// Builds form parameters from the fields of `src` tagged with `tag_name`.
///
/// Null and empty values are skipped and list elements become repeated keys.
/// Nested structs are flattened: their own tagged fields are added under
/// their own keys, and the form key on the nested field itself is ignored.
pub fn marshal_to_form<T: Tagged>(src: &T, tag_name: &str) -> Result<FormParams, MapError> {
    let mut params = FormParams::new();
    append_record(&mut params, &Record::capture(src), tag_name)?;
    Ok(params)
}

fn append_record(params: &mut FormParams, record: &Record, tag_name: &str) -> Result<(), MapError> {
    for (key, value) in map_record_by_tag(record, tag_name)? {
        match value {
            // the parent key is not sent
            Value::Record(nested) => append_record(params, &nested, tag_name)?,
            Value::List(items) => items.iter().for_each(|item| params.add_if_not_empty(&key, item)),
            other => params.add_if_not_empty(&key, &other),
        }
    }
    Ok(())
}
