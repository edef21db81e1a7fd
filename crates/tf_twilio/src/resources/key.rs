//! API keys.

use serde::Deserialize;
use tf_mapper::{Attribute, ResourceData, Schema, ValueType, tagged};

use crate::dates::Timestamp;
use crate::resource::{ApiRecord, FromResourceData, string_attr};

/// An API key as returned by `Keys.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Key {
    /// Key SID, `SK...`.
    pub sid: String,
    /// Human-readable name. Twilio generates one if none is given.
    #[serde(default)]
    pub friendly_name: Option<String>,
    /// Key secret. Only present in the creation response.
    #[serde(default)]
    pub secret: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub date_created: Option<Timestamp>,
    /// Last update time.
    #[serde(default)]
    pub date_updated: Option<Timestamp>,
}

tagged! {
    Key {
        sid => [terraform = "id"],
        sid_attribute(|k: &Key| k.sid.clone()) => [terraform = "sid"],
        friendly_name => [terraform = "friendly_name"],
        secret => [terraform = "secret"],
        date_created => [terraform = "date_created"],
        date_updated => [terraform = "date_updated"],
    }
}

impl ApiRecord for Key {
    fn merge_prior_state(&mut self, prior: &dyn ResourceData) {
        if self.secret.is_none() {
            self.secret = string_attr(prior, "secret");
        }
    }
}

/// Parameters for creating or renaming a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyRequest {
    /// Human-readable name.
    pub friendly_name: Option<String>,
}

tagged! {
    KeyRequest {
        friendly_name => [form = "FriendlyName"],
    }
}

impl FromResourceData for KeyRequest {
    fn from_resource_data(data: &dyn ResourceData) -> Self {
        Self {
            friendly_name: string_attr(data, "friendly_name"),
        }
    }
}

crate::declare_resource!(
    KeyResource,
    type_name: "twilio_key",
    description: "An API key for authenticating against the Twilio REST APIs.",
    record: Key,
    request: KeyRequest,
    schema: schema,
);

/// Terraform schema of `twilio_key`.
#[must_use]
pub fn schema() -> Schema {
    Schema::new()
        .with_attribute("sid", Attribute::computed(ValueType::String))
        .with_attribute("friendly_name", Attribute::optional(ValueType::String).also_computed())
        .with_attribute(
            "secret",
            Attribute::computed(ValueType::String)
                .sensitive()
                .with_description("The key secret. Only returned when the key is created."),
        )
        .with_attribute("date_created", Attribute::computed(ValueType::String))
        .with_attribute("date_updated", Attribute::computed(ValueType::String))
}
