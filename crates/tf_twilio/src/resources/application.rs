//! TwiML applications.

use serde::Deserialize;
use tf_mapper::{Attribute, ResourceData, Schema, ValueType, tagged};

use crate::dates::Timestamp;
use crate::resource::{ApiRecord, FromResourceData, string_attr};

/// A TwiML application as returned by `Applications.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Application {
    /// Application SID, `AP...`.
    pub sid: String,
    /// Human-readable name.
    #[serde(default)]
    pub friendly_name: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub date_created: Option<Timestamp>,
    /// Last update time.
    #[serde(default)]
    pub date_updated: Option<Timestamp>,
    /// Webhook for incoming calls.
    #[serde(default)]
    pub voice_url: Option<String>,
    /// Method for `voice_url`.
    #[serde(default)]
    pub voice_method: Option<String>,
    /// Webhook for incoming messages.
    #[serde(default)]
    pub sms_url: Option<String>,
    /// Method for `sms_url`.
    #[serde(default)]
    pub sms_method: Option<String>,
}

tagged! {
    Application {
        sid => [terraform = "id"],
        sid_attribute(|a: &Application| a.sid.clone()) => [terraform = "sid"],
        friendly_name => [terraform = "friendly_name"],
        date_created => [terraform = "date_created"],
        date_updated => [terraform = "date_updated"],
        voice_url => [terraform = "voice_url"],
        voice_method => [terraform = "voice_method"],
        sms_url => [terraform = "sms_url"],
        sms_method => [terraform = "sms_method"],
    }
}

impl ApiRecord for Application {}

/// Parameters for creating or updating an application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationRequest {
    /// Human-readable name.
    pub friendly_name: Option<String>,
    /// Webhook for incoming calls.
    pub voice_url: Option<String>,
    /// Method for `voice_url`.
    pub voice_method: Option<String>,
    /// Webhook for incoming messages.
    pub sms_url: Option<String>,
    /// Method for `sms_url`.
    pub sms_method: Option<String>,
}

tagged! {
    ApplicationRequest {
        friendly_name => [form = "FriendlyName"],
        voice_url => [form = "VoiceUrl"],
        voice_method => [form = "VoiceMethod"],
        sms_url => [form = "SmsUrl"],
        sms_method => [form = "SmsMethod"],
    }
}

impl FromResourceData for ApplicationRequest {
    fn from_resource_data(data: &dyn ResourceData) -> Self {
        Self {
            friendly_name: string_attr(data, "friendly_name"),
            voice_url: string_attr(data, "voice_url"),
            voice_method: string_attr(data, "voice_method"),
            sms_url: string_attr(data, "sms_url"),
            sms_method: string_attr(data, "sms_method"),
        }
    }
}

crate::declare_resource!(
    ApplicationResource,
    type_name: "twilio_application",
    description: "A TwiML application bundling voice and messaging webhooks.",
    record: Application,
    request: ApplicationRequest,
    schema: schema,
);

/// Terraform schema of `twilio_application`.
#[must_use]
pub fn schema() -> Schema {
    Schema::new()
        .with_attribute("sid", Attribute::computed(ValueType::String))
        .with_attribute("friendly_name", Attribute::optional(ValueType::String))
        .with_attribute("date_created", Attribute::computed(ValueType::String))
        .with_attribute("date_updated", Attribute::computed(ValueType::String))
        .with_attribute(
            "voice_url",
            Attribute::optional(ValueType::String).with_description("The URL called when a call reaches the application."),
        )
        .with_attribute("voice_method", Attribute::optional(ValueType::String).also_computed())
        .with_attribute(
            "sms_url",
            Attribute::optional(ValueType::String)
                .with_description("The URL called when a message reaches the application."),
        )
        .with_attribute("sms_method", Attribute::optional(ValueType::String).also_computed())
}

#[cfg(test)]
mod tests {
    use tf_mapper::{MemoryResourceData, Value};

    use super::*;
    use crate::resource::Resource;

    const BODY: &str = r#"{
        "sid": "AP2a0747eba6abf96b7e3c3ff0b4530f6e",
        "friendly_name": "Phone Me",
        "date_created": "Tue, 18 Aug 2015 16:48:57 +0000",
        "date_updated": "Tue, 18 Aug 2015 16:48:57 +0000",
        "voice_url": "http://demo.twilio.com/docs/voice.xml",
        "voice_method": "GET",
        "sms_url": null,
        "sms_method": "GET",
        "api_version": "2010-04-01"
    }"#;

    #[test]
    fn apply_response_fills_state() {
        let schema = schema();
        let mut data = MemoryResourceData::new(&schema);

        ApplicationResource.apply_response(BODY, &mut data, &schema).unwrap();

        assert_eq!(data.id(), "AP2a0747eba6abf96b7e3c3ff0b4530f6e");
        assert_eq!(data.get("friendly_name"), Some(Value::from("Phone Me")));
        assert_eq!(data.get("voice_url"), Some(Value::from("http://demo.twilio.com/docs/voice.xml")));
        assert_eq!(data.get("sms_url"), Some(Value::from("")));
        assert_eq!(data.get("date_updated"), Some(Value::from("2015-08-18T16:48:57+00:00")));
    }

    #[test]
    fn create_params_skip_unset_urls() {
        let schema = schema();
        let mut data = MemoryResourceData::new(&schema);
        data.set("friendly_name", Value::from("Phone Me")).unwrap();
        data.set("voice_url", Value::from("https://example.com/voice")).unwrap();

        let params = ApplicationResource.create_params(&data).unwrap();
        assert_eq!(params.encode(), "FriendlyName=Phone+Me&VoiceUrl=https%3A%2F%2Fexample.com%2Fvoice");
    }
}
