//! Incoming phone numbers purchased on the account.
//!
//! Twilio reports the SMS, voice, status callback and emergency settings as
//! flat `sms_*`/`voice_*` fields; each group is stored in state as a
//! single-element set so it can be configured as one block.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tf_mapper::{Attribute, Fields, FormParams, ResourceData, Schema, ValueType, tagged};

use crate::dates::Timestamp;
use crate::resource::{ApiRecord, FromResourceData, ResourceError, block_bool, block_string, first_block, string_attr};

static NUMBER_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::unwrap_used, reason = "static regex is known-valid at compile time")]
    Regex::new("[ -]").unwrap()
});

/// An incoming phone number as returned by `IncomingPhoneNumbers.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhoneNumber {
    /// Phone number SID, `PN...`.
    pub sid: String,
    /// The number in E.164 format.
    pub phone_number: String,
    /// Human-readable name.
    #[serde(default)]
    pub friendly_name: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub date_created: Option<Timestamp>,
    /// Last update time.
    #[serde(default)]
    pub date_updated: Option<Timestamp>,
    /// Address requirement (`none`, `any`, `local` or `foreign`).
    #[serde(default)]
    pub address_requirements: Option<String>,
    /// Whether the number is new to Twilio.
    #[serde(default)]
    pub beta: bool,
    /// Supported message and call types.
    #[serde(default)]
    pub capabilities: Capabilities,
    /// Address registered for the number.
    #[serde(default)]
    pub address_sid: Option<String>,
    /// Identity registered for the number.
    #[serde(default)]
    pub identity_sid: Option<String>,
    /// SIP trunk handling calls to the number.
    #[serde(default)]
    pub trunk_sid: Option<String>,
    /// Inbound SMS handling.
    #[serde(flatten)]
    pub sms: SmsSettings,
    /// Inbound call handling.
    #[serde(flatten)]
    pub voice: VoiceSettings,
    /// Status change notifications.
    #[serde(flatten)]
    pub status_callback: StatusCallback,
    /// Emergency calling registration.
    #[serde(flatten)]
    pub emergency: Emergency,
}

/// Message and call types a number supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Voice calls.
    pub voice: bool,
    /// SMS.
    pub sms: bool,
    /// MMS.
    pub mms: bool,
    /// Fax.
    pub fax: bool,
}

/// Webhooks invoked for inbound SMS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SmsSettings {
    /// Application handling the message. Overrides the URLs.
    #[serde(rename = "sms_application_sid")]
    pub application_sid: Option<String>,
    /// Primary webhook method.
    #[serde(rename = "sms_method")]
    pub primary_http_method: Option<String>,
    /// Primary webhook URL.
    #[serde(rename = "sms_url")]
    pub primary_url: Option<String>,
    /// Fallback webhook method.
    #[serde(rename = "sms_fallback_method")]
    pub fallback_http_method: Option<String>,
    /// Fallback webhook URL.
    #[serde(rename = "sms_fallback_url")]
    pub fallback_url: Option<String>,
}

/// Webhooks and options for inbound calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    /// Application handling the call. Overrides the URLs.
    #[serde(rename = "voice_application_sid")]
    pub application_sid: Option<String>,
    /// Primary webhook method.
    #[serde(rename = "voice_method")]
    pub primary_http_method: Option<String>,
    /// Primary webhook URL.
    #[serde(rename = "voice_url")]
    pub primary_url: Option<String>,
    /// Fallback webhook method.
    #[serde(rename = "voice_fallback_method")]
    pub fallback_http_method: Option<String>,
    /// Fallback webhook URL.
    #[serde(rename = "voice_fallback_url")]
    pub fallback_url: Option<String>,
    /// Caller name lookup on inbound calls.
    #[serde(rename = "voice_caller_id_lookup")]
    pub caller_id_enabled: Option<bool>,
    /// `voice` or `fax`.
    #[serde(rename = "voice_receive_mode")]
    pub receive_mode: Option<String>,
}

/// Webhook invoked on status changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatusCallback {
    /// Callback URL.
    #[serde(rename = "status_callback")]
    pub url: Option<String>,
    /// Callback method.
    #[serde(rename = "status_callback_method")]
    pub http_method: Option<String>,
}

/// Emergency calling registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Emergency {
    /// `Active` or `Inactive`.
    #[serde(rename = "emergency_status")]
    pub status: Option<String>,
    /// Validated address used for emergency calls.
    #[serde(rename = "emergency_address_sid")]
    pub address_sid: Option<String>,
}

tagged! {
    PhoneNumber {
        sid => [terraform = "id"],
        sid_attribute(|p: &PhoneNumber| p.sid.clone()) => [terraform = "sid"],
        phone_number => [terraform = "number"],
        friendly_name => [terraform = "friendly_name"],
        date_created => [terraform = "date_created"],
        date_updated => [terraform = "date_updated"],
        address_requirements => [terraform = "address_requirements"],
        beta => [terraform = "is_beta"],
        is_mms_capable(|p: &PhoneNumber| p.capabilities.mms) => [terraform = "is_mms_capable"],
        is_sms_capable(|p: &PhoneNumber| p.capabilities.sms) => [terraform = "is_sms_capable"],
        is_voice_capable(|p: &PhoneNumber| p.capabilities.voice) => [terraform = "is_voice_capable"],
        address_sid => [terraform = "address_sid"],
        identity_sid => [terraform = "identity_sid"],
        trunk_sid => [terraform = "trunk_sid"],
        sms => [terraform = "sms"],
        voice => [terraform = "voice"],
        status_callback => [terraform = "status_callback"],
        emergency => [terraform = "emergency"],
    }
}

tagged! {
    SmsSettings {
        application_sid => [terraform = "application_sid", form = "SmsApplicationSid"],
        primary_http_method => [terraform = "primary_http_method", form = "SmsMethod"],
        primary_url => [terraform = "primary_url", form = "SmsUrl"],
        fallback_http_method => [terraform = "fallback_http_method", form = "SmsFallbackMethod"],
        fallback_url => [terraform = "fallback_url", form = "SmsFallbackUrl"],
    }
}

tagged! {
    VoiceSettings {
        application_sid => [terraform = "application_sid", form = "VoiceApplicationSid"],
        primary_http_method => [terraform = "primary_http_method", form = "VoiceMethod"],
        primary_url => [terraform = "primary_url", form = "VoiceUrl"],
        fallback_http_method => [terraform = "fallback_http_method", form = "VoiceFallbackMethod"],
        fallback_url => [terraform = "fallback_url", form = "VoiceFallbackUrl"],
        caller_id_enabled => [terraform = "caller_id_enabled", form = "VoiceCallerIdLookup"],
        receive_mode => [terraform = "receive_mode", form = "VoiceReceiveMode"],
    }
}

tagged! {
    StatusCallback {
        url => [terraform = "url", form = "StatusCallback"],
        http_method => [terraform = "http_method", form = "StatusCallbackMethod"],
    }
}

tagged! {
    Emergency {
        status => [terraform = "status", form = "EmergencyStatus"],
        address_sid => [terraform = "address_sid", form = "EmergencyAddressSid"],
    }
}

impl ApiRecord for PhoneNumber {}

impl SmsSettings {
    fn from_block(block: &Fields) -> Self {
        Self {
            application_sid: block_string(block, "application_sid"),
            primary_http_method: block_string(block, "primary_http_method"),
            primary_url: block_string(block, "primary_url"),
            fallback_http_method: block_string(block, "fallback_http_method"),
            fallback_url: block_string(block, "fallback_url"),
        }
    }
}

impl VoiceSettings {
    fn from_block(block: &Fields) -> Self {
        Self {
            application_sid: block_string(block, "application_sid"),
            primary_http_method: block_string(block, "primary_http_method"),
            primary_url: block_string(block, "primary_url"),
            fallback_http_method: block_string(block, "fallback_http_method"),
            fallback_url: block_string(block, "fallback_url"),
            caller_id_enabled: block_bool(block, "caller_id_enabled"),
            receive_mode: block_string(block, "receive_mode"),
        }
    }
}

impl StatusCallback {
    fn from_block(block: &Fields) -> Self {
        Self {
            url: block_string(block, "url"),
            http_method: block_string(block, "http_method"),
        }
    }
}

impl Emergency {
    fn from_block(block: &Fields) -> Self {
        Self {
            status: block_string(block, "status"),
            address_sid: block_string(block, "address_sid"),
        }
    }
}

/// Parameters for purchasing or updating a number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneNumberRequest {
    /// Human-readable name.
    pub friendly_name: Option<String>,
    /// Address registered for the number.
    pub address_sid: Option<String>,
    /// SIP trunk handling calls.
    pub trunk_sid: Option<String>,
    /// Identity registered for the number.
    pub identity_sid: Option<String>,
    /// Inbound SMS handling.
    pub sms: Option<SmsSettings>,
    /// Inbound call handling.
    pub voice: Option<VoiceSettings>,
    /// Status change notifications.
    pub status_callback: Option<StatusCallback>,
    /// Emergency calling registration.
    pub emergency: Option<Emergency>,
}

tagged! {
    PhoneNumberRequest {
        friendly_name => [form = "FriendlyName"],
        address_sid => [form = "AddressSid"],
        trunk_sid => [form = "TrunkSid"],
        identity_sid => [form = "IdentitySid"],
        sms => [form = "sms"],
        voice => [form = "voice"],
        status_callback => [form = "status_callback"],
        emergency => [form = "emergency"],
    }
}

impl FromResourceData for PhoneNumberRequest {
    fn from_resource_data(data: &dyn ResourceData) -> Self {
        Self {
            friendly_name: string_attr(data, "friendly_name"),
            address_sid: string_attr(data, "address_sid"),
            trunk_sid: string_attr(data, "trunk_sid"),
            identity_sid: string_attr(data, "identity_sid"),
            sms: first_block(data, "sms").as_ref().map(SmsSettings::from_block),
            voice: first_block(data, "voice").as_ref().map(VoiceSettings::from_block),
            status_callback: first_block(data, "status_callback").as_ref().map(StatusCallback::from_block),
            emergency: first_block(data, "emergency").as_ref().map(Emergency::from_block),
        }
    }
}

crate::declare_resource!(
    PhoneNumberResource,
    type_name: "twilio_phone_number",
    description: "A phone number purchased on the account.",
    record: PhoneNumber,
    request: PhoneNumberRequest,
    schema: schema,
);

/// Turns a partial number into a `Contains` search pattern.
///
/// A pattern without a `*` wildcard is matched at the start of the number.
#[must_use]
pub fn search_pattern(search: &str) -> String {
    if search.contains('*') {
        search.to_owned()
    } else {
        format!("{search}*")
    }
}

/// Strips spaces and dashes from a formatted number, e.g. `+1 415-555-0100`.
#[must_use]
pub fn to_e164(number: &str) -> String {
    NUMBER_PUNCTUATION.replace_all(number, "").into_owned()
}

/// Builds the `AvailablePhoneNumbers` search parameters.
///
/// Empty inputs are omitted.
#[must_use]
pub fn search_params(area_code: &str, search: &str) -> FormParams {
    let mut params = FormParams::new();
    if !area_code.is_empty() {
        params.set("AreaCode", area_code);
    }
    if !search.is_empty() {
        params.set("Contains", &search_pattern(search));
    }
    params
}

/// Builds the purchase parameters for `number` from planned state.
pub fn purchase_params(data: &dyn ResourceData, number: &str) -> Result<FormParams, ResourceError> {
    let mut params = crate::resource::form_from_state::<PhoneNumberRequest>("twilio_phone_number", data)?;
    params.set("PhoneNumber", &to_e164(number));
    Ok(params)
}

fn sms_block() -> Schema {
    Schema::new()
        .with_attribute(
            "application_sid",
            Attribute::optional(ValueType::String)
                .with_description("SID of the Twilio application to invoke when an SMS is sent to this number."),
        )
        .with_attribute(
            "primary_http_method",
            Attribute::optional(ValueType::String)
                .with_description("The HTTP method for the primary URL. Can be `GET` or `POST`, defaults to `POST`."),
        )
        .with_attribute(
            "primary_url",
            Attribute::optional(ValueType::String).with_description("The URL called when an SMS is sent to this number."),
        )
        .with_attribute(
            "fallback_http_method",
            Attribute::optional(ValueType::String)
                .with_description("The HTTP method for the fallback URL. Can be `GET` or `POST`, defaults to `POST`."),
        )
        .with_attribute(
            "fallback_url",
            Attribute::optional(ValueType::String)
                .with_description("The URL called if the primary URL returns an error status."),
        )
}

fn voice_block() -> Schema {
    Schema::new()
        .with_attribute(
            "application_sid",
            Attribute::optional(ValueType::String)
                .with_description("SID of the Twilio application to invoke when a call is placed to this number."),
        )
        .with_attribute(
            "primary_http_method",
            Attribute::optional(ValueType::String)
                .with_description("The HTTP method for the primary URL. Can be `GET` or `POST`, defaults to `POST`."),
        )
        .with_attribute(
            "primary_url",
            Attribute::optional(ValueType::String).with_description("The URL called when a call starts on this number."),
        )
        .with_attribute(
            "fallback_http_method",
            Attribute::optional(ValueType::String)
                .with_description("The HTTP method for the fallback URL. Can be `GET` or `POST`, defaults to `POST`."),
        )
        .with_attribute(
            "fallback_url",
            Attribute::optional(ValueType::String)
                .with_description("The URL called if the primary URL returns an error status."),
        )
        .with_attribute(
            "caller_id_enabled",
            Attribute::optional(ValueType::Bool)
                .with_description("Whether caller name lookup runs on inbound calls. Billed per call."),
        )
        .with_attribute(
            "receive_mode",
            Attribute::optional(ValueType::String)
                .with_description("Whether the line receives `voice` or `fax`, defaults to `voice`."),
        )
}

fn status_callback_block() -> Schema {
    Schema::new()
        .with_attribute(
            "url",
            Attribute::optional(ValueType::String).with_description("The URL called whenever the number's status changes."),
        )
        .with_attribute(
            "http_method",
            Attribute::optional(ValueType::String)
                .with_description("The HTTP method for the status callback URL. Can be `GET` or `POST`."),
        )
}

fn emergency_block() -> Schema {
    Schema::new()
        .with_attribute(
            "status",
            Attribute::optional(ValueType::String).with_description("Emergency calling status, `active` or `inactive`."),
        )
        .with_attribute(
            "address_sid",
            Attribute::optional(ValueType::String)
                .with_description("SID of the validated address used for emergency calls from this number."),
        )
}

/// Terraform schema of `twilio_phone_number`.
#[must_use]
pub fn schema() -> Schema {
    let computed = |ty, description| Attribute::computed(ty).with_description(description);
    let optional = |ty, description| Attribute::optional(ty).with_description(description);

    Schema::new()
        .with_attribute("sid", computed(ValueType::String, "The unique identifier for this phone number."))
        .with_attribute(
            "search",
            optional(ValueType::String, "Look for this number sequence anywhere in the phone number."),
        )
        .with_attribute("area_code", optional(ValueType::String, "Look for a number within this area code."))
        .with_attribute(
            "country_code",
            Attribute::required(ValueType::String)
                .with_description("Two letter ISO country code in which to search for a number."),
        )
        .with_attribute(
            "number",
            computed(ValueType::String, "The full phone number, including country and area code."),
        )
        .with_attribute(
            "friendly_name",
            optional(ValueType::String, "A human-readable name by which you can refer to this number."),
        )
        .with_attribute("date_created", computed(ValueType::String, "When the phone number was created."))
        .with_attribute("date_updated", computed(ValueType::String, "When the phone number was last updated."))
        .with_attribute(
            "address_requirements",
            computed(ValueType::String, "Address requirements imposed on this number, if any."),
        )
        .with_attribute("is_beta", computed(ValueType::Bool, "Whether this phone number is new to Twilio."))
        .with_attribute("is_mms_capable", computed(ValueType::Bool, "Whether this phone number can receive MMS."))
        .with_attribute("is_sms_capable", computed(ValueType::Bool, "Whether this phone number can receive SMS."))
        .with_attribute(
            "is_voice_capable",
            computed(ValueType::Bool, "Whether this phone number can receive calls."),
        )
        .with_attribute("sms", Attribute::single_block(sms_block()))
        .with_attribute("voice", Attribute::single_block(voice_block()).also_computed())
        .with_attribute("status_callback", Attribute::single_block(status_callback_block()))
        .with_attribute(
            "address_sid",
            optional(ValueType::String, "SID of the address associated with this phone number."),
        )
        .with_attribute(
            "trunk_sid",
            optional(ValueType::String, "SID of the SIP trunk that handles calls to this number."),
        )
        .with_attribute(
            "identity_sid",
            optional(ValueType::String, "SID of the identity associated with this phone number."),
        )
        .with_attribute("emergency", Attribute::single_block(emergency_block()))
}
