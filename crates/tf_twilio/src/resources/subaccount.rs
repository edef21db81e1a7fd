//! Subaccounts owned by the configured account.
//!
//! Twilio accounts cannot be deleted through the API. Destroying a subaccount
//! closes it instead.

use serde::Deserialize;
use tf_mapper::{Attribute, FormParams, ResourceData, Schema, ValueType, tagged};

use crate::dates::Timestamp;
use crate::resource::{ApiRecord, FromResourceData, string_attr};

/// Status of an open subaccount.
pub const STATUS_ACTIVE: &str = "active";
/// Status of a closed subaccount.
pub const STATUS_CLOSED: &str = "closed";

/// An account as returned by `Accounts.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Subaccount {
    /// Account SID, `AC...`.
    pub sid: String,
    /// SID of the parent account.
    #[serde(default)]
    pub owner_account_sid: Option<String>,
    /// Human-readable name. Twilio generates one if none is given.
    #[serde(default)]
    pub friendly_name: Option<String>,
    /// `active`, `suspended` or `closed`.
    #[serde(default)]
    pub status: Option<String>,
    /// Auth token of the subaccount.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub date_created: Option<Timestamp>,
    /// Last update time.
    #[serde(default)]
    pub date_updated: Option<Timestamp>,
}

tagged! {
    Subaccount {
        sid => [terraform = "id"],
        owner_account_sid => [terraform = "parent_account_sid"],
        friendly_name => [terraform = "friendly_name"],
        status => [terraform = "status"],
        auth_token => [terraform = "auth_token"],
        date_created => [terraform = "date_created"],
        date_updated => [terraform = "date_updated"],
    }
}

impl ApiRecord for Subaccount {}

/// Parameters for creating a subaccount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubaccountRequest {
    /// Human-readable name.
    pub friendly_name: Option<String>,
}

tagged! {
    SubaccountRequest {
        friendly_name => [form = "FriendlyName"],
    }
}

impl FromResourceData for SubaccountRequest {
    fn from_resource_data(data: &dyn ResourceData) -> Self {
        Self {
            friendly_name: string_attr(data, "friendly_name"),
        }
    }
}

crate::declare_resource!(
    SubaccountResource,
    type_name: "twilio_subaccount",
    description: "A subaccount of the configured Twilio account.",
    record: Subaccount,
    request: SubaccountRequest,
    schema: schema,
);

/// Parameters that close a subaccount.
#[must_use]
pub fn close_params() -> FormParams {
    let mut params = FormParams::new();
    params.set("Status", STATUS_CLOSED);
    params
}

/// Terraform schema of `twilio_subaccount`.
#[must_use]
pub fn schema() -> Schema {
    Schema::new()
        .with_attribute("parent_account_sid", Attribute::computed(ValueType::String))
        .with_attribute("friendly_name", Attribute::optional(ValueType::String).also_computed())
        .with_attribute(
            "status",
            Attribute::optional(ValueType::String)
                .with_default(STATUS_ACTIVE)
                .with_description("`active`, `suspended` or `closed`."),
        )
        .with_attribute("auth_token", Attribute::computed(ValueType::String).sensitive())
        .with_attribute("date_created", Attribute::computed(ValueType::String))
        .with_attribute("date_updated", Attribute::computed(ValueType::String))
}
