//! TaskRouter workers.
//!
//! Workers live inside a workspace, so `workspace_sid` is required and forms
//! part of the API path rather than the request body.

use serde::Deserialize;
use tf_mapper::{Attribute, ResourceData, Schema, ValueType, tagged};

use crate::dates::Timestamp;
use crate::resource::{ApiRecord, FromResourceData, string_attr};

/// A worker as returned by `Workspaces/{sid}/Workers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Worker {
    /// Worker SID, `WK...`.
    pub sid: String,
    /// Owning workspace.
    pub workspace_sid: String,
    /// Human-readable name.
    #[serde(default)]
    pub friendly_name: Option<String>,
    /// JSON attributes used for task routing.
    #[serde(default)]
    pub attributes: Option<String>,
    /// Name of the worker's current activity.
    #[serde(default)]
    pub activity_name: Option<String>,
    /// Whether the worker can accept tasks.
    #[serde(default)]
    pub available: bool,
    /// Creation time.
    #[serde(default)]
    pub date_created: Option<Timestamp>,
    /// Last update time.
    #[serde(default)]
    pub date_updated: Option<Timestamp>,
}

tagged! {
    Worker {
        sid => [terraform = "id"],
        sid_attribute(|w: &Worker| w.sid.clone()) => [terraform = "sid"],
        workspace_sid => [terraform = "workspace_sid"],
        friendly_name => [terraform = "friendly_name"],
        attributes => [terraform = "attributes"],
        activity_name => [terraform = "activity_name"],
        available => [terraform = "available"],
        date_created => [terraform = "date_created"],
        date_updated => [terraform = "date_updated"],
    }
}

impl ApiRecord for Worker {}

/// Parameters for creating or updating a worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerRequest {
    /// Human-readable name.
    pub friendly_name: Option<String>,
    /// JSON routing attributes.
    pub attributes: Option<String>,
}

tagged! {
    WorkerRequest {
        friendly_name => [form = "FriendlyName"],
        attributes => [form = "Attributes"],
    }
}

impl FromResourceData for WorkerRequest {
    fn from_resource_data(data: &dyn ResourceData) -> Self {
        Self {
            friendly_name: string_attr(data, "friendly_name"),
            attributes: string_attr(data, "attributes"),
        }
    }
}

crate::declare_resource!(
    WorkerResource,
    type_name: "twilio_worker",
    description: "A TaskRouter worker that accepts tasks.",
    record: Worker,
    request: WorkerRequest,
    schema: schema,
);

/// Terraform schema of `twilio_worker`.
#[must_use]
pub fn schema() -> Schema {
    Schema::new()
        .with_attribute("sid", Attribute::computed(ValueType::String))
        .with_attribute(
            "workspace_sid",
            Attribute::required(ValueType::String).with_description("SID of the workspace the worker belongs to."),
        )
        .with_attribute("friendly_name", Attribute::optional(ValueType::String))
        .with_attribute(
            "attributes",
            Attribute::optional(ValueType::String)
                .also_computed()
                .with_description("JSON object describing the worker for task routing."),
        )
        .with_attribute("activity_name", Attribute::computed(ValueType::String))
        .with_attribute("available", Attribute::computed(ValueType::Bool))
        .with_attribute("date_created", Attribute::computed(ValueType::String))
        .with_attribute("date_updated", Attribute::computed(ValueType::String))
}
