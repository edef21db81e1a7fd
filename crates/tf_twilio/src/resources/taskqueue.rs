//! TaskRouter task queues.

use serde::Deserialize;
use tf_mapper::{Attribute, ResourceData, Schema, ValueType, tagged};

use crate::dates::Timestamp;
use crate::resource::{ApiRecord, FromResourceData, string_attr};

/// A task queue as returned by `Workspaces/{sid}/TaskQueues`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskQueue {
    /// Task queue SID, `WQ...`.
    pub sid: String,
    /// Owning workspace.
    pub workspace_sid: String,
    /// Human-readable name.
    #[serde(default)]
    pub friendly_name: Option<String>,
    /// Expression selecting the workers that serve the queue.
    #[serde(default)]
    pub target_workers: Option<String>,
    /// `FIFO` or `LIFO`.
    #[serde(default)]
    pub task_order: Option<String>,
    /// Absolute URL of the queue.
    #[serde(default)]
    pub url: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub date_created: Option<Timestamp>,
    /// Last update time.
    #[serde(default)]
    pub date_updated: Option<Timestamp>,
}

tagged! {
    TaskQueue {
        sid => [terraform = "id"],
        sid_attribute(|q: &TaskQueue| q.sid.clone()) => [terraform = "sid"],
        workspace_sid => [terraform = "workspace_sid"],
        friendly_name => [terraform = "friendly_name"],
        target_workers => [terraform = "target_workers"],
        task_order => [terraform = "task_order"],
        url => [terraform = "url"],
        date_created => [terraform = "date_created"],
        date_updated => [terraform = "date_updated"],
    }
}

impl ApiRecord for TaskQueue {}

/// Parameters for creating or updating a task queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQueueRequest {
    /// Human-readable name.
    pub friendly_name: Option<String>,
    /// Worker selection expression.
    pub target_workers: Option<String>,
    /// `FIFO` or `LIFO`.
    pub task_order: Option<String>,
}

tagged! {
    TaskQueueRequest {
        friendly_name => [form = "FriendlyName"],
        target_workers => [form = "TargetWorkers"],
        task_order => [form = "TaskOrder"],
    }
}

impl FromResourceData for TaskQueueRequest {
    fn from_resource_data(data: &dyn ResourceData) -> Self {
        Self {
            friendly_name: string_attr(data, "friendly_name"),
            target_workers: string_attr(data, "target_workers"),
            task_order: string_attr(data, "task_order"),
        }
    }
}

crate::declare_resource!(
    TaskQueueResource,
    type_name: "twilio_taskqueue",
    description: "A TaskRouter queue holding tasks until a worker accepts them.",
    record: TaskQueue,
    request: TaskQueueRequest,
    schema: schema,
);

/// Terraform schema of `twilio_taskqueue`.
#[must_use]
pub fn schema() -> Schema {
    Schema::new()
        .with_attribute("sid", Attribute::computed(ValueType::String))
        .with_attribute(
            "workspace_sid",
            Attribute::required(ValueType::String).with_description("SID of the workspace the queue belongs to."),
        )
        .with_attribute("friendly_name", Attribute::optional(ValueType::String))
        .with_attribute(
            "target_workers",
            Attribute::optional(ValueType::String)
                .also_computed()
                .with_description("Expression selecting the workers eligible for tasks in this queue."),
        )
        .with_attribute(
            "task_order",
            Attribute::optional(ValueType::String)
                .also_computed()
                .with_description("Order in which tasks are assigned, `FIFO` or `LIFO`."),
        )
        .with_attribute("url", Attribute::computed(ValueType::String))
        .with_attribute("date_created", Attribute::computed(ValueType::String))
        .with_attribute("date_updated", Attribute::computed(ValueType::String))
}

#[cfg(test)]
mod tests {
    use tf_mapper::{MemoryResourceData, Value};

    use super::*;
    use crate::resource::Resource;

    const QUEUE: &str = r#"{
        "sid": "WQaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
        "workspace_sid": "WSaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
        "friendly_name": "English",
        "target_workers": "languages HAS \"english\"",
        "task_order": "FIFO",
        "url": "https://taskrouter.twilio.com/v1/Workspaces/WSaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa/TaskQueues/WQaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
        "date_created": "2015-08-04T01:31:41Z",
        "date_updated": "2015-08-04T01:31:41Z"
    }"#;

    #[test]
    fn queue_response_fills_state() {
        let schema = schema();
        let mut data = MemoryResourceData::new(&schema);

        TaskQueueResource.apply_response(QUEUE, &mut data, &schema).unwrap();

        assert_eq!(data.id(), "WQaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        assert_eq!(data.get("task_order"), Some(Value::from("FIFO")));
        assert_eq!(data.get("target_workers"), Some(Value::from("languages HAS \"english\"")));
    }

    #[test]
    fn queue_params_carry_routing_settings() {
        let schema = schema();
        let mut data = MemoryResourceData::new(&schema);
        data.set("friendly_name", Value::from("English")).unwrap();
        data.set("task_order", Value::from("LIFO")).unwrap();

        let params = TaskQueueResource.create_params(&data).unwrap();
        assert_eq!(params.get("TaskOrder"), Some("LIFO"));
        assert_eq!(params.get("TargetWorkers"), None);
    }
}
