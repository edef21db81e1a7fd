//! Builtin Twilio resources.

/// TwiML applications.
pub mod application;
/// API keys.
pub mod key;
/// Incoming phone numbers.
pub mod phone_number;
/// Subaccounts.
pub mod subaccount;
/// TaskRouter task queues.
pub mod taskqueue;
/// TaskRouter workers.
pub mod worker;

use crate::resource::Resource;

/// Returns all builtin resources, one per Terraform resource type.
#[must_use]
pub fn builtin_resources() -> Vec<&'static dyn Resource> {
    vec![
        &phone_number::PhoneNumberResource,
        &application::ApplicationResource,
        &key::KeyResource,
        &subaccount::SubaccountResource,
        &worker::WorkerResource,
        &taskqueue::TaskQueueResource,
    ]
}
