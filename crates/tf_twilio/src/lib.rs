//! Twilio resources for the Terraform provider.
//!
//! Each resource pairs a serde model of the Twilio API response with a
//! [`tagged!`](tf_mapper::tagged) descriptor table, so one call copies a
//! response into Terraform state and another builds the request parameters
//! back out of it.
//!
//! # Main Types
//!
//! - [`Provider`] - Provider block schema and resource registry
//! - [`ProviderConfig`] - Account credentials and API endpoint
//! - [`ResourceRegistry`] - Resources keyed by Terraform type name
//! - [`Resource`] - Decoding, state mapping and request building for one type
//!
//! # Error Handling
//!
//! - [`ConfigError`] - Configuration loading and validation failures
//! - [`ResourceError`] - Response decoding and state mapping failures
//! - [`ProviderError`] - Top-level error enum combining the above

/// Provider configuration from TOML, environment or the provider block.
pub mod config;
/// Twilio date parsing.
pub mod dates;
/// Top-level error type.
pub mod error;
/// Stderr logging setup.
#[cfg(feature = "tracing")]
pub mod logging;
/// The provider and its configured context.
pub mod provider;
/// Resources keyed by type name.
pub mod registry;
/// The resource trait and shared state mapping.
pub mod resource;
pub mod resources;

pub use config::{ConfigError, DEFAULT_ENDPOINT, ProviderConfig};
pub use dates::Timestamp;
pub use error::ProviderError;
pub use provider::{Provider, ProviderContext};
pub use registry::ResourceRegistry;
pub use resource::{ApiRecord, FromResourceData, Resource, ResourceError};
