//! Diagnostic logging for the provider process.
//!
//! Terraform reads a plugin's stdout for the handshake, so log lines go to
//! stderr only.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable holding the log filter, e.g. `tf_mapper=trace,info`.
pub const LOG_ENV_VAR: &str = "TWILIO_PROVIDER_LOG";

/// Filter used when [`LOG_ENV_VAR`] is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Builds the log filter from [`LOG_ENV_VAR`].
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global stderr subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn try_init_logging() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(env_filter())
        .try_init()
}
