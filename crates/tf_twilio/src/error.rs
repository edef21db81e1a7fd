use thiserror::Error;
use tf_mapper::SchemaError;

use crate::config::ConfigError;
use crate::resource::ResourceError;

/// Top-level error type for provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider configuration was missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A provider or resource schema was malformed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Moving data between the API and resource state failed.
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_display_unchanged() {
        let err = ProviderError::from(ConfigError::Missing { key: "auth_token" });
        assert_eq!(err.to_string(), "missing required setting 'auth_token'");
    }

    #[test]
    fn resource_errors_convert() {
        let err: ProviderError = ResourceError::UnknownResource {
            type_name: "twilio_fax".into(),
        }
        .into();
        assert!(matches!(err, ProviderError::Resource(_)));
        assert_eq!(err.to_string(), "unknown resource type 'twilio_fax'");
    }
}
