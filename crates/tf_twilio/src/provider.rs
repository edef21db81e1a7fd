//! The provider: its configuration block and configured context.

use tf_mapper::{Attribute, ResourceData, Schema, ValueType};
#[cfg(feature = "tracing")]
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::registry::ResourceRegistry;

/// Path prefix of the 2010-04-01 REST API.
pub const API_VERSION_PATH: &str = "2010-04-01";

/// The Twilio provider: its configuration schema and resources.
#[derive(Debug)]
pub struct Provider {
    schema: Schema,
    registry: ResourceRegistry,
}

impl Provider {
    /// Builds the provider schema and the builtin resource registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema: provider_schema(),
            registry: ResourceRegistry::builtin(),
        }
    }

    /// Returns the schema of the `provider "twilio"` block.
    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the registered resources.
    #[must_use]
    pub const fn resources(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Validates the provider schema and every resource schema.
    pub fn validate(&self) -> Result<(), ProviderError> {
        self.schema.validate()?;
        for type_name in self.registry.type_names() {
            if let Some(schema) = self.registry.schema(type_name) {
                schema.validate()?;
            }
        }
        Ok(())
    }

    /// Reads and validates the provider block.
    pub fn configure(&self, data: &dyn ResourceData) -> Result<ProviderContext, ProviderError> {
        let config = ProviderConfig::from_resource_data(data)?;
        config.validate()?;

        #[cfg(feature = "tracing")]
        debug!(account_sid = %config.account_sid, endpoint = config.base_url(), "configured Twilio provider");

        Ok(ProviderContext::new(config))
    }

    /// Reads and validates configuration from the `TWILIO_*` environment variables.
    pub fn configure_from_env(&self) -> Result<ProviderContext, ProviderError> {
        let config = ProviderConfig::from_env()?;
        config.validate()?;

        #[cfg(feature = "tracing")]
        info!(account_sid = %config.account_sid, "configured Twilio provider from environment");

        Ok(ProviderContext::new(config))
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self::new()
    }
}

/// Validated configuration shared by every resource operation.
#[derive(Debug, Clone)]
pub struct ProviderContext {
    config: ProviderConfig,
}

impl ProviderContext {
    /// Wraps an already validated configuration.
    #[must_use]
    pub const fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Returns the account SID.
    #[must_use]
    pub fn account_sid(&self) -> &str {
        &self.config.account_sid
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Returns the URL of the account's 2010-04-01 resources, e.g.
    /// `https://api.twilio.com/2010-04-01/Accounts/AC...`.
    #[must_use]
    pub fn account_url(&self) -> String {
        format!("{}/{API_VERSION_PATH}/Accounts/{}", self.base_url(), self.account_sid())
    }
}

fn provider_schema() -> Schema {
    Schema::new()
        .with_attribute(
            "account_sid",
            Attribute::required(ValueType::String).with_description(
                "The unique ID that identifies your Twilio account. Starts with `AC` and can be found on the \
                 Settings -> General page.",
            ),
        )
        .with_attribute(
            "auth_token",
            Attribute::required(ValueType::String)
                .sensitive()
                .with_description("Your secret token to access your Twilio account. Do not check this into source control."),
        )
        .with_attribute(
            "endpoint",
            Attribute::optional(ValueType::String)
                .with_default("")
                .with_description("Alternative Twilio API endpoint. Leave blank to use the public API."),
        )
}

#[cfg(test)]
mod tests {
    use tf_mapper::{MemoryResourceData, Value};

    use super::*;
    use crate::config::{ConfigError, DEFAULT_ENDPOINT};

    const SID: &str = "AC0123456789abcdef0123456789abcdef";

    fn provider_block<'s>(schema: &'s Schema, sid: &str, token: &str, endpoint: &str) -> MemoryResourceData<'s> {
        let mut data = MemoryResourceData::new(schema);
        data.set("account_sid", Value::from(sid)).unwrap();
        data.set("auth_token", Value::from(token)).unwrap();
        data.set("endpoint", Value::from(endpoint)).unwrap();
        data
    }

    #[test]
    fn schemas_are_valid() {
        Provider::new().validate().unwrap();
    }

    #[test]
    fn auth_token_is_required_and_sensitive() {
        let provider = Provider::new();
        let token = provider.schema().get("auth_token").unwrap();
        assert!(token.required);
        assert!(token.sensitive);
    }

    #[test]
    fn endpoint_defaults_to_empty() {
        let provider = Provider::new();
        let data = MemoryResourceData::new(provider.schema());
        assert_eq!(data.get("endpoint"), Some(Value::from("")));
    }

    #[test]
    fn configure_uses_default_endpoint() {
        let provider = Provider::new();
        let data = provider_block(provider.schema(), SID, "secret", "");

        let context = provider.configure(&data).unwrap();

        assert_eq!(context.account_sid(), SID);
        assert_eq!(context.base_url(), DEFAULT_ENDPOINT);
        assert_eq!(context.account_url(), format!("https://api.twilio.com/2010-04-01/Accounts/{SID}"));
    }

    #[test]
    fn configure_honours_endpoint_override() {
        let provider = Provider::new();
        let data = provider_block(provider.schema(), SID, "secret", "http://localhost:4010/");

        let context = provider.configure(&data).unwrap();
        assert_eq!(context.base_url(), "http://localhost:4010");
    }

    #[test]
    fn configure_rejects_invalid_sid() {
        let provider = Provider::new();
        let data = provider_block(provider.schema(), "ACnope", "secret", "");

        let err = provider.configure(&data).unwrap_err();
        assert!(matches!(err, ProviderError::Config(ConfigError::Invalid { key: "account_sid", .. })));
    }

    #[test]
    fn configure_rejects_missing_token() {
        let provider = Provider::new();
        let data = provider_block(provider.schema(), SID, "", "");

        let err = provider.configure(&data).unwrap_err();
        assert!(matches!(err, ProviderError::Config(ConfigError::Missing { key: "auth_token" })));
    }
}
