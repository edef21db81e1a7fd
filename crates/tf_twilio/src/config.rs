use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tf_mapper::ResourceData;
use url::Url;

/// Twilio API endpoint used when no override is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.twilio.com";

/// Environment variable holding the account SID.
pub const ACCOUNT_SID_ENV: &str = "TWILIO_ACCOUNT_SID";
/// Environment variable holding the auth token.
pub const AUTH_TOKEN_ENV: &str = "TWILIO_AUTH_TOKEN";
/// Environment variable holding an optional API endpoint override.
pub const ENDPOINT_ENV: &str = "TWILIO_API_ENDPOINT";

static ACCOUNT_SID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::unwrap_used, reason = "static regex is known-valid at compile time")]
    Regex::new(r"^AC[0-9a-fA-F]{32}$").unwrap()
});

/// Credentials and endpoint of the Twilio account the provider manages.
///
/// Read from the Terraform `provider "twilio"` block, a TOML file, or the
/// `TWILIO_*` environment variables.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Account SID, `AC` followed by 32 hex digits.
    pub account_sid: String,
    /// Account auth token.
    pub auth_token: String,
    /// Alternative API endpoint. Empty or absent means [`DEFAULT_ENDPOINT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl ProviderConfig {
    /// Creates a configuration for the default endpoint.
    #[must_use]
    pub fn new(account_sid: &str, auth_token: &str) -> Self {
        Self {
            account_sid: account_sid.to_owned(),
            auth_token: auth_token.to_owned(),
            endpoint: None,
        }
    }

    /// Overrides the API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_owned());
        self
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })
    }

    /// Reads configuration from the `TWILIO_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, keyed by environment variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing { key })
        };

        Ok(Self {
            account_sid: required(ACCOUNT_SID_ENV)?,
            auth_token: required(AUTH_TOKEN_ENV)?,
            endpoint: lookup(ENDPOINT_ENV).filter(|value| !value.is_empty()),
        })
    }

    /// Reads configuration from the provider block's resource data.
    pub fn from_resource_data(data: &dyn ResourceData) -> Result<Self, ConfigError> {
        let read = |key: &'static str| {
            data.get(key)
                .and_then(|value| value.as_str().map(str::to_owned))
                .filter(|value| !value.is_empty())
        };

        Ok(Self {
            account_sid: read("account_sid").ok_or(ConfigError::Missing { key: "account_sid" })?,
            auth_token: read("auth_token").ok_or(ConfigError::Missing { key: "auth_token" })?,
            endpoint: read("endpoint"),
        })
    }

    /// Checks the account SID format, the auth token and the endpoint URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !ACCOUNT_SID_PATTERN.is_match(&self.account_sid) {
            return Err(ConfigError::Invalid {
                key: "account_sid",
                reason: "must be 'AC' followed by 32 hex characters".into(),
            });
        }

        if self.auth_token.trim().is_empty() {
            return Err(ConfigError::Missing { key: "auth_token" });
        }

        match self.endpoint.as_deref() {
            Some(endpoint) if !endpoint.is_empty() => check_endpoint(endpoint),
            _ => Ok(()),
        }
    }

    /// Returns the API base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.endpoint
            .as_deref()
            .map(|endpoint| endpoint.trim_end_matches('/'))
            .filter(|endpoint| !endpoint.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT)
    }
}

/// Requires an absolute `http` or `https` URL with a host.
fn check_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid { key: "endpoint", reason };

    let url = Url::parse(endpoint).map_err(|err| invalid(format!("'{endpoint}' is not a valid URL: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("'{endpoint}' is not an http(s) URL")));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(format!("'{endpoint}' has no host")));
    }
    Ok(())
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Errors that can occur when reading or validating provider configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read from disk.
    #[error("failed to read config '{path}': {source}")]
    Read {
        /// Path to the config file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid TOML or unexpected values.
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        /// Path to the config file that could not be parsed.
        path: PathBuf,
        /// The underlying TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },

    /// A required setting was absent or empty.
    #[error("missing required setting '{key}'")]
    Missing {
        /// Name of the setting.
        key: &'static str,
    },

    /// A setting was present but malformed.
    #[error("invalid setting '{key}': {reason}")]
    Invalid {
        /// Name of the setting.
        key: &'static str,
        /// What is wrong with the value.
        reason: String,
    },
}

impl ConfigError {
    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => Some(path),
            Self::Missing { .. } | Self::Invalid { .. } => None,
        }
    }
}
