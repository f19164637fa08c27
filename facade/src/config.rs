//! Provider settings loaded via OrthoConfig.
//!
//! Values come from `IDP_*` environment variables, configuration files and
//! command-line flags, following OrthoConfig's layering rules.

use std::fmt;
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::domain::ErrorPolicy;
use crate::outbound::user_pool::{StaticCredentials, regional_endpoint};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Failures raised while turning settings into clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// A value required by the requested client is absent.
    #[error("missing required setting `{field}`")]
    Missing {
        /// Setting name, for example `user_pool_id`.
        field: &'static str,
    },
    /// The endpoint override is not a valid URL.
    #[error("invalid endpoint `{value}`: {message}")]
    InvalidEndpoint {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    Client {
        /// Underlying error message.
        message: String,
    },
}

/// Connection settings for the identity provider.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "IDP")]
pub struct ProviderSettings {
    /// Provider region, for example `eu-west-1`.
    pub region: Option<String>,
    /// User-pool identifier.
    pub user_pool_id: Option<String>,
    /// Application client identifier.
    pub client_id: Option<String>,
    /// Access key for privileged operations.
    pub access_key_id: Option<String>,
    /// Secret key for privileged operations. Read from files or the
    /// environment only, never from command-line flags.
    #[ortho_config(skip_cli)]
    pub secret_access_key: Option<Zeroizing<String>>,
    /// Endpoint override; the regional endpoint is used when absent.
    pub endpoint: Option<String>,
    /// Request timeout in seconds.
    #[ortho_config(default = 30)]
    pub timeout_seconds: u64,
    /// Wrap provider failures with the facade operation name.
    #[ortho_config(default = true)]
    pub wrap_errors: bool,
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("region", &self.region)
            .field("user_pool_id", &self.user_pool_id)
            .field("client_id", &self.client_id)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("endpoint", &self.endpoint)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("wrap_errors", &self.wrap_errors)
            .finish()
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            region: None,
            user_pool_id: None,
            client_id: None,
            access_key_id: None,
            secret_access_key: None,
            endpoint: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            wrap_errors: true,
        }
    }
}

fn require<'a>(value: Option<&'a String>, field: &'static str) -> Result<&'a str, SettingsError> {
    value
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
        .ok_or(SettingsError::Missing { field })
}

impl ProviderSettings {
    /// Configured region.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when no region is set.
    pub fn region(&self) -> Result<&str, SettingsError> {
        require(self.region.as_ref(), "region")
    }

    /// Configured pool identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when no pool is set.
    pub fn user_pool_id(&self) -> Result<&str, SettingsError> {
        require(self.user_pool_id.as_ref(), "user_pool_id")
    }

    /// Configured application client identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when no client is set.
    pub fn client_id(&self) -> Result<&str, SettingsError> {
        require(self.client_id.as_ref(), "client_id")
    }

    /// Endpoint override, or the regional endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the region is missing or the endpoint is not a
    /// valid URL.
    pub fn endpoint(&self) -> Result<Url, SettingsError> {
        match self.endpoint.as_deref().filter(|raw| !raw.trim().is_empty()) {
            Some(raw) => Url::parse(raw).map_err(|error| SettingsError::InvalidEndpoint {
                value: raw.to_owned(),
                message: error.to_string(),
            }),
            None => {
                let region = self.region()?;
                regional_endpoint(region).map_err(|error| SettingsError::InvalidEndpoint {
                    value: region.to_owned(),
                    message: error.to_string(),
                })
            }
        }
    }

    /// Request timeout, never below one second.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(1))
    }

    /// Error policy selected by `wrap_errors`.
    pub fn error_policy(&self) -> ErrorPolicy {
        ErrorPolicy::from_wrap_flag(self.wrap_errors)
    }

    /// Static credentials for privileged operations.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] naming the first absent half of
    /// the key pair.
    pub fn credentials(&self) -> Result<StaticCredentials, SettingsError> {
        let access_key_id = require(self.access_key_id.as_ref(), "access_key_id")?;
        let secret = require(self.secret_access_key.as_deref(), "secret_access_key")?;
        Ok(StaticCredentials::new(
            access_key_id,
            Zeroizing::new(secret.to_owned()),
        ))
    }
}
