//! Client configuration: base URL selection, timeout, environment.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use spm_model::{Result, SpmError};

/// Backend used during development.
pub const DEV_BASE_URL: &str = "http://localhost:8000";

/// Backend used in production.
pub const PROD_BASE_URL: &str = "https://api.smartpaymap.com";

/// Transport timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable that overrides the base URL.
pub const BASE_URL_ENV: &str = "SMARTPAYMAP_API_BASE_URL";

/// Environment variable selecting `development` or `production`.
pub const ENVIRONMENT_ENV: &str = "SMARTPAYMAP_ENV";

/// Deployment environment, which picks the default base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub const fn default_base_url(&self) -> &'static str {
        match self {
            Self::Development => DEV_BASE_URL,
            Self::Production => PROD_BASE_URL,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Environment {
    type Err = SpmError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Development),
            "prod" | "production" => Ok(Self::Production),
            other => Err(SpmError::Config(format!(
                "unknown environment '{other}' (expected development or production)"
            ))),
        }
    }
}

/// One layer of optional settings (CLI flags or the settings file).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Resolved transport configuration shared by every call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub environment: Environment,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl ClientConfig {
    /// Default configuration for `environment`.
    #[must_use]
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            base_url: environment.default_base_url().to_string(),
            timeout: DEFAULT_TIMEOUT,
            environment,
        }
    }

    /// Resolves the configuration from its layers.
    ///
    /// Precedence: `flags`, then environment variables read through `env`,
    /// then `file`, then the environment defaults.
    pub fn resolve<F>(flags: &ClientSettings, env: F, file: &ClientSettings) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_environment = env(ENVIRONMENT_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.parse::<Environment>())
            .transpose()?;
        let environment = flags
            .environment
            .or(env_environment)
            .or(file.environment)
            .unwrap_or_default();

        let base_url = flags
            .base_url
            .clone()
            .or_else(|| env(BASE_URL_ENV).filter(|value| !value.trim().is_empty()))
            .or_else(|| file.base_url.clone())
            .unwrap_or_else(|| environment.default_base_url().to_string());

        let timeout = flags
            .timeout_secs
            .or(file.timeout_secs)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        let config = Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the base URL is absolute HTTP(S) and the timeout non-zero.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(SpmError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(SpmError::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}
