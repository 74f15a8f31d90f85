//! Configuration for the Bybit API client.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::Logger;

/// Environment variable holding the testnet API key.
pub const TEST_KEY_ENV: &str = "BYBIT_TEST_KEY";

/// Environment variable holding the testnet API secret.
pub const TEST_SECRET_ENV: &str = "BYBIT_TEST_SECRET";

/// Bybit REST host selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    /// Production host.
    #[default]
    Mainnet,
    /// Documented production alias.
    MainnetAlt,
    /// Test network.
    Testnet,
}

impl Network {
    /// Base URL for this network.
    pub fn base_url(self) -> &'static str {
        match self {
            Network::Mainnet => crate::MAINNET_BASE_URL,
            Network::MainnetAlt => crate::MAINNET_BASE_URL_ALT,
            Network::Testnet => crate::TESTNET_BASE_URL,
        }
    }
}

/// API key and secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    /// Create credentials from a key and secret.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// API key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// API secret.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Both halves are present.
    pub fn is_complete(&self) -> bool {
        !self.key.is_empty() && !self.secret.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Configuration for the Bybit API client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for REST requests (default: https://api.bybit.com).
    pub base_url: String,
    /// API credentials; `None` means public endpoints only.
    pub credentials: Option<Credentials>,
    /// Request timeout for the default HTTP transport.
    pub timeout: Duration,
    /// User agent for the default HTTP transport.
    pub user_agent: String,
    /// Log request and response details through `logger`.
    pub debug: bool,
    /// Logger used in debug mode.
    pub logger: Option<Arc<dyn Logger>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: crate::MAINNET_BASE_URL.to_string(),
            credentials: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("bybit-api-rust/{}", crate::VERSION),
            debug: false,
            logger: None,
        }
    }
}

impl Config {
    /// Create a new configuration with API credentials.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self::default().with_credentials(api_key, api_secret)
    }

    /// Create a configuration without credentials (public endpoints only).
    pub fn public() -> Self {
        Self::default()
    }

    /// Create a configuration for the given network.
    pub fn for_network(network: Network) -> Self {
        Self::default().with_base_url(network.base_url())
    }

    /// Testnet configuration with credentials from `BYBIT_TEST_KEY` and
    /// `BYBIT_TEST_SECRET`.
    ///
    /// # Panics
    ///
    /// Panics if either variable is unset. Intended for test harnesses only.
    pub fn testnet_from_env() -> Self {
        let key = std::env::var(TEST_KEY_ENV)
            .unwrap_or_else(|_| panic!("need {TEST_KEY_ENV} as environment variable"));
        let secret = std::env::var(TEST_SECRET_ENV)
            .unwrap_or_else(|_| panic!("need {TEST_SECRET_ENV} as environment variable"));

        Self::for_network(Network::Testnet).with_credentials(key, secret)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API credentials.
    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(api_key, api_secret));
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable debug mode with the given logger.
    pub fn with_debug(mut self, logger: Arc<dyn Logger>) -> Self {
        self.debug = true;
        self.logger = Some(logger);
        self
    }

    /// Toggle debug mode without changing the logger.
    pub fn with_debug_mode(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Check if complete credentials are configured.
    pub fn has_credentials(&self) -> bool {
        self.credentials.as_ref().is_some_and(Credentials::is_complete)
    }

    /// Credentials, if complete.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref().filter(|c| c.is_complete())
    }

    /// Logger to use for this request cycle, `None` when debug mode is off.
    pub(crate) fn debug_logger(&self) -> Option<&dyn Logger> {
        if self.debug {
            self.logger.as_deref()
        } else {
            None
        }
    }
}

/// Errors loading a settings file.
#[derive(Error, Debug)]
pub enum ConfigFileError {
    /// File could not be read.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// File is not valid settings TOML.
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Non-secret client settings loaded from TOML.
///
/// ```toml
/// network = "testnet"
/// timeout_secs = 10
/// debug = true
/// ```
///
/// Credentials are never read from the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// REST host selection.
    pub network: Network,
    /// Overrides the network's base URL when set.
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent override.
    pub user_agent: Option<String>,
    /// Debug mode.
    pub debug: bool,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            base_url: None,
            timeout_secs: 30,
            user_agent: None,
            debug: false,
        }
    }
}

impl ConfigFile {
    /// Load settings from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigFileError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse settings from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigFileError> {
        Ok(toml::from_str(content)?)
    }

    /// Build a client configuration. With `debug = true` the caller still
    /// has to supply a logger via [`Config::with_debug`].
    pub fn into_config(self) -> Config {
        let base_url = self
            .base_url
            .unwrap_or_else(|| self.network.base_url().to_string());

        let mut config = Config::default()
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_debug_mode(self.debug);

        if let Some(user_agent) = self.user_agent {
            config = config.with_user_agent(user_agent);
        }

        config
    }
}
