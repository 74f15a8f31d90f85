//! HTTP client for the Bybit API.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{Config, Credentials};
use crate::contract::ContractApi;
use crate::error::{Error, Result};
use crate::request::{self, ApiGeneration, BodyEncoding, Params, PreparedRequest};
use crate::response::{self, BodyValidator, LegacyBodyValidator, V5BodyValidator};
use crate::signer;
use crate::spot::SpotApi;
use crate::transport::{self, HttpTransport, Transport};
use crate::v5::V5Api;

/// Client for the Bybit REST API.
///
/// Cloning is cheap and clones share configuration and transport. Nothing
/// is written to the client per request, so one instance can serve
/// concurrent calls.
#[derive(Debug, Clone)]
pub struct BybitClient {
    config: Arc<Config>,
    transport: Arc<dyn Transport>,
    legacy_validator: Arc<dyn BodyValidator>,
    v5_validator: Arc<dyn BodyValidator>,
}

impl BybitClient {
    /// Create a new client with the given configuration and the default
    /// HTTP transport.
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::from_config(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that sends requests through `transport`.
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        if config.debug && config.logger.is_none() {
            return Err(Error::Configuration(
                "debug mode requires a logger".into(),
            ));
        }

        Ok(Self {
            config: Arc::new(config),
            transport,
            legacy_validator: Arc::new(LegacyBodyValidator),
            v5_validator: Arc::new(V5BodyValidator),
        })
    }

    /// Create a client with API credentials.
    pub fn with_credentials(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self> {
        Self::new(Config::new(api_key, api_secret))
    }

    /// Create a client for public endpoints only.
    pub fn public() -> Result<Self> {
        Self::new(Config::public())
    }

    /// Testnet client with credentials from the environment.
    ///
    /// # Panics
    ///
    /// Panics if `BYBIT_TEST_KEY` or `BYBIT_TEST_SECRET` is unset.
    pub fn testnet_from_env() -> Result<Self> {
        Self::new(Config::testnet_from_env())
    }

    /// Replace the body validator used for one API generation.
    pub fn with_body_validator(
        mut self,
        generation: ApiGeneration,
        validator: Arc<dyn BodyValidator>,
    ) -> Self {
        match generation {
            ApiGeneration::Legacy => self.legacy_validator = validator,
            ApiGeneration::V5 => self.v5_validator = validator,
        }
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// V5 unified trading endpoints.
    pub fn v5(&self) -> V5Api {
        V5Api::new(self.clone())
    }

    /// Derivatives contract endpoints.
    pub fn contract(&self) -> ContractApi {
        ContractApi::new(self.clone())
    }

    /// Spot endpoints.
    pub fn spot(&self) -> SpotApi {
        SpotApi::new(self.clone())
    }

    fn credentials(&self) -> Result<&Credentials> {
        self.config.credentials().ok_or_else(|| {
            Error::Configuration("this is a private endpoint, please set api key and secret".into())
        })
    }

    fn validator(&self, generation: ApiGeneration) -> &dyn BodyValidator {
        match generation {
            ApiGeneration::Legacy => self.legacy_validator.as_ref(),
            ApiGeneration::V5 => self.v5_validator.as_ref(),
        }
    }

    /// Dispatch a prepared request and classify the response.
    async fn send<T: DeserializeOwned>(&self, request: PreparedRequest) -> Result<T> {
        let logger = self.config.debug_logger();
        let generation = request.generation;

        let response = transport::dispatch(self.transport.as_ref(), logger, request).await?;

        response::classify(response, generation, self.validator(generation), logger)
    }

    /// Make an unsigned GET request.
    pub async fn get_public<T: DeserializeOwned>(&self, path: &str, params: &Params) -> Result<T> {
        let request = request::public_get(&self.config.base_url, path, params)?;
        self.send(request).await
    }

    /// Make a signed GET request. Paths under `/v5/` are signed with headers,
    /// everything else with injected query parameters.
    pub async fn get_private<T: DeserializeOwned>(&self, path: &str, params: Params) -> Result<T> {
        self.query_private(Method::GET, path, params).await
    }

    /// Make a signed DELETE request.
    pub async fn delete_private<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
    ) -> Result<T> {
        self.query_private(Method::DELETE, path, params).await
    }

    async fn query_private<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> Result<T> {
        let credentials = self.credentials()?;
        let base_url = &self.config.base_url;

        let timestamp = signer::timestamp_ms()?;
        let request = match ApiGeneration::for_path(path) {
            ApiGeneration::Legacy => {
                request::legacy_query(method, base_url, path, params, credentials, timestamp)?
            }
            ApiGeneration::V5 => {
                request::v5_query(method, base_url, path, &params, credentials, timestamp)?
            }
        };

        self.send(request).await
    }

    /// Make a signed POST request with `body` encoded as JSON or form data.
    /// V5 endpoints accept JSON only.
    pub async fn post_private<T, B>(
        &self,
        path: &str,
        body: &B,
        encoding: BodyEncoding,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let credentials = self.credentials()?;
        let base_url = &self.config.base_url;
        let generation = ApiGeneration::for_path(path);

        let request = match (generation, encoding) {
            (ApiGeneration::V5, BodyEncoding::Form) => {
                return Err(Error::Configuration(format!(
                    "{path} is a v5 endpoint and only accepts JSON bodies"
                )));
            }
            (ApiGeneration::V5, BodyEncoding::Json) => {
                let body = encode_json(body)?;
                let timestamp = signer::timestamp_ms()?;
                request::v5_json(Method::POST, base_url, path, body, credentials, timestamp)?
            }
            (ApiGeneration::Legacy, BodyEncoding::Json) => {
                let body = encode_json(body)?;
                let timestamp = signer::timestamp_ms()?;
                request::legacy_json(base_url, path, &body, credentials, timestamp)?
            }
            (ApiGeneration::Legacy, BodyEncoding::Form) => {
                let params = request::to_params(body)?;
                let timestamp = signer::timestamp_ms()?;
                request::legacy_form(base_url, path, params, credentials, timestamp)?
            }
        };

        self.send(request).await
    }
}

fn encode_json<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(|e| Error::Encode(e.to_string()))
}
