//! HTTP transport.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};

use crate::config::Config;
use crate::error::Result;
use crate::logging::Logger;
use crate::request::PreparedRequest;

/// Raw HTTP response with the body fully read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Create a response with no headers.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Body as lossy UTF-8, for logging.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Executes prepared requests.
///
/// Implementations perform exactly one HTTP exchange per call and must read
/// the body to the end before returning. Timeouts, pooling and proxies are
/// the implementation's business; the client adds no policy on top.
#[async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    /// Send `request` and return the status, headers and full body.
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse>;
}

/// Transport backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Wrap an existing `reqwest::Client`.
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Build a `reqwest::Client` from the configured timeout and user agent.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self::new(http))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse> {
        let mut builder = self.http.request(request.method, request.url);

        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        // Draining the body hands the connection back to the pool.
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Run one request through `transport`, logging the URL before and the
/// status and headers after when a debug logger is given.
pub async fn dispatch(
    transport: &dyn Transport,
    logger: Option<&dyn Logger>,
    request: PreparedRequest,
) -> Result<RawResponse> {
    tracing::debug!(
        method = %request.method,
        endpoint = %endpoint(&request),
        "Sending request"
    );

    if let Some(logger) = logger {
        logger.debug(&format!("Request url: {}", request.url));
    }

    let response = match transport.execute(request).await {
        Ok(response) => response,
        Err(e) => {
            if let Some(logger) = logger {
                logger.error(&format!("Error: {e}"));
            }
            return Err(e);
        }
    };

    if let Some(logger) = logger {
        logger.debug(&format!(
            "Response: {} {:?}",
            response.status, response.headers
        ));
    }

    Ok(response)
}

/// Scheme, host and path of the request URL. The query is left out since
/// legacy requests carry `api_key` and `sign` there.
fn endpoint(request: &PreparedRequest) -> String {
    let mut url = request.url.clone();
    url.set_query(None);
    url.to_string()
}
