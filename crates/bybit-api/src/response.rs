//! Response classification.
//!
//! Maps an HTTP status and body onto a decoded value or an [`Error`]. The
//! two API generations disagree on how unknown statuses are reported, so
//! each has its own classifier.

use std::fmt;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Error, Result};
use crate::logging::Logger;
use crate::request::ApiGeneration;
use crate::transport::RawResponse;

/// Response header with the remaining request quota.
pub const HEADER_LIMIT_STATUS: &str = "X-Bapi-Limit-Status";
/// Response header with the quota reset time in milliseconds.
pub const HEADER_LIMIT_RESET: &str = "X-Bapi-Limit-Reset-Timestamp";
/// Response header with the quota size.
pub const HEADER_LIMIT: &str = "X-Bapi-Limit";

/// Checks a 2xx body for an application-level failure before decoding.
pub trait BodyValidator: fmt::Debug + Send + Sync {
    /// Return an error if `body` reports a business failure.
    fn validate(&self, body: &[u8]) -> Result<()>;
}

/// Validator for legacy envelopes (`ret_code`/`ret_msg`, or the camelCase
/// spelling used by the v3 families).
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyBodyValidator;

impl BodyValidator for LegacyBodyValidator {
    fn validate(&self, body: &[u8]) -> Result<()> {
        check_return_code(body, &["ret_code", "retCode"], &["ret_msg", "retMsg"])
    }
}

/// Validator for v5 envelopes (`retCode`/`retMsg`).
#[derive(Debug, Clone, Copy, Default)]
pub struct V5BodyValidator;

impl BodyValidator for V5BodyValidator {
    fn validate(&self, body: &[u8]) -> Result<()> {
        check_return_code(body, &["retCode"], &["retMsg"])
    }
}

fn check_return_code(body: &[u8], code_keys: &[&str], msg_keys: &[&str]) -> Result<()> {
    let value: Value = serde_json::from_slice(body)?;
    let Some(object) = value.as_object() else {
        return Ok(());
    };

    let code = code_keys
        .iter()
        .find_map(|k| object.get(*k))
        .and_then(Value::as_i64)
        .unwrap_or(0);

    if code == 0 {
        return Ok(());
    }

    let message = msg_keys
        .iter()
        .find_map(|k| object.get(*k))
        .and_then(Value::as_str)
        .unwrap_or_default();

    Err(Error::Api(ApiError::new(code, message)))
}

/// Rate-limit telemetry reported by v5 endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct RateLimitTelemetry {
    /// Requests left in the current window.
    #[serde(default)]
    pub rate_limit_status: i64,
    /// Window reset time, milliseconds since the epoch.
    #[serde(default)]
    pub rate_limit_reset_ms: i64,
    /// Window size.
    #[serde(default)]
    pub rate_limit: i64,
}

impl RateLimitTelemetry {
    /// Parse the three limit headers. Missing or malformed values are zero.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<i64>().ok())
                .unwrap_or(0)
        };

        Self {
            rate_limit_status: read(HEADER_LIMIT_STATUS),
            rate_limit_reset_ms: read(HEADER_LIMIT_RESET),
            rate_limit: read(HEADER_LIMIT),
        }
    }

    /// Overwrite the telemetry keys of a decoded JSON object.
    fn merge_into(self, value: &mut Value) {
        if let Value::Object(object) = value {
            object.insert("rate_limit_status".into(), self.rate_limit_status.into());
            object.insert("rate_limit_reset_ms".into(), self.rate_limit_reset_ms.into());
            object.insert("rate_limit".into(), self.rate_limit.into());
        }
    }
}

/// Classify a response according to its API generation.
pub fn classify<T: DeserializeOwned>(
    response: RawResponse,
    generation: ApiGeneration,
    validator: &dyn BodyValidator,
    logger: Option<&dyn Logger>,
) -> Result<T> {
    match generation {
        ApiGeneration::Legacy => classify_legacy(response, validator, logger),
        ApiGeneration::V5 => classify_v5(response, validator, logger),
    }
}

/// Legacy classifier: 2xx decodes, 403/404 are typed, 429 and 5xx are
/// distinguished, anything else is a generic failure.
pub fn classify_legacy<T: DeserializeOwned>(
    response: RawResponse,
    validator: &dyn BodyValidator,
    logger: Option<&dyn Logger>,
) -> Result<T> {
    let status = response.status;

    if status.is_success() {
        log_body(logger, &response);
        validator.validate(&response.body)?;
        return decode(&response.body);
    }

    if let Some(error) = common_failure(status, logger) {
        return Err(error);
    }

    log_body(logger, &response);

    let code = status.as_u16();
    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!("Rate limited (HTTP {})", code);
        return Err(Error::RateLimited { status: code });
    }
    if status.is_server_error() {
        tracing::warn!("Server error (HTTP {})", code);
        return Err(Error::ServerError { status: code });
    }

    Err(Error::RequestFailed {
        status: code,
        reason: status.canonical_reason().unwrap_or_default().to_string(),
    })
}

/// V5 classifier: 2xx decodes with rate-limit telemetry merged in, 403/404
/// are typed, anything else is unexpected.
pub fn classify_v5<T: DeserializeOwned>(
    response: RawResponse,
    validator: &dyn BodyValidator,
    logger: Option<&dyn Logger>,
) -> Result<T> {
    let status = response.status;

    if status.is_success() {
        log_body(logger, &response);
        validator.validate(&response.body)?;

        let mut value: Value = decode(&response.body)?;
        RateLimitTelemetry::from_headers(&response.headers).merge_into(&mut value);

        return serde_json::from_value(value).map_err(|e| {
            tracing::error!("Failed to decode response: {}", e);
            Error::Decode(e)
        });
    }

    if let Some(error) = common_failure(status, logger) {
        return Err(error);
    }

    // The body of an unexpected response is only ever logged.
    log_body(logger, &response);
    tracing::warn!("Unexpected response status {}", status);

    Err(Error::Unexpected {
        status: status.as_u16(),
    })
}

fn common_failure(status: StatusCode, logger: Option<&dyn Logger>) -> Option<Error> {
    let error = match status {
        StatusCode::FORBIDDEN => Error::AccessDenied,
        StatusCode::NOT_FOUND => Error::NotFound,
        _ => return None,
    };

    if let Some(logger) = logger {
        logger.error(&format!("Error: {}", status.as_u16()));
    }

    Some(error)
}

fn log_body(logger: Option<&dyn Logger>, response: &RawResponse) {
    if let Some(logger) = logger {
        logger.debug(&format!("Body: {}", response.body_text()));
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::error!("Failed to parse response: {}", String::from_utf8_lossy(body));
        Error::Decode(e)
    })
}
