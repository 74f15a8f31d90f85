//! Request construction and signing.
//!
//! Every function here produces a [`PreparedRequest`] that is ready to hand
//! to a [`Transport`](crate::transport::Transport). Signing is always the last
//! step: nothing touches the parameters or body after the signature is
//! computed.

use std::collections::BTreeMap;

use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::signer;

/// Ordered parameter set. Iteration order is ascending by key bytes, which
/// is the legacy canonical order.
pub type Params = BTreeMap<String, String>;

/// Reserved legacy parameter carrying the API key.
pub const API_KEY_PARAM: &str = "api_key";
/// Reserved legacy parameter carrying the request timestamp.
pub const TIMESTAMP_PARAM: &str = "timestamp";
/// Reserved legacy parameter carrying the signature.
pub const SIGN_PARAM: &str = "sign";

/// V5 header carrying the API key.
pub const HEADER_API_KEY: &str = "X-BAPI-API-KEY";
/// V5 header carrying the request timestamp.
pub const HEADER_TIMESTAMP: &str = "X-BAPI-TIMESTAMP";
/// V5 header carrying the signature.
pub const HEADER_SIGN: &str = "X-BAPI-SIGN";

const CONTENT_TYPE: &str = "Content-Type";
const CONTENT_TYPE_JSON: &str = "application/json";
const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Signing and classification scheme of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiGeneration {
    /// Query-string HMAC with `api_key`/`timestamp`/`sign` injected into the
    /// parameters.
    Legacy,
    /// Unified trading: `timestamp + key + payload` HMAC sent in headers.
    V5,
}

impl ApiGeneration {
    /// Generation serving `path`: everything under `/v5/` is v5.
    pub fn for_path(path: &str) -> Self {
        if path.starts_with("/v5/") {
            ApiGeneration::V5
        } else {
            ApiGeneration::Legacy
        }
    }
}

/// Encoding of a private POST body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyEncoding {
    /// `application/json`
    Json,
    /// `application/x-www-form-urlencoded` (legacy only)
    Form,
}

/// Fully addressed, signed request.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: Method,
    /// Target URL including the encoded query string.
    pub url: Url,
    /// Extra request headers.
    pub headers: Vec<(&'static str, String)>,
    /// Request body.
    pub body: Option<Vec<u8>>,
    /// Generation used to classify the response.
    pub generation: ApiGeneration,
}

impl PreparedRequest {
    fn new(method: Method, url: Url, generation: ApiGeneration) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
            generation,
        }
    }

    fn push_header(&mut self, name: &'static str, value: impl Into<String>) {
        self.headers.push((name, value.into()));
    }

    /// Value of a request header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decoded query parameters.
    pub fn query_params(&self) -> Params {
        self.url.query_pairs().into_owned().collect()
    }
}

/// Join `path` onto the scheme and host of `base_url`, replacing any path
/// the base URL carries.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    url.set_path(path);
    Ok(url)
}

/// Percent-encode a parameter set as a query string, keys in sorted order.
pub fn encode_query(params: &Params) -> Result<String> {
    Ok(serde_urlencoded::to_string(params)?)
}

fn with_query(mut url: Url, query: &str) -> Url {
    if query.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(query));
    }
    url
}

/// Unsigned GET. Parameters go into the query string as given.
pub fn public_get(base_url: &str, path: &str, params: &Params) -> Result<PreparedRequest> {
    let url = with_query(endpoint_url(base_url, path)?, &encode_query(params)?);
    Ok(PreparedRequest::new(Method::GET, url, ApiGeneration::for_path(path)))
}

/// Inject `api_key`, `timestamp` and then `sign` computed over the full set.
pub fn populate_signature(
    mut params: Params,
    credentials: &Credentials,
    timestamp: u64,
) -> Params {
    params.insert(API_KEY_PARAM.to_string(), credentials.key().to_string());
    params.insert(TIMESTAMP_PARAM.to_string(), timestamp.to_string());
    let sign = signer::sign_legacy(&params, credentials.secret());
    params.insert(SIGN_PARAM.to_string(), sign);
    params
}

/// Legacy signed request with parameters in the query string (GET, DELETE).
pub fn legacy_query(
    method: Method,
    base_url: &str,
    path: &str,
    params: Params,
    credentials: &Credentials,
    timestamp: u64,
) -> Result<PreparedRequest> {
    let url = endpoint_url(base_url, path)?;
    let signed = populate_signature(params, credentials, timestamp);
    let url = with_query(url, &encode_query(&signed)?);
    Ok(PreparedRequest::new(method, url, ApiGeneration::Legacy))
}

/// Legacy signed POST with a form-encoded body.
pub fn legacy_form(
    base_url: &str,
    path: &str,
    params: Params,
    credentials: &Credentials,
    timestamp: u64,
) -> Result<PreparedRequest> {
    let url = endpoint_url(base_url, path)?;
    let signed = populate_signature(params, credentials, timestamp);
    let body = encode_query(&signed)?;

    let mut request = PreparedRequest::new(Method::POST, url, ApiGeneration::Legacy);
    request.push_header(CONTENT_TYPE, CONTENT_TYPE_FORM);
    request.body = Some(body.into_bytes());
    Ok(request)
}

/// Legacy signed POST with a JSON body.
///
/// The reserved keys are injected into the top-level object and the
/// signature covers its key-sorted `k=v` rendering with values stringified.
pub fn legacy_json(
    base_url: &str,
    path: &str,
    body: &[u8],
    credentials: &Credentials,
    timestamp: u64,
) -> Result<PreparedRequest> {
    let url = endpoint_url(base_url, path)?;

    let mut object: Map<String, Value> = serde_json::from_slice(body)
        .map_err(|e| Error::Encode(format!("legacy JSON body must be an object: {e}")))?;
    object.insert(
        API_KEY_PARAM.to_string(),
        Value::String(credentials.key().to_string()),
    );
    object.insert(
        TIMESTAMP_PARAM.to_string(),
        Value::String(timestamp.to_string()),
    );

    let material: Params = object
        .iter()
        .map(|(k, v)| (k.clone(), stringify_value(v)))
        .collect();
    let sign = signer::sign_legacy(&material, credentials.secret());
    object.insert(SIGN_PARAM.to_string(), Value::String(sign));

    let body = serde_json::to_vec(&object).map_err(|e| Error::Encode(e.to_string()))?;

    let mut request = PreparedRequest::new(Method::POST, url, ApiGeneration::Legacy);
    request.push_header(CONTENT_TYPE, CONTENT_TYPE_JSON);
    request.body = Some(body);
    Ok(request)
}

fn v5_auth_headers(
    request: &mut PreparedRequest,
    credentials: &Credentials,
    timestamp: u64,
    payload: &[u8],
) {
    let sign = signer::sign_v5(timestamp, credentials.key(), payload, credentials.secret());
    request.push_header(HEADER_API_KEY, credentials.key());
    request.push_header(HEADER_TIMESTAMP, timestamp.to_string());
    request.push_header(HEADER_SIGN, sign);
}

/// V5 signed request with parameters in the query string (GET, DELETE).
/// The signature covers the encoded query exactly as sent.
pub fn v5_query(
    method: Method,
    base_url: &str,
    path: &str,
    params: &Params,
    credentials: &Credentials,
    timestamp: u64,
) -> Result<PreparedRequest> {
    let query = encode_query(params)?;
    let url = with_query(endpoint_url(base_url, path)?, &query);

    let mut request = PreparedRequest::new(method, url, ApiGeneration::V5);
    v5_auth_headers(&mut request, credentials, timestamp, query.as_bytes());
    Ok(request)
}

/// V5 signed request with a JSON body. The body bytes are sent untouched.
pub fn v5_json(
    method: Method,
    base_url: &str,
    path: &str,
    body: Vec<u8>,
    credentials: &Credentials,
    timestamp: u64,
) -> Result<PreparedRequest> {
    let url = endpoint_url(base_url, path)?;

    let mut request = PreparedRequest::new(method, url, ApiGeneration::V5);
    request.push_header(CONTENT_TYPE, CONTENT_TYPE_JSON);
    v5_auth_headers(&mut request, credentials, timestamp, &body);
    request.body = Some(body);
    Ok(request)
}

/// Render a JSON value the way it appears in a signature or form field:
/// strings verbatim, arrays comma-joined, everything else as JSON text.
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(stringify_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// Flatten a serializable struct into a parameter set. `null` fields are
/// dropped so `Option::None` behaves like an omitted parameter.
pub fn to_params<T: Serialize + ?Sized>(value: &T) -> Result<Params> {
    match serde_json::to_value(value).map_err(|e| Error::Encode(e.to_string()))? {
        Value::Object(object) => Ok(object
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), stringify_value(v)))
            .collect()),
        Value::Null => Ok(Params::new()),
        other => Err(Error::Encode(format!(
            "parameters must serialize to an object, got {other}"
        ))),
    }
}
