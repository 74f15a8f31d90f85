//! Error types for the Bybit API client.

use std::fmt;

use thiserror::Error;

/// Result type alias for Bybit API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Bybit API client.
#[derive(Debug, Error)]
pub enum Error {
    /// Local misconfiguration: missing credentials for a private call, debug
    /// mode without a logger, or a body the endpoint generation cannot carry.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Network-level failure reported by the HTTP transport.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    /// HTTP 403.
    #[error("Access denied")]
    AccessDenied,
    /// HTTP 404.
    #[error("Path not found")]
    NotFound,
    /// HTTP 429 on a legacy endpoint.
    #[error("Rate limited (HTTP {status})")]
    RateLimited {
        /// HTTP status code
        status: u16,
    },
    /// HTTP 5xx on a legacy endpoint.
    #[error("Server error (HTTP {status})")]
    ServerError {
        /// HTTP status code
        status: u16,
    },
    /// Response body is not valid JSON for the destination type.
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),
    /// HTTP 2xx carrying a non-zero business return code.
    #[error("API error: {0}")]
    Api(ApiError),
    /// Any other non-2xx status on a legacy endpoint.
    #[error("Request failed: HTTP {status} {reason}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status
        reason: String,
    },
    /// Any other non-2xx status on a v5 endpoint.
    #[error("Unexpected error (HTTP {status})")]
    Unexpected {
        /// HTTP status code
        status: u16,
    },
    /// Base URL or path could not be parsed.
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
    /// Request parameters or body could not be encoded.
    #[error("Encode error: {0}")]
    Encode(String),
    /// System clock is set before the Unix epoch, so no request can be
    /// timestamped.
    #[error("System clock error: {0}")]
    Clock(#[from] std::time::SystemTimeError),
    /// Invalid parameter provided by the caller.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    /// Check if this is an HTTP 403.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Error::AccessDenied)
    }

    /// Check if this is an HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }

    /// Check if the exchange asked us to slow down, by HTTP status or by
    /// business return code.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Error::RateLimited { .. } => true,
            Error::Api(e) => e.is_rate_limited(),
            _ => false,
        }
    }

    /// Check if this is an HTTP 5xx on a legacy endpoint.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::ServerError { .. })
    }

    /// Check if the response body failed to decode or carried a business error.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_) | Error::Api(_))
    }

    /// Check if the error was raised locally before any network I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    /// Business error carried by the response, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::Encode(err.to_string())
    }
}

/// Business error returned inside an HTTP 2xx envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Return code from the envelope
    pub code: i64,
    /// Return message from the envelope
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.code, 10006 | 10018)
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.code, 10003 | 10004 | 10005 | 10007 | 10009 | 10010 | 33004)
    }

    /// Check if this is a parameter error.
    pub fn is_param_error(&self) -> bool {
        matches!(self.code, 10001 | 10002)
    }

    /// Check if this is an insufficient balance error.
    pub fn is_insufficient_balance(&self) -> bool {
        matches!(self.code, 110004 | 110007 | 110012 | 110052 | 170131)
    }
}
