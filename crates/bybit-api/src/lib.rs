//! # Bybit API Client Library
//!
//! A Rust client for the Bybit REST API family: spot, derivatives contracts
//! and v5 unified trading.
//!
//! ## Features
//!
//! - **Two signing schemes**: legacy query-string HMAC and v5 header HMAC,
//!   chosen from the endpoint path
//! - **Typed errors**: access denied, not found, rate limited, server and
//!   business errors are distinct variants
//! - **Rate-limit telemetry**: v5 responses carry the `X-Bapi-Limit*` headers
//! - **Pluggable transport**: bring your own `reqwest::Client` or a test double
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bybit_api::BybitClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bybit_api::Error> {
//!     let client = BybitClient::public()?;
//!
//!     let time = client.spot().v1().server_time().await?;
//!     println!("Server time: {}", time.result.server_time);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Authenticated Requests
//!
//! ```rust,ignore
//! use bybit_api::BybitClient;
//! use bybit_api::types::{Category, OpenOrdersParam};
//!
//! let client = BybitClient::with_credentials("your-api-key", "your-api-secret")?;
//!
//! let orders = client
//!     .v5()
//!     .order()
//!     .open_orders(&OpenOrdersParam::new(Category::Linear).symbol("BTCUSDT"))
//!     .await?;
//! let left = orders.rate_limit.rate_limit_status;
//! println!("{} open, {left} requests left", orders.result.list.len());
//! ```
//!
//! ## Configuration
//!
//! ```rust,ignore
//! use bybit_api::{BybitClient, Config, Network, TracingLogger};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let config = Config::for_network(Network::Testnet)
//!     .with_credentials("api-key", "api-secret")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_debug(Arc::new(TracingLogger));
//!
//! let client = BybitClient::new(config)?;
//! ```
//!
//! No request is retried. Callers that want backoff on
//! [`Error::RateLimited`] or [`Error::ServerError`] implement it themselves.

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod logging;
pub mod request;
pub mod response;
pub mod signer;
pub mod spot;
pub mod transport;
pub mod types;
pub mod v5;

// Re-exports for convenience
pub use client::BybitClient;
pub use config::{Config, ConfigFile, Credentials, Network};
pub use error::{ApiError, Error, Result};
pub use logging::{Logger, TracingLogger};
pub use request::{ApiGeneration, BodyEncoding, Params};
pub use response::{BodyValidator, LegacyBodyValidator, RateLimitTelemetry, V5BodyValidator};
pub use transport::{HttpTransport, RawResponse, Transport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Production REST host.
pub const MAINNET_BASE_URL: &str = "https://api.bybit.com";

/// Documented alias of the production REST host.
pub const MAINNET_BASE_URL_ALT: &str = "https://api.bytick.com";

/// Test network REST host.
pub const TESTNET_BASE_URL: &str = "https://api-testnet.bybit.com";

/// Prelude module for convenient imports.
pub mod prelude {
    //! Common imports for using the Bybit API client.

    pub use crate::client::BybitClient;
    pub use crate::config::{Config, Credentials, Network};
    pub use crate::contract::ContractApi;
    pub use crate::error::{ApiError, Error, Result};
    pub use crate::logging::{Logger, TracingLogger};
    pub use crate::request::{ApiGeneration, BodyEncoding, Params, PreparedRequest};
    pub use crate::response::{BodyValidator, RateLimitTelemetry};
    pub use crate::spot::{SpotApi, SpotV1Api};
    pub use crate::transport::{RawResponse, Transport};
    pub use crate::types::{
        Category, CreateOrderParam, LegacyResponse, OpenOrdersParam, OrderType, Side,
        TimeInForce, V5Response,
    };
    pub use crate::v5::{OrderApi, V5Api};
}
