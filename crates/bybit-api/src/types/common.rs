//! Common types used across the API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::response::RateLimitTelemetry;

/// V5 response envelope.
///
/// Rate-limit telemetry is filled from response headers, not the body.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct V5Response<T> {
    /// Business return code, 0 on success.
    pub ret_code: i64,
    /// Business return message.
    #[serde(default)]
    pub ret_msg: String,
    /// Payload.
    pub result: T,
    /// Extra information, usually empty.
    #[serde(default)]
    pub ret_ext_info: Value,
    /// Server time in milliseconds.
    #[serde(default)]
    pub time: i64,
    /// Rate-limit headers of the response.
    #[serde(flatten)]
    pub rate_limit: RateLimitTelemetry,
}

/// Legacy response envelope shared by the spot v1, futures and contract
/// families.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LegacyResponse<T> {
    /// Business return code, 0 on success.
    #[serde(alias = "retCode")]
    pub ret_code: i64,
    /// Business return message.
    #[serde(default, alias = "retMsg")]
    pub ret_msg: String,
    /// Payload.
    pub result: T,
    /// Extended error code.
    #[serde(default)]
    pub ext_code: Option<String>,
    /// Extended error information.
    #[serde(default)]
    pub ext_info: Option<String>,
    /// Server time in seconds, as a decimal string.
    #[serde(default)]
    pub time_now: Option<String>,
}

/// Product category of a v5 request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Spot
    Spot,
    /// USDT and USDC perpetuals and futures
    Linear,
    /// Inverse contracts
    Inverse,
    /// Options
    Option,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Spot => write!(f, "spot"),
            Category::Linear => write!(f, "linear"),
            Category::Inverse => write!(f, "inverse"),
            Category::Option => write!(f, "option"),
        }
    }
}

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Side {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "Buy"),
            Side::Sell => write!(f, "Sell"),
        }
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum OrderType {
    /// Limit order
    Limit,
    /// Market order
    Market,
}

/// Time in force for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum TimeInForce {
    /// Good till canceled
    #[serde(rename = "GTC")]
    Gtc,
    /// Immediate or cancel
    #[serde(rename = "IOC")]
    Ioc,
    /// Fill or kill
    #[serde(rename = "FOK")]
    Fok,
    /// Maker only
    PostOnly,
}

/// Decimal string wrapper that deserializes from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StringDecimal(pub Decimal);

impl StringDecimal {
    /// Create a new StringDecimal.
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Get the inner Decimal value.
    pub fn inner(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for StringDecimal {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl std::ops::Deref for StringDecimal {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for StringDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrNumber {
            String(String),
            Number(f64),
        }

        match StringOrNumber::deserialize(deserializer)? {
            // Bybit sends "" for fields that do not apply.
            StringOrNumber::String(s) if s.is_empty() => Ok(StringDecimal::default()),
            StringOrNumber::String(s) => s
                .parse::<Decimal>()
                .map(StringDecimal)
                .map_err(|e| D::Error::custom(format!("invalid decimal: {e}"))),
            StringOrNumber::Number(n) => Decimal::try_from(n)
                .map(StringDecimal)
                .map_err(|e| D::Error::custom(format!("invalid decimal: {e}"))),
        }
    }
}

impl Serialize for StringDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl std::fmt::Display for StringDecimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
