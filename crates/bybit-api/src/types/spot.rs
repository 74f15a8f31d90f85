//! Spot v1 types.

use super::common::Side;
use serde::{Deserialize, Serialize};

/// Server time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    /// Server timestamp in milliseconds.
    pub server_time: i64,
}

/// Spot v1 order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotOrderType {
    /// Limit order
    Limit,
    /// Market order
    Market,
    /// Post-only limit order
    LimitMaker,
}

/// Parameters for `POST /spot/v1/order`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotPostOrderParam {
    /// Symbol.
    pub symbol: String,
    /// Quantity.
    pub qty: String,
    /// Order side.
    pub side: Side,
    /// Order type.
    #[serde(rename = "type")]
    pub order_type: SpotOrderType,
    /// Time in force: GTC, FOK or IOC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<String>,
    /// Limit price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Client order ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_link_id: Option<String>,
}

/// Order accepted by `POST /spot/v1/order`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotPostOrderResult {
    /// Exchange order ID.
    pub order_id: String,
    /// Client order ID.
    #[serde(default)]
    pub order_link_id: String,
    /// Symbol.
    pub symbol: String,
    /// Creation time in milliseconds.
    pub transact_time: String,
    /// Order price.
    pub price: String,
    /// Order quantity.
    pub orig_qty: String,
    /// Order type.
    #[serde(rename = "type")]
    pub order_type: SpotOrderType,
    /// Order side, upper case.
    pub side: String,
    /// Order status.
    pub status: String,
    /// Time in force.
    pub time_in_force: String,
    /// Account ID.
    pub account_id: String,
    /// Symbol display name.
    pub symbol_name: String,
    /// Filled quantity.
    pub executed_qty: String,
}

/// Parameters for `DELETE /spot/v1/order`. One of the IDs is required.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotCancelOrderParam {
    /// Exchange order ID.
    pub order_id: Option<String>,
    /// Client order ID.
    pub order_link_id: Option<String>,
}

/// Order cancelled by `DELETE /spot/v1/order`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotCancelOrderResult {
    /// Exchange order ID.
    pub order_id: String,
    /// Client order ID.
    #[serde(default)]
    pub order_link_id: String,
    /// Symbol.
    pub symbol: String,
    /// Order status.
    pub status: String,
}
