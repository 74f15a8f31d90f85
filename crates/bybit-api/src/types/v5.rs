//! V5 unified trading order types.

use super::common::{Category, OrderType, Side, StringDecimal, TimeInForce};
use serde::{Deserialize, Serialize};

/// Parameters for `POST /v5/order/create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderParam {
    /// Product category.
    pub category: Category,
    /// Symbol, e.g. "BTCUSDT".
    pub symbol: String,
    /// Order side.
    pub side: Side,
    /// Order type.
    pub order_type: OrderType,
    /// Order quantity.
    pub qty: String,
    /// Limit price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Time in force, GTC when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    /// Position index, required in hedge mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_idx: Option<i32>,
    /// Client order ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_link_id: Option<String>,
    /// Take profit price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<String>,
    /// Stop loss price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<String>,
    /// Reduce-only flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce_only: Option<bool>,
}

impl CreateOrderParam {
    /// Market order for `qty`.
    pub fn market(
        category: Category,
        symbol: impl Into<String>,
        side: Side,
        qty: impl Into<String>,
    ) -> Self {
        Self {
            category,
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            qty: qty.into(),
            price: None,
            time_in_force: None,
            position_idx: None,
            order_link_id: None,
            take_profit: None,
            stop_loss: None,
            reduce_only: None,
        }
    }

    /// Limit order for `qty` at `price`.
    pub fn limit(
        category: Category,
        symbol: impl Into<String>,
        side: Side,
        qty: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            order_type: OrderType::Limit,
            price: Some(price.into()),
            ..Self::market(category, symbol, side, qty)
        }
    }

    /// Set the time in force.
    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Set the client order ID.
    pub fn order_link_id(mut self, id: impl Into<String>) -> Self {
        self.order_link_id = Some(id.into());
        self
    }

    /// Mark the order reduce-only.
    pub fn reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = Some(reduce_only);
        self
    }
}

/// Result of creating or cancelling an order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderId {
    /// Exchange order ID.
    pub order_id: String,
    /// Client order ID.
    #[serde(default)]
    pub order_link_id: String,
}

/// Parameters for `POST /v5/order/cancel`. One of `order_id` or
/// `order_link_id` is required.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderParam {
    /// Product category.
    pub category: Category,
    /// Symbol.
    pub symbol: String,
    /// Exchange order ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Client order ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_link_id: Option<String>,
    /// Spot only: "Order", "tpslOrder" or "StopOrder".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_filter: Option<String>,
}

/// Parameters for `GET /v5/order/realtime`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrdersParam {
    /// Product category.
    pub category: Option<Category>,
    /// Symbol.
    pub symbol: Option<String>,
    /// Base coin.
    pub base_coin: Option<String>,
    /// Settle coin.
    pub settle_coin: Option<String>,
    /// Exchange order ID.
    pub order_id: Option<String>,
    /// Client order ID.
    pub order_link_id: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
    /// Page cursor.
    pub cursor: Option<String>,
}

impl OpenOrdersParam {
    /// Open orders of a category.
    pub fn new(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Default::default()
        }
    }

    /// Filter by symbol.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }
}

/// Page of open orders.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrders {
    /// Product category.
    #[serde(default)]
    pub category: String,
    /// Cursor for the next page.
    #[serde(default)]
    pub next_page_cursor: String,
    /// Orders.
    pub list: Vec<V5Order>,
}

/// Order as reported by v5 order queries.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct V5Order {
    /// Exchange order ID.
    pub order_id: String,
    /// Client order ID.
    #[serde(default)]
    pub order_link_id: String,
    /// Symbol.
    pub symbol: String,
    /// Order side.
    pub side: Side,
    /// Order type.
    pub order_type: OrderType,
    /// Order price.
    #[serde(default)]
    pub price: StringDecimal,
    /// Order quantity.
    #[serde(default)]
    pub qty: StringDecimal,
    /// Order status, e.g. "New" or "PartiallyFilled".
    pub order_status: String,
    /// Average fill price.
    #[serde(default)]
    pub avg_price: StringDecimal,
    /// Quantity still open.
    #[serde(default)]
    pub leaves_qty: StringDecimal,
    /// Quantity filled.
    #[serde(default)]
    pub cum_exec_qty: StringDecimal,
    /// Creation time in milliseconds, as a string.
    #[serde(default)]
    pub created_time: String,
    /// Last update time in milliseconds, as a string.
    #[serde(default)]
    pub updated_time: String,
}
