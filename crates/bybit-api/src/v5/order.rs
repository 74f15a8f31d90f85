//! V5 order endpoints.

use crate::client::BybitClient;
use crate::error::{Error, Result};
use crate::request::{to_params, BodyEncoding};
use crate::types::{
    CancelOrderParam, CreateOrderParam, OpenOrders, OpenOrdersParam, OrderId, V5Response,
};

/// Order API.
#[derive(Debug, Clone)]
pub struct OrderApi {
    client: BybitClient,
}

impl OrderApi {
    /// Create a new Order API instance.
    pub fn new(client: BybitClient) -> Self {
        Self { client }
    }

    /// Place an order.
    ///
    /// # Example
    /// ```ignore
    /// use bybit_api::types::{Category, CreateOrderParam, Side};
    ///
    /// let order = client.v5().order().create_order(
    ///     &CreateOrderParam::limit(Category::Linear, "BTCUSDT", Side::Buy, "0.01", "25000"),
    /// ).await?;
    /// let left = order.rate_limit.rate_limit_status;
    /// println!("{} ({left} requests left)", order.result.order_id);
    /// ```
    pub async fn create_order(&self, param: &CreateOrderParam) -> Result<V5Response<OrderId>> {
        self.client
            .post_private("/v5/order/create", param, BodyEncoding::Json)
            .await
    }

    /// Cancel an order by exchange or client order ID.
    pub async fn cancel_order(&self, param: &CancelOrderParam) -> Result<V5Response<OrderId>> {
        if param.order_id.is_none() && param.order_link_id.is_none() {
            return Err(Error::InvalidParameter(
                "either order_id or order_link_id is required".into(),
            ));
        }

        self.client
            .post_private("/v5/order/cancel", param, BodyEncoding::Json)
            .await
    }

    /// Query unfilled and partially filled orders.
    pub async fn open_orders(&self, param: &OpenOrdersParam) -> Result<V5Response<OpenOrders>> {
        self.client
            .get_private("/v5/order/realtime", to_params(param)?)
            .await
    }
}
