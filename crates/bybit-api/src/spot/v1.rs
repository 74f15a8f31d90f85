//! Legacy spot v1 endpoints.

use crate::client::BybitClient;
use crate::error::{Error, Result};
use crate::request::{to_params, BodyEncoding, Params};
use crate::types::{
    LegacyResponse, ServerTime, SpotCancelOrderParam, SpotCancelOrderResult, SpotPostOrderParam,
    SpotPostOrderResult,
};

/// Spot v1 API.
#[derive(Debug, Clone)]
pub struct SpotV1Api {
    client: BybitClient,
}

impl SpotV1Api {
    /// Create a new Spot v1 API instance.
    pub fn new(client: BybitClient) -> Self {
        Self { client }
    }

    /// Get server time.
    ///
    /// # Example
    /// ```ignore
    /// let time = client.spot().v1().server_time().await?;
    /// println!("Server time: {}", time.result.server_time);
    /// ```
    pub async fn server_time(&self) -> Result<LegacyResponse<ServerTime>> {
        self.client.get_public("/spot/v1/time", &Params::new()).await
    }

    /// Place an order. Sent as a signed form body.
    pub async fn post_order(
        &self,
        param: &SpotPostOrderParam,
    ) -> Result<LegacyResponse<SpotPostOrderResult>> {
        self.client
            .post_private("/spot/v1/order", param, BodyEncoding::Form)
            .await
    }

    /// Cancel an order by exchange or client order ID.
    pub async fn cancel_order(
        &self,
        param: &SpotCancelOrderParam,
    ) -> Result<LegacyResponse<SpotCancelOrderResult>> {
        if param.order_id.is_none() && param.order_link_id.is_none() {
            return Err(Error::InvalidParameter(
                "either order_id or order_link_id is required".into(),
            ));
        }

        self.client
            .delete_private("/spot/v1/order", to_params(param)?)
            .await
    }
}
