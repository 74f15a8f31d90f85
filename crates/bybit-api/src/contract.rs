//! Derivatives contract endpoints.

use crate::client::BybitClient;
use crate::error::Result;
use crate::request::{to_params, Params};
use crate::types::{ContractBalances, ContractKlines, KlineParam, LegacyResponse};

/// Contract API.
#[derive(Debug, Clone)]
pub struct ContractApi {
    client: BybitClient,
}

impl ContractApi {
    /// Create a new Contract API instance.
    pub fn new(client: BybitClient) -> Self {
        Self { client }
    }

    /// Get klines.
    pub async fn kline(&self, param: &KlineParam) -> Result<LegacyResponse<ContractKlines>> {
        self.client
            .get_public("/derivatives/v3/public/kline", &to_params(param)?)
            .await
    }

    /// Get the wallet balance of one coin.
    ///
    /// # Arguments
    /// * `coin` - Coin name (e.g., "BTC")
    pub async fn balance(&self, coin: &str) -> Result<LegacyResponse<ContractBalances>> {
        let mut params = Params::new();
        params.insert("coin".to_string(), coin.to_uppercase());

        self.client
            .get_private("/contract/v3/private/account/wallet/balance", params)
            .await
    }
}
