//! V5 unified trading endpoints.

mod order;

pub use order::*;

use crate::client::BybitClient;

/// V5 API client wrapper.
#[derive(Debug, Clone)]
pub struct V5Api {
    client: BybitClient,
}

impl V5Api {
    /// Create a new V5 API client.
    pub fn new(client: BybitClient) -> Self {
        Self { client }
    }

    /// Get the underlying HTTP client.
    pub fn client(&self) -> &BybitClient {
        &self.client
    }

    /// Get order API.
    pub fn order(&self) -> OrderApi {
        OrderApi::new(self.client.clone())
    }
}
