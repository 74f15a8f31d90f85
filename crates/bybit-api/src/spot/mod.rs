//! Spot endpoints.

mod v1;

pub use v1::*;

use crate::client::BybitClient;

/// Spot API client wrapper.
#[derive(Debug, Clone)]
pub struct SpotApi {
    client: BybitClient,
}

impl SpotApi {
    /// Create a new Spot API client.
    pub fn new(client: BybitClient) -> Self {
        Self { client }
    }

    /// Get the underlying HTTP client.
    pub fn client(&self) -> &BybitClient {
        &self.client
    }

    /// Get the legacy spot v1 API.
    pub fn v1(&self) -> SpotV1Api {
        SpotV1Api::new(self.client.clone())
    }
}
