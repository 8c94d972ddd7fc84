//! Public lookup catalogs: loss reasons and products.
//!
//! Neither call carries an identity or a body.

use serde_json::Value;

use crate::error::UpstreamError;
use crate::operation::{GET_PRODUCTS, GET_REASONS_LOSS};
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct CatalogClient {
    transport: Transport,
}

impl CatalogClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Reasons a workorder can be blocked for (`loss_ids`).
    pub async fn reasons_loss(&self) -> Result<Vec<Value>, UpstreamError> {
        let mut envelope = self.transport.call(&GET_REASONS_LOSS, None).await?;
        Transport::payload(&GET_REASONS_LOSS, &mut envelope, "loss_ids")
    }

    /// Products that can be added to a workorder (`product_ids`).
    pub async fn products(&self) -> Result<Vec<Value>, UpstreamError> {
        let mut envelope = self.transport.call(&GET_PRODUCTS, None).await?;
        Transport::payload(&GET_PRODUCTS, &mut envelope, "product_ids")
    }
}
