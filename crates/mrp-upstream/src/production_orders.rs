//! Production order listing.
//!
//! `GET /get_production_order/` returns `production_order_ids` and `count`.

use crate::error::UpstreamError;
use crate::operation::GET_PRODUCTION_ORDERS;
use crate::transport::Transport;
use crate::types::{OrderQuery, Page};

/// Client for production orders.
#[derive(Debug, Clone)]
pub struct ProductionOrderClient {
    transport: Transport,
    lang: String,
}

impl ProductionOrderClient {
    pub(crate) fn new(transport: Transport, lang: String) -> Self {
        Self { transport, lang }
    }

    /// List the production orders visible to `employee_id`.
    pub async fn list(&self, employee_id: &str, query: &OrderQuery) -> Result<Page, UpstreamError> {
        let op = &GET_PRODUCTION_ORDERS;
        let body = query.to_body(employee_id, &self.lang);
        let mut envelope = self.transport.call(op, Some(&body)).await?;
        Ok(Page {
            items: Transport::payload(op, &mut envelope, "production_order_ids")?,
            count: Transport::payload(op, &mut envelope, "count")?,
        })
    }
}
