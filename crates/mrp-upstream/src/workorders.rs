//! Workorder listing and state transitions.
//!
//! Workorder state lives entirely upstream; each command only names the
//! transition requested. All commands are POSTs carrying `employee_id`.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET  | `/get_workorder/` | List workorders |
//! | POST | `/start_workorder/` | Start |
//! | POST | `/pause_workorder/` | Pause |
//! | POST | `/finish_workorder/` | Finish |
//! | POST | `/block_workorder/` | Block with a loss reason |
//! | POST | `/unblock_workorder/` | Unblock |
//! | POST | `/add_components_workorder/` | Add a component |
//! | POST | `/consume_component_workorder/` | Mark a component move consumed |

use serde_json::{json, Value};

use crate::error::UpstreamError;
use crate::operation::{self, Operation};
use crate::transport::Transport;
use crate::types::{OrderQuery, Page};

/// Block request: the workorder, the loss reason and an optional note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRequest {
    pub workorder_id: i64,
    pub loss_id: i64,
    pub description: Option<String>,
}

/// Client for workorders.
#[derive(Debug, Clone)]
pub struct WorkorderClient {
    transport: Transport,
    lang: String,
}

impl WorkorderClient {
    pub(crate) fn new(transport: Transport, lang: String) -> Self {
        Self { transport, lang }
    }

    /// List the workorders visible to `employee_id`.
    pub async fn list(&self, employee_id: &str, query: &OrderQuery) -> Result<Page, UpstreamError> {
        let op = &operation::GET_WORKORDERS;
        let body = query.to_body(employee_id, &self.lang);
        let mut envelope = self.transport.call(op, Some(&body)).await?;
        Ok(Page {
            items: Transport::payload(op, &mut envelope, "workorder_ids")?,
            count: Transport::payload(op, &mut envelope, "count")?,
        })
    }

    pub async fn start(&self, employee_id: &str, workorder_id: i64) -> Result<(), UpstreamError> {
        self.transition(&operation::START_WORKORDER, employee_id, workorder_id)
            .await
    }

    pub async fn pause(&self, employee_id: &str, workorder_id: i64) -> Result<(), UpstreamError> {
        self.transition(&operation::PAUSE_WORKORDER, employee_id, workorder_id)
            .await
    }

    pub async fn finish(&self, employee_id: &str, workorder_id: i64) -> Result<(), UpstreamError> {
        self.transition(&operation::FINISH_WORKORDER, employee_id, workorder_id)
            .await
    }

    pub async fn unblock(&self, employee_id: &str, workorder_id: i64) -> Result<(), UpstreamError> {
        self.transition(&operation::UNBLOCK_WORKORDER, employee_id, workorder_id)
            .await
    }

    /// Block a workorder. A missing description is sent as `null`.
    pub async fn block(&self, employee_id: &str, req: &BlockRequest) -> Result<(), UpstreamError> {
        let body = json!({
            "employee_id": employee_id,
            "workorder_id": req.workorder_id,
            "loss_id": req.loss_id,
            "description": req.description,
        });
        self.command(&operation::BLOCK_WORKORDER, body).await
    }

    /// Add `quantity` of `product_id` to a workorder.
    pub async fn add_component(
        &self,
        employee_id: &str,
        workorder_id: i64,
        product_id: i64,
        quantity: f64,
    ) -> Result<(), UpstreamError> {
        let body = json!({
            "employee_id": employee_id,
            "workorder_id": workorder_id,
            "product_id": product_id,
            "product_qty": quantity,
        });
        self.command(&operation::ADD_COMPONENT, body).await
    }

    /// Mark a raw-material move as consumed or not.
    pub async fn consume_component(
        &self,
        employee_id: &str,
        move_raw_id: i64,
        consumed: bool,
    ) -> Result<(), UpstreamError> {
        let body = json!({
            "employee_id": employee_id,
            "move_id": move_raw_id,
            "picked": consumed,
        });
        self.command(&operation::CONSUME_COMPONENT, body).await
    }

    async fn transition(
        &self,
        op: &Operation,
        employee_id: &str,
        workorder_id: i64,
    ) -> Result<(), UpstreamError> {
        let body = json!({ "employee_id": employee_id, "workorder_id": workorder_id });
        self.command(op, body).await
    }

    async fn command(&self, op: &Operation, body: Value) -> Result<(), UpstreamError> {
        self.transport.call(op, Some(&body)).await.map(|_| ())
    }
}
