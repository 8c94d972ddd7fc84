//! # mrp-upstream -- Typed Rust client for the upstream MRP system
//!
//! Provides typed access to the manufacturing operations the upstream Odoo
//! instance exposes:
//! - **Employees**: login, profile, password reset
//! - **Production orders**: paginated listing
//! - **Workorders**: listing and state transitions
//! - **Catalogs**: loss reasons and products
//!
//! ## Architecture
//!
//! Every call is described by a constant [`operation::Operation`] and goes
//! through one routine that attaches the shared service secret, sends one
//! request, and turns the JSON [`envelope::Envelope`] into a typed result or
//! an [`UpstreamError`]. Nothing is retried.
//!
//! The upstream reports failures in the body, not the HTTP status:
//!
//! ```json
//! {"status": "error", "detail": "Workorder is already done"}
//! ```

pub mod catalog;
pub mod config;
pub mod employees;
pub mod envelope;
pub mod error;
pub mod operation;
pub mod production_orders;
pub(crate) mod transport;
pub mod types;
pub mod workorders;

pub use config::UpstreamConfig;
pub use employees::Employee;
pub use error::UpstreamError;
pub use operation::Operation;
pub use types::{OrderQuery, Page};

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

/// Header carrying the shared service secret (`Auth-Token`).
pub const AUTH_TOKEN_HEADER: &str = "auth-token";

/// Top-level upstream client. Holds one sub-client per resource, all
/// sharing a single connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    employees: employees::EmployeeClient,
    production_orders: production_orders::ProductionOrderClient,
    workorders: workorders::WorkorderClient,
    catalog: catalog::CatalogClient,
}

impl UpstreamClient {
    /// Create a new upstream client from configuration.
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(config.api_token.as_str())
            .map_err(|_| UpstreamError::Config(config::ConfigError::MissingToken))?;
        token.set_sensitive(true);
        headers.insert(HeaderName::from_static(AUTH_TOKEN_HEADER), token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| UpstreamError::Unreachable {
                endpoint: "client_init".into(),
                source: e,
            })?;

        let transport = transport::Transport::new(http, config.base_url);

        Ok(Self {
            employees: employees::EmployeeClient::new(transport.clone()),
            production_orders: production_orders::ProductionOrderClient::new(
                transport.clone(),
                config.lang.clone(),
            ),
            workorders: workorders::WorkorderClient::new(transport.clone(), config.lang),
            catalog: catalog::CatalogClient::new(transport),
        })
    }

    /// Access the employees client.
    pub fn employees(&self) -> &employees::EmployeeClient {
        &self.employees
    }

    /// Access the production orders client.
    pub fn production_orders(&self) -> &production_orders::ProductionOrderClient {
        &self.production_orders
    }

    /// Access the workorders client.
    pub fn workorders(&self) -> &workorders::WorkorderClient {
        &self.workorders
    }

    /// Access the public catalogs client.
    pub fn catalog(&self) -> &catalog::CatalogClient {
        &self.catalog
    }
}
