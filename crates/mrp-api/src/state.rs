//! # Application State
//!
//! Shared, read-only state handed to every handler via the `State`
//! extractor. Cloning is cheap: the upstream client wraps a pooled
//! `reqwest::Client` and the token service sits behind an `Arc`.

use std::sync::Arc;

use mrp_upstream::{UpstreamClient, UpstreamError};

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::service::AuthenticatedProxyService;

#[derive(Debug, Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub tokens: Arc<JwtService>,
    pub proxy: AuthenticatedProxyService,
}

impl AppState {
    /// Build the state from loaded configuration.
    pub fn from_config(config: AppConfig) -> Result<Self, UpstreamError> {
        let tokens = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.expire_minutes));
        let upstream = UpstreamClient::new(config.upstream)?;
        Ok(Self::new(upstream, tokens))
    }

    /// Assemble state from parts. The JWT service doubles as the token
    /// decoder used by the proxy.
    pub fn new(upstream: UpstreamClient, tokens: Arc<JwtService>) -> Self {
        let proxy = AuthenticatedProxyService::new(tokens.clone());
        Self {
            upstream,
            tokens,
            proxy,
        }
    }
}
