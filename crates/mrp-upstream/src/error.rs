//! Upstream client error types.

/// Errors from upstream calls.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Transport failure: timeout, refused connection, unreadable body.
    #[error("HTTP error calling {endpoint}: {source}")]
    Unreachable {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The upstream answered with something other than the expected JSON
    /// object, or a documented payload field was missing or mistyped.
    #[error("malformed response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },
    /// The upstream answered but did not report success.
    #[error("upstream {endpoint} rejected the request: {}", detail.as_deref().unwrap_or("no detail"))]
    Rejected {
        endpoint: String,
        detail: Option<String>,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl UpstreamError {
    /// Whether the failure happened before a usable envelope was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Unreachable { .. } | Self::Malformed { .. })
    }

    /// Upstream-provided detail text for a rejection, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_includes_detail() {
        let err = UpstreamError::Rejected {
            endpoint: "block_workorder".into(),
            detail: Some("workorder is done".into()),
        };
        assert!(err.to_string().contains("workorder is done"));
        assert_eq!(err.detail(), Some("workorder is done"));
        assert!(!err.is_transport());
    }

    #[test]
    fn rejected_without_detail_displays_placeholder() {
        let err = UpstreamError::Rejected {
            endpoint: "get_products".into(),
            detail: None,
        };
        assert!(err.to_string().contains("no detail"));
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn malformed_is_transport() {
        let err = UpstreamError::Malformed {
            endpoint: "get_workorder".into(),
            reason: "expected JSON object".into(),
        };
        assert!(err.is_transport());
    }
}
