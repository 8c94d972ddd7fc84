//! # Authenticated Proxy
//!
//! The one routine every handler goes through: check the caller's
//! credential when the operation needs an identity, make exactly one
//! upstream call, and translate the outcome using the operation descriptor.
//!
//! ```text
//! bearer ─▶ decode ─▶ upstream call ─▶ envelope ─▶ typed result | AppError
//!             │
//!             └─ missing / invalid ─▶ 403, no upstream call
//! ```

use std::future::Future;
use std::sync::Arc;

use mrp_upstream::{Operation, UpstreamError};

use crate::auth::{BearerToken, Claim, TokenDecoder};
use crate::error::AppError;

/// Validates credentials and forwards operations upstream.
#[derive(Clone)]
pub struct AuthenticatedProxyService {
    decoder: Arc<dyn TokenDecoder>,
}

impl std::fmt::Debug for AuthenticatedProxyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedProxyService").finish_non_exhaustive()
    }
}

/// Who an operation runs for. Public operations run anonymously even when
/// a credential is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    Employee(Claim),
}

impl Caller {
    /// Upstream employee id of the caller; empty for anonymous calls.
    pub fn employee_id(&self) -> &str {
        match self {
            Caller::Employee(claim) => &claim.subject,
            Caller::Anonymous => "",
        }
    }
}

impl AuthenticatedProxyService {
    pub fn new(decoder: Arc<dyn TokenDecoder>) -> Self {
        Self { decoder }
    }

    /// Resolve the caller for `op`. Only operations whose descriptor
    /// requires an identity look at the bearer credential.
    pub fn caller(&self, op: &Operation, bearer: &BearerToken) -> Result<Caller, AppError> {
        if !op.requires_identity {
            return Ok(Caller::Anonymous);
        }
        let claim = bearer
            .as_deref()
            .and_then(|token| self.decoder.decode(token))
            .filter(|claim| !claim.subject.is_empty());
        match claim {
            Some(claim) => Ok(Caller::Employee(claim)),
            None => {
                tracing::debug!(operation = op.name, "rejecting unauthenticated call");
                Err(AppError::Unauthenticated)
            }
        }
    }

    /// Run one upstream operation. `call` is never invoked when the
    /// descriptor requires an identity and the credential does not yield one.
    pub async fn run<T, F, Fut>(
        &self,
        op: &Operation,
        bearer: &BearerToken,
        call: F,
    ) -> Result<T, AppError>
    where
        F: FnOnce(Caller) -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        let caller = self.caller(op, bearer)?;
        call(caller).await.map_err(|err| translate(op, err))
    }
}

/// Map an upstream failure to the status and message the descriptor names.
pub fn translate(op: &Operation, err: UpstreamError) -> AppError {
    if err.is_transport() {
        return AppError::UpstreamUnreachable {
            status: op.unreachable_status,
            message: op.default_message.to_string(),
        };
    }
    match err {
        UpstreamError::Config(e) => AppError::Internal(e.to_string()),
        rejected => AppError::UpstreamRejected {
            status: op.rejected_status,
            message: op.rejection_message(rejected.detail()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrp_upstream::operation;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Decodes a fixed set of literal tokens.
    struct FixedDecoder;

    impl TokenDecoder for FixedDecoder {
        fn decode(&self, token: &str) -> Option<Claim> {
            match token {
                "good" => Some(Claim {
                    subject: "7".into(),
                }),
                "empty" => Some(Claim {
                    subject: String::new(),
                }),
                _ => None,
            }
        }
    }

    fn service() -> AuthenticatedProxyService {
        AuthenticatedProxyService::new(Arc::new(FixedDecoder))
    }

    fn bearer(token: &str) -> BearerToken {
        BearerToken(Some(token.to_string()))
    }

    #[tokio::test]
    async fn valid_token_forwards_subject() {
        let subject = service()
            .run(&operation::START_WORKORDER, &bearer("good"), |caller| async move {
                Ok::<_, UpstreamError>(caller.employee_id().to_string())
            })
            .await
            .unwrap();
        assert_eq!(subject, "7");
    }

    #[tokio::test]
    async fn missing_invalid_or_empty_tokens_never_call_upstream() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let identity_ops = operation::ALL.iter().filter(|op| op.requires_identity);
        for op in identity_ops {
            for token in [BearerToken(None), bearer("bad"), bearer("empty")] {
                let err = service()
                    .run(op, &token, move |_| async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, UpstreamError>(())
                    })
                    .await
                    .unwrap_err();
                assert!(matches!(err, AppError::Unauthenticated), "{}", op.name);
            }
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn public_operations_run_without_token() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let public_ops = operation::ALL.iter().filter(|op| !op.requires_identity);
        for op in public_ops {
            let caller = service()
                .run(op, &BearerToken(None), move |caller| async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, UpstreamError>(caller)
                })
                .await
                .unwrap();
            assert_eq!(caller, Caller::Anonymous, "{}", op.name);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn public_operation_ignores_invalid_token() {
        let items = service()
            .run(&operation::GET_PRODUCTS, &bearer("bad"), |_| async {
                Ok::<_, UpstreamError>(vec![1, 2])
            })
            .await
            .unwrap();
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn rejection_without_detail_uses_default() {
        let err = translate(
            &operation::BLOCK_WORKORDER,
            UpstreamError::Rejected {
                endpoint: "block_workorder".into(),
                detail: None,
            },
        );
        match err {
            AppError::UpstreamRejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "order not found");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejection_detail_is_echoed() {
        let err = translate(
            &operation::FINISH_WORKORDER,
            UpstreamError::Rejected {
                endpoint: "finish_workorder".into(),
                detail: Some("Missing components".into()),
            },
        );
        assert!(matches!(
            err,
            AppError::UpstreamRejected { status: 400, ref message } if message == "Missing components"
        ));
    }

    #[test]
    fn malformed_maps_to_unreachable_with_default_message() {
        let err = translate(
            &operation::GET_PRODUCTS,
            UpstreamError::Malformed {
                endpoint: "get_products".into(),
                reason: "expected JSON object".into(),
            },
        );
        assert!(matches!(
            err,
            AppError::UpstreamUnreachable { status: 400, ref message } if message == "upstream request error"
        ));
    }

    #[test]
    fn lookup_rejection_is_server_error() {
        let err = translate(
            &operation::GET_REASONS_LOSS,
            UpstreamError::Rejected {
                endpoint: "get_reasons_loss".into(),
                detail: None,
            },
        );
        assert!(matches!(err, AppError::UpstreamRejected { status: 500, .. }));
    }
}
