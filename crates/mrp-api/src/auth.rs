//! # Session Tokens
//!
//! Login issues an HS256 JWT whose subject is the upstream employee id.
//! Every identity-requiring operation decodes the bearer credential through
//! the [`TokenDecoder`] capability and forwards the subject upstream as
//! `employee_id`.
//!
//! ```text
//! Authorization: Bearer <jwt>
//! ```
//!
//! Extraction never fails the request on its own: a missing or non-bearer
//! header yields `BearerToken(None)`, and the proxy service decides whether
//! the operation needs it.

use std::convert::Infallible;

use axum::http::request::Parts;
use axum::http::header;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Identity claim taken from a validated credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub subject: String,
}

/// Turns a bearer credential into an identity claim.
///
/// Returns `None` for anything that does not validate: bad signature,
/// expired, malformed, or an empty subject.
pub trait TokenDecoder: Send + Sync {
    fn decode(&self, token: &str) -> Option<Claim>;
}

/// JWT claims carried in the session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Upstream employee id.
    pub sub: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

/// Errors issuing a token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token subject must not be empty")]
    EmptySubject,
    #[error("jwt encode: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

/// HS256 issuer and verifier for session tokens.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expire_secs: i64,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("keys", &"[REDACTED]")
            .field("expire_secs", &self.expire_secs)
            .finish()
    }
}

impl JwtService {
    /// Create a service signing with `secret`; tokens live `expire_minutes`.
    pub fn new(secret: &Zeroizing<String>, expire_minutes: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expire_secs: expire_minutes.saturating_mul(60),
        }
    }

    /// Issue a signed token for `subject`.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::EmptySubject);
        }
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(self.expire_secs),
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
    }
}

impl TokenDecoder for JwtService {
    fn decode(&self, token: &str) -> Option<Claim> {
        match self.verify(token) {
            Ok(claims) if !claims.sub.is_empty() => Some(Claim {
                subject: claims.sub,
            }),
            Ok(_) => {
                tracing::warn!("bearer token has an empty subject");
                None
            }
            Err(e) => {
                tracing::warn!(reason = %e, "bearer token rejected");
                None
            }
        }
    }
}

/// Bearer credential from the `Authorization` header, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for BearerToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_bearer)
            .map(str::to_string);
        Ok(Self(token))
    }
}

/// Strip the `Bearer` scheme, case-insensitively. Empty tokens are ignored.
fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str, minutes: i64) -> JwtService {
        JwtService::new(&Zeroizing::new(secret.to_string()), minutes)
    }

    #[test]
    fn issue_and_decode() {
        let svc = service("test-secret", 600);
        let token = svc.issue("7").unwrap();
        assert_eq!(
            svc.decode(&token),
            Some(Claim {
                subject: "7".into()
            })
        );
    }

    #[test]
    fn expiry_follows_configured_minutes() {
        let svc = service("test-secret", 600);
        let claims = svc.verify(&svc.issue("7").unwrap()).unwrap();
        assert_eq!(claims.exp - claims.iat, 600 * 60);
    }

    #[test]
    fn empty_subject_is_not_issued() {
        let svc = service("test-secret", 600);
        assert!(matches!(svc.issue(""), Err(TokenError::EmptySubject)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let svc = service("test-secret", 600);
        assert_eq!(svc.decode("invalid.token.here"), None);
        assert_eq!(svc.decode(""), None);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = service("secret-a", 600);
        let verifier = service("secret-b", 600);
        let token = issuer.issue("7").unwrap();
        assert_eq!(verifier.decode(&token), None);
    }

    #[test]
    fn expired_token_is_rejected() {
        // Expired 5 minutes ago, past the default leeway.
        let svc = service("test-secret", -5);
        let token = svc.issue("7").unwrap();
        assert_eq!(svc.decode(&token), None);
    }

    #[test]
    fn token_with_empty_subject_is_rejected() {
        let svc = service("test-secret", 600);
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: String::new(),
            iat: now,
            exp: now + 600,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert_eq!(svc.decode(&token), None);
    }

    #[test]
    fn parse_bearer_variants() {
        assert_eq!(parse_bearer("Bearer abc"), Some("abc"));
        assert_eq!(parse_bearer("bearer abc"), Some("abc"));
        assert_eq!(parse_bearer("Basic abc"), None);
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("Bearer"), None);
    }

    #[test]
    fn debug_redacts_keys() {
        let printed = format!("{:?}", service("very-secret", 600));
        assert!(!printed.contains("very-secret"));
    }
}
