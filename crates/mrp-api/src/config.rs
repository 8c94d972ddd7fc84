//! # Application Configuration
//!
//! Built once at startup from the environment (after an optional `.env`)
//! and the upstream config file. Never mutated afterwards.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `MRP_CONFIG` | `mrp.conf` | Path of the INI file with `[settings_odoo]` |
//! | `TOKEN_ODOO` | required | Shared secret sent upstream as `Auth-Token` |
//! | `SECRET_KEY` | required | JWT signing secret |
//! | `ACCESS_TOKEN_EXPIRE_MINUTES` | `600` | Session token lifetime |
//! | `PORT` | `8080` | Listen port |

use mrp_upstream::config::ConfigError as UpstreamConfigError;
use mrp_upstream::UpstreamConfig;
use zeroize::Zeroizing;

pub const DEFAULT_CONFIG_PATH: &str = "mrp.conf";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_EXPIRE_MINUTES: i64 = 600;

/// Session token settings.
///
/// Custom `Debug` redacts the signing secret.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Zeroizing<String>,
    pub expire_minutes: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expire_minutes", &self.expire_minutes)
            .finish()
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    pub upstream: UpstreamConfig,
    pub jwt: JwtConfig,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum AppConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
    #[error("cannot load .env file: {0}")]
    DotEnv(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamConfigError),
}

impl AppConfig {
    /// Load `.env` if present, then build from the process environment.
    pub fn load() -> Result<Self, AppConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(AppConfigError::DotEnv(e.to_string())),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, AppConfigError> {
        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppConfigError::Invalid("PORT", raw))?,
            None => DEFAULT_PORT,
        };

        let expire_minutes = match get("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(raw) => match raw.parse::<i64>() {
                Ok(m) if m > 0 => m,
                _ => return Err(AppConfigError::Invalid("ACCESS_TOKEN_EXPIRE_MINUTES", raw)),
            },
            None => DEFAULT_EXPIRE_MINUTES,
        };

        let secret = get("SECRET_KEY")
            .filter(|s| !s.is_empty())
            .ok_or(AppConfigError::Missing("SECRET_KEY"))?;

        let api_token = get("TOKEN_ODOO")
            .filter(|s| !s.is_empty())
            .ok_or(AppConfigError::Missing("TOKEN_ODOO"))?;

        let path = get("MRP_CONFIG").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        let upstream = UpstreamConfig::from_file(path, api_token)?;

        Ok(Self {
            port,
            upstream,
            jwt: JwtConfig {
                secret: Zeroizing::new(secret),
                expire_minutes,
            },
        })
    }
}
