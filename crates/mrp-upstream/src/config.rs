//! Upstream client configuration.
//!
//! The base URL lives in an INI-style config file under the
//! `[settings_odoo]` section; the shared service secret comes from the
//! `TOKEN_ODOO` environment variable. Both are read once at startup.
//!
//! `url_odoo` is the full base URL, including the `/hemago` controller
//! prefix; operation paths are appended to it verbatim. Older config files
//! that list only the host (the prefix used to be appended in code) must
//! move `/hemago` into `url_odoo` when upgrading, or every call will hit
//! the wrong path.
//!
//! ```ini
//! [settings_odoo]
//! url_odoo = https://erp.example.com/hemago
//! lang = es_MX
//! timeout_secs = 100
//! ```

use std::collections::HashMap;
use std::path::Path;

use url::Url;
use zeroize::Zeroizing;

/// Section of the config file holding the upstream settings.
pub const SECTION: &str = "settings_odoo";

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 100;

/// Default language forwarded on list queries.
pub const DEFAULT_LANG: &str = "es_MX";

/// Configuration for connecting to the upstream MRP system.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct UpstreamConfig {
    /// Base URL every operation path is appended to.
    pub base_url: Url,
    /// Shared service secret, sent as the `Auth-Token` header.
    pub api_token: Zeroizing<String>,
    /// Language code forwarded on list queries.
    pub lang: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .field("lang", &self.lang)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl UpstreamConfig {
    /// Load configuration from the config file at `path` plus the
    /// `TOKEN_ODOO` environment variable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let api_token = std::env::var("TOKEN_ODOO").map_err(|_| ConfigError::MissingToken)?;
        Self::from_file(path, api_token)
    }

    /// Read the config file at `path` and pair it with `api_token`.
    pub fn from_file(path: impl AsRef<Path>, api_token: String) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e.to_string()))?;
        Self::from_ini(&contents, api_token)
    }

    /// Build configuration from INI text and an explicit shared secret.
    pub fn from_ini(contents: &str, api_token: String) -> Result<Self, ConfigError> {
        if api_token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        let settings = parse_section(contents, SECTION);
        let raw_url = settings
            .get("url_odoo")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingKey(format!("{SECTION}.url_odoo")))?;
        let base_url = Url::parse(raw_url)
            .map_err(|e| ConfigError::InvalidUrl("url_odoo".to_string(), e.to_string()))?;

        let timeout_secs = match settings.get("timeout_secs") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidValue("timeout_secs".to_string(), raw.clone())),
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            api_token: Zeroizing::new(api_token),
            lang: settings
                .get("lang")
                .cloned()
                .unwrap_or_else(|| DEFAULT_LANG.to_string()),
            timeout_secs,
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be parsed.
    pub fn local_mock(base_url: &str, token: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Url::parse(base_url)
                .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?,
            api_token: Zeroizing::new(token.to_string()),
            lang: DEFAULT_LANG.to_string(),
            timeout_secs: 5,
        })
    }
}

/// Collect the `key = value` pairs of one INI section.
///
/// Keys are lower-cased; `#` and `;` start comment lines; both `=` and `:`
/// are accepted as separators.
fn parse_section(contents: &str, section: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    let mut in_section = false;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = name.trim() == section;
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some((key, value)) = line.split_once(|c: char| c == '=' || c == ':') {
            values.insert(key.trim().to_lowercase(), value.trim().to_string());
        }
    }

    values
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TOKEN_ODOO environment variable is required")]
    MissingToken,
    #[error("missing config key {0}")]
    MissingKey(String),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
    #[error("cannot read config file {0}: {1}")]
    Read(String, String),
}
