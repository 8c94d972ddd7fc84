//! The single routine every upstream operation goes through.

use serde_json::Value;
use url::Url;

use crate::envelope::Envelope;
use crate::error::UpstreamError;
use crate::operation::{Operation, UpstreamMethod};

/// Shared HTTP handle plus base URL, cloned into every resource client.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: Url,
}

impl Transport {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Full URL for an operation: the base URL with the operation path
    /// appended. Any path the base URL carries is kept.
    pub(crate) fn url_for(&self, op: &Operation) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), op.path)
    }

    /// Issue exactly one request for `op` and return the successful envelope.
    ///
    /// The HTTP status code is not consulted: the upstream reports failures
    /// inside the body. Transport and shape failures are logged here once;
    /// rejections are returned silently.
    pub(crate) async fn call(
        &self,
        op: &Operation,
        body: Option<&Value>,
    ) -> Result<Envelope, UpstreamError> {
        let url = self.url_for(op);
        let mut request = match op.method {
            UpstreamMethod::Get => self.http.get(&url),
            UpstreamMethod::Post => self.http.post(&url),
        };
        if let Some(body) = body {
            request = request.json(body);
        }

        let value: Value = match request.send().await {
            Ok(resp) => resp.json::<Value>().await,
            Err(e) => Err(e),
        }
        .map_err(|e| {
            tracing::error!(
                operation = op.name,
                endpoint = %url,
                error = %e,
                "upstream request failed"
            );
            UpstreamError::Unreachable {
                endpoint: op.name.to_string(),
                source: e,
            }
        })?;

        let envelope = Envelope::from_value(value).map_err(|other| {
            let err = UpstreamError::Malformed {
                endpoint: op.name.to_string(),
                reason: format!("expected JSON object, got {other}"),
            };
            tracing::error!(
                operation = op.name,
                endpoint = %url,
                error = %err,
                "upstream response malformed"
            );
            err
        })?;

        if !envelope.satisfies(op.success) {
            return Err(UpstreamError::Rejected {
                endpoint: op.name.to_string(),
                detail: envelope.detail().map(str::to_string),
            });
        }

        Ok(envelope)
    }

    /// Extract a payload field from a successful envelope, logging a
    /// malformed payload the same way as a malformed body.
    pub(crate) fn payload<T: serde::de::DeserializeOwned>(
        op: &Operation,
        envelope: &mut Envelope,
        field: &str,
    ) -> Result<T, UpstreamError> {
        envelope.take(op.name, field).map_err(|err| {
            tracing::error!(operation = op.name, error = %err, "upstream payload malformed");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation;

    fn transport(base: &str) -> Transport {
        Transport::new(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn url_keeps_base_path() {
        let t = transport("https://erp.example.com/hemago");
        assert_eq!(
            t.url_for(&operation::GET_PRODUCTS),
            "https://erp.example.com/hemago/get_products/"
        );
    }

    #[test]
    fn url_does_not_double_slash() {
        let t = transport("http://127.0.0.1:8069/");
        assert_eq!(
            t.url_for(&operation::START_WORKORDER),
            "http://127.0.0.1:8069/start_workorder/"
        );
    }
}
