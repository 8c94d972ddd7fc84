//! The JSON object every upstream response is wrapped in.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::UpstreamError;
use crate::operation::SuccessRule;

/// Status value the upstream uses to report success.
pub const STATUS_SUCCESS: &str = "success";

/// An upstream response body: a JSON object with a `status` discriminator
/// and per-operation payload fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope(Map<String, Value>);

impl Envelope {
    /// Wrap a parsed response body. Anything other than a JSON object is
    /// rejected.
    pub fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }

    /// The `status` discriminator, if it is a string.
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    /// Upstream-provided failure detail.
    pub fn detail(&self) -> Option<&str> {
        self.0.get("detail").and_then(Value::as_str)
    }

    /// Whether the envelope reports success under `rule`.
    ///
    /// The upstream answers `false` for fields it has no value for, so
    /// `null`, `false` and empty strings/objects count as absent.
    pub fn satisfies(&self, rule: SuccessRule) -> bool {
        match rule {
            SuccessRule::Status => self.status() == Some(STATUS_SUCCESS),
            SuccessRule::Field(name) => self.0.get(name).is_some_and(is_present),
        }
    }

    /// Take a payload field and deserialize it into `T`.
    pub fn take<T: DeserializeOwned>(
        &mut self,
        endpoint: &str,
        name: &str,
    ) -> Result<T, UpstreamError> {
        let value = self.0.remove(name).ok_or_else(|| UpstreamError::Malformed {
            endpoint: endpoint.to_string(),
            reason: format!("missing field `{name}`"),
        })?;
        serde_json::from_value(value).map_err(|e| UpstreamError::Malformed {
            endpoint: endpoint.to_string(),
            reason: format!("field `{name}`: {e}"),
        })
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> Envelope {
        Envelope::from_value(value).unwrap()
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert!(Envelope::from_value(json!([1, 2])).is_err());
        assert!(Envelope::from_value(json!("success")).is_err());
        assert!(Envelope::from_value(Value::Null).is_err());
    }

    #[test]
    fn status_rule_requires_exact_success() {
        assert!(envelope(json!({"status": "success"})).satisfies(SuccessRule::Status));
        assert!(!envelope(json!({"status": "error"})).satisfies(SuccessRule::Status));
        assert!(!envelope(json!({"status": "SUCCESS"})).satisfies(SuccessRule::Status));
        assert!(!envelope(json!({})).satisfies(SuccessRule::Status));
        assert!(!envelope(json!({"status": true})).satisfies(SuccessRule::Status));
    }

    #[test]
    fn field_rule_treats_false_and_empty_as_absent() {
        let rule = SuccessRule::Field("employee");
        assert!(envelope(json!({"employee": {"id": 7}})).satisfies(rule));
        assert!(!envelope(json!({"employee": false})).satisfies(rule));
        assert!(!envelope(json!({"employee": null})).satisfies(rule));
        assert!(!envelope(json!({"employee": {}})).satisfies(rule));
        assert!(!envelope(json!({"status": "success"})).satisfies(rule));
    }

    #[test]
    fn detail_is_read_verbatim() {
        let env = envelope(json!({"status": "error", "detail": "Workorder is already done"}));
        assert_eq!(env.detail(), Some("Workorder is already done"));
        assert_eq!(envelope(json!({"status": "error", "detail": false})).detail(), None);
    }

    #[test]
    fn take_reports_missing_and_mistyped_fields() {
        let mut env = envelope(json!({"status": "success", "count": "three"}));
        let missing = env.take::<Vec<Value>>("get_workorder", "workorder_ids").unwrap_err();
        assert!(matches!(missing, UpstreamError::Malformed { .. }));
        let mistyped = env.take::<u64>("get_workorder", "count").unwrap_err();
        assert!(mistyped.to_string().contains("count"));
    }

    #[test]
    fn take_moves_value_out() {
        let mut env = envelope(json!({"status": "success", "count": 3}));
        assert_eq!(env.take::<u64>("x", "count").unwrap(), 3);
        let again = env.take::<u64>("x", "count").unwrap_err();
        assert!(again.to_string().contains("missing field `count`"));
    }
}
