//! Types shared across resource clients.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

/// Filters and pagination for the production order and workorder listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderQuery {
    /// Free-text search; sent as `false` when absent.
    pub order_search: Option<String>,
    pub show_all_state: bool,
    /// Offset, forwarded as `start`.
    pub start: u64,
    pub limit: u64,
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self {
            order_search: None,
            show_all_state: false,
            start: 0,
            limit: 100,
        }
    }
}

impl OrderQuery {
    /// Outbound body for a listing on behalf of `employee_id`.
    pub fn to_body(&self, employee_id: &str, lang: &str) -> Value {
        let order_search = match self.order_search.as_deref() {
            Some(s) if !s.is_empty() => Value::from(s),
            _ => Value::Bool(false),
        };
        json!({
            "employee_id": employee_id,
            "order_search": order_search,
            "show_all_state": self.show_all_state,
            "lang": lang,
            "start": self.start,
            "limit": self.limit,
        })
    }
}

/// One page of a listing: items as the upstream sent them, plus the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<Value>,
    pub count: u64,
}

/// Deserialize an optional field the upstream encodes as `false` when unset.
pub(crate) fn false_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OrFalse<T> {
        Value(T),
        False(bool),
    }

    match Option::<OrFalse<T>>::deserialize(deserializer)? {
        Some(OrFalse::Value(v)) => Ok(Some(v)),
        Some(OrFalse::False(false)) | None => Ok(None),
        Some(OrFalse::False(true)) => {
            Err(serde::de::Error::custom("expected a value or `false`"))
        }
    }
}
