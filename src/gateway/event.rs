//! Gateway event contract.
//!
//! These are the value shapes exchanged with the front-end gateway layer:
//! the normalized inbound request description and the response shape
//! handed back to it. All of them live for a single invocation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Normalized inbound request description supplied by the gateway layer.
///
/// Every field is optional; the all-absent event is valid and resolves to
/// a GET request for "/".
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct InboundEvent {
    /// HTTP method. Absent means GET.
    pub method: Option<String>,

    /// Request path. Takes precedence over `resource_path`.
    pub path: Option<String>,

    /// Fallback path used when `path` is absent.
    pub resource_path: Option<String>,

    /// Query parameters in insertion order.
    pub query_parameters: Option<IndexMap<String, String>>,

    /// Request headers, forwarded verbatim.
    pub headers: Option<IndexMap<String, String>>,

    /// Request body: a raw string or any JSON value.
    pub body: Option<EventBody>,
}

/// Inbound request body.
///
/// A JSON string stays a string and is forwarded byte-identical; any other
/// JSON value is serialized to its compact JSON text before sending.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum EventBody {
    /// Raw string body, sent verbatim.
    Text(String),
    /// Structured body, serialized to JSON text.
    Json(serde_json::Value),
}

impl EventBody {
    /// Render the body as the outbound payload.
    ///
    /// Empty string bodies count as absent, matching the gateway contract.
    pub fn as_payload(&self) -> Option<String> {
        match self {
            EventBody::Text(s) if s.is_empty() => None,
            EventBody::Text(s) => Some(s.clone()),
            EventBody::Json(value) => Some(value.to_string()),
        }
    }
}

impl From<&str> for EventBody {
    fn from(s: &str) -> Self {
        EventBody::Text(s.to_string())
    }
}

impl From<serde_json::Value> for EventBody {
    fn from(value: serde_json::Value) -> Self {
        EventBody::Json(value)
    }
}

/// Response contract returned to the gateway layer.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutboundResponse {
    /// Upstream status code, passed through unmodified.
    pub status_code: u16,

    /// Full buffered upstream body.
    pub body: String,

    /// Response headers. Present only when the CORS flag is enabled, and
    /// then carries exactly the allow-all origin header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, String>>,
}
