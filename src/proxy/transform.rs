//! Request and response transformation.
//!
//! # Responsibilities
//! - Map (event, config) to the outbound request descriptor
//! - Resolve the path: exclude-prefix strip, literal prefix, query string
//! - Map the buffered upstream response back to the gateway contract
//!
//! # Design Decisions
//! - Pure functions over value types; the network leg lives in `upstream`
//! - Prefix concatenation is literal: no slash normalization is applied,
//!   callers own correct slash placement
//! - Percent-encoding applies to query keys and values only, never to
//!   path segments or header values

use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::ProxyConfig;
use crate::gateway::event::{InboundEvent, OutboundResponse};
use crate::proxy::upstream::UpstreamResponse;

/// Body of the synchronous 500 returned for an absent event.
pub const NULL_EVENT_BODY: &str = "Invalid configuration. Event is null!";

/// The allow-all CORS response header, the only header ever produced.
pub const CORS_HEADER_NAME: &str = "Access-Control-Allow-Origin";

/// Query keys and values are encoded as URI components: alphanumerics and
/// the unreserved marks stay literal, everything else is percent-encoded.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Outbound request scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// Deterministic descriptor of the request to issue upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub scheme: Scheme,
    pub host: String,
    /// Port override; `None` falls back to the scheme default.
    pub port: Option<u16>,
    pub method: String,
    /// Path including the query string when one is present.
    pub path_and_query: String,
    /// Headers copied verbatim from the event.
    pub headers: IndexMap<String, String>,
    pub body: Option<String>,
}

impl OutboundRequest {
    /// Render the full upstream URL.
    pub fn url(&self) -> String {
        let mut url = format!("{}://{}", self.scheme.as_str(), self.host);
        if let Some(port) = self.port {
            url.push(':');
            url.push_str(&port.to_string());
        }
        url.push_str(&self.path_and_query);
        url
    }
}

/// Build the outbound request descriptor for an event.
///
/// The mapping is total: every event yields a descriptor. The absent-event
/// short circuit is handled by the service before this is reached.
pub fn build_outbound(event: &InboundEvent, config: &ProxyConfig) -> OutboundRequest {
    let scheme = if config.use_https {
        Scheme::Https
    } else {
        Scheme::Http
    };

    let method = event
        .method
        .as_deref()
        .unwrap_or("GET")
        .to_ascii_uppercase();

    let headers = event.headers.clone().unwrap_or_default();

    let mut path = resolve_path(event, config);
    if let Some(params) = &event.query_parameters {
        if !params.is_empty() {
            let query = encode_query(params);
            if !query.is_empty() {
                path.push('?');
                path.push_str(&query);
            }
        }
    }

    let body = event.body.as_ref().and_then(|b| b.as_payload());

    OutboundRequest {
        scheme,
        host: config.target_host.clone(),
        port: config.target_port,
        method,
        path_and_query: path,
        headers,
        body,
    }
}

/// Resolve the outbound path before the query string is attached.
fn resolve_path(event: &InboundEvent, config: &ProxyConfig) -> String {
    let base = event
        .path
        .as_deref()
        .filter(|p| !p.is_empty())
        .or_else(|| event.resource_path.as_deref().filter(|p| !p.is_empty()))
        .unwrap_or("/");

    // Strict prefix match; a fully stripped path stays empty.
    let stripped = match &config.exclude_path_prefix {
        Some(exclude) => base.strip_prefix(exclude.as_str()).unwrap_or(base),
        None => base,
    };

    match &config.path_prefix {
        Some(prefix) => format!("{prefix}{stripped}"),
        None => stripped.to_string(),
    }
}

/// Encode query parameters in insertion order.
fn encode_query(params: &IndexMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_COMPONENT),
                utf8_percent_encode(value, QUERY_COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Shape the buffered upstream response into the gateway contract.
pub fn shape_response(upstream: UpstreamResponse, config: &ProxyConfig) -> OutboundResponse {
    let headers = config.add_cors_header.then(|| {
        let mut headers = IndexMap::new();
        headers.insert(CORS_HEADER_NAME.to_string(), "*".to_string());
        headers
    });

    OutboundResponse {
        status_code: upstream.status,
        body: upstream.body,
        headers,
    }
}

/// The synchronous 500 produced for an absent event. No upstream call is
/// made in that case.
pub fn null_event_response() -> OutboundResponse {
    OutboundResponse {
        status_code: 500,
        body: NULL_EVENT_BODY.to_string(),
        headers: None,
    }
}
