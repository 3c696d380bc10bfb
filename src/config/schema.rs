//! Configuration schema definitions.
//!
//! Two structs with different audiences: [`ProxyConfig`] drives the
//! request transformation and is passed by reference into the forwarding
//! service, [`ServerConfig`] bounds the HTTP host that drives it.

use serde::{Deserialize, Serialize};

/// Forwarding configuration, read once at startup and immutable afterwards.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProxyConfig {
    /// Upstream hostname. The process refuses to start without it.
    pub target_host: String,

    /// Upstream port override. `None` uses the scheme default.
    pub target_port: Option<u16>,

    /// Forward over HTTPS instead of plain HTTP.
    pub use_https: bool,

    /// Literal prefix prepended to every resolved path.
    pub path_prefix: Option<String>,

    /// Prefix stripped from the start of the inbound path when it matches.
    pub exclude_path_prefix: Option<String>,

    /// Add `Access-Control-Allow-Origin: *` to every response.
    pub add_cors_header: bool,

    /// Verbose logging of inbound events and outbound request options.
    pub debug_logging: bool,
}

impl ProxyConfig {
    /// Convenience constructor for the common host-only setup.
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            target_host: host.into(),
            ..Self::default()
        }
    }
}

/// Host-environment configuration for the HTTP server glue.
///
/// These limits belong to the surrounding host, not to the transformer:
/// the forwarding logic itself imposes no timeout and no body cap.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Total request timeout in seconds, enforced by the server layer.
    pub request_timeout_secs: u64,

    /// Maximum inbound event body size in bytes.
    pub max_event_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
            max_event_body_bytes: 2 * 1024 * 1024,
        }
    }
}
