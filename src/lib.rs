//! Gateway event forwarding proxy.
//!
//! Receives a normalized request description from a front-end gateway
//! layer, re-issues an equivalent request against a single configured
//! upstream host, and translates the reply back into the gateway's
//! response contract.
//!
//! ```text
//!   gateway event ──▶ transform ──▶ upstream leg ──▶ shape ──▶ response
//!                         │                            │
//!                   ProxyConfig                 failure side channel
//! ```

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::{ProxyConfig, ServerConfig};
pub use gateway::{EventBody, InboundEvent, OutboundResponse};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::{FailureReport, FailureSink, ProxyService};
