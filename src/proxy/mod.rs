//! Request-forwarding core.
//!
//! `transform` is the pure mapping between the gateway contract and the
//! outbound descriptor; `upstream` is the single network leg; `failure`
//! is the side channel for transport errors; `service` ties one
//! invocation together.

pub mod failure;
pub mod service;
pub mod transform;
pub mod upstream;

pub use failure::{FailureReport, FailureSink, MemorySink, TracingFailureSink};
pub use service::ProxyService;
pub use transform::{OutboundRequest, Scheme};
pub use upstream::{UpstreamClient, UpstreamError, UpstreamResponse};
