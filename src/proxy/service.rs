//! Forwarding service: one invocation end-to-end.
//!
//! Each invocation is independent and stateless; the service holds only
//! the immutable configuration and the shared client, so arbitrarily many
//! invocations may run concurrently without coordination. There is exactly
//! one branch that bypasses the network: the absent event.

use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::gateway::event::{InboundEvent, OutboundResponse};
use crate::proxy::failure::{FailureReport, FailureSink};
use crate::proxy::transform;
use crate::proxy::upstream::{UpstreamClient, UpstreamError};

/// Stateless request-forwarding service.
pub struct ProxyService {
    config: Arc<ProxyConfig>,
    client: UpstreamClient,
}

impl ProxyService {
    /// Create a service over an immutable configuration.
    pub fn new(config: Arc<ProxyConfig>) -> Self {
        Self {
            config,
            client: UpstreamClient::new(),
        }
    }

    /// The configuration this service forwards with.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Handle one gateway invocation.
    ///
    /// An absent event short-circuits to the fixed 500 without touching
    /// the network. An upstream-transport failure is reported once on the
    /// failure sink and then propagated; it never panics.
    pub async fn handle(
        &self,
        event: Option<InboundEvent>,
        failures: &dyn FailureSink,
    ) -> Result<OutboundResponse, UpstreamError> {
        let Some(event) = event else {
            tracing::warn!("Null event received, answering without an upstream call");
            return Ok(transform::null_event_response());
        };

        let outbound = transform::build_outbound(&event, &self.config);

        if self.config.debug_logging {
            tracing::debug!(event = ?event, "Inbound event");
            tracing::debug!(
                method = %outbound.method,
                url = %outbound.url(),
                "Forwarding to upstream"
            );
        }

        match self.client.fetch(&outbound).await {
            Ok(upstream) => {
                if self.config.debug_logging {
                    tracing::debug!(status = upstream.status, "Upstream replied");
                }
                Ok(transform::shape_response(upstream, &self.config))
            }
            Err(error) => {
                failures.report(FailureReport::transport(error.to_string()));
                Err(error)
            }
        }
    }
}
