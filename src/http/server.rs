//! HTTP server glue: the host environment around the forwarding service.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all gateway handler
//! - Wire up middleware (tracing, request timeout, request ID)
//! - Normalize raw requests into gateway events
//! - Render the gateway response contract back onto the wire
//!
//! The transformer itself enforces no timeout and no body cap; both
//! limits live here, in the host layer, per [`ServerConfig`].

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ProxyConfig, ServerConfig};
use crate::gateway::event::OutboundResponse;
use crate::gateway::normalize;
use crate::http::request::MakeRequestUuid;
use crate::proxy::failure::{FailureSink, TracingFailureSink};
use crate::proxy::service::ProxyService;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ProxyService>,
    pub failures: Arc<dyn FailureSink>,
    pub max_event_body_bytes: usize,
}

/// HTTP server hosting the forwarding service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server with the default logging failure sink.
    pub fn new(proxy_config: ProxyConfig, server_config: ServerConfig) -> Self {
        Self::with_failure_sink(proxy_config, server_config, Arc::new(TracingFailureSink))
    }

    /// Create a server delivering transport-failure reports to `failures`.
    pub fn with_failure_sink(
        proxy_config: ProxyConfig,
        server_config: ServerConfig,
        failures: Arc<dyn FailureSink>,
    ) -> Self {
        let state = AppState {
            service: Arc::new(ProxyService::new(Arc::new(proxy_config))),
            failures,
            max_event_body_bytes: server_config.max_event_body_bytes,
        };

        Self {
            router: Self::build_router(&server_config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.request_timeout_secs,
                    ))),
            )
    }

    /// Serve until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: normalize, forward, render.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let event = match normalize::event_from_request(request, state.max_event_body_bytes).await {
        Ok(event) => event,
        Err(error) => {
            tracing::warn!(error = %error, "Rejecting event");
            return (StatusCode::PAYLOAD_TOO_LARGE, error.to_string()).into_response();
        }
    };

    match state.service.handle(Some(event), state.failures.as_ref()).await {
        Ok(outbound) => render_response(outbound),
        // The report already went to the failure sink; the wire gets a
        // plain 500 with a fixed body.
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Upstream request failed").into_response(),
    }
}

/// Render the gateway response contract onto the wire.
fn render_response(outbound: OutboundResponse) -> Response {
    let status =
        StatusCode::from_u16(outbound.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut response = Response::new(Body::from(outbound.body));
    *response.status_mut() = status;

    if let Some(headers) = outbound.headers {
        for (name, value) in &headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                response.headers_mut().insert(name, value);
            }
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::transform::CORS_HEADER_NAME;
    use indexmap::IndexMap;

    #[test]
    fn renders_status_body_and_cors_header() {
        let mut headers = IndexMap::new();
        headers.insert(CORS_HEADER_NAME.to_string(), "*".to_string());
        let response = render_response(OutboundResponse {
            status_code: 201,
            body: "created".to_string(),
            headers: Some(headers),
        });

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[test]
    fn out_of_range_status_falls_back_to_500() {
        let response = render_response(OutboundResponse {
            status_code: 42,
            body: String::new(),
            headers: None,
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
