//! Upstream HTTP leg.
//!
//! One client serves both schemes: a hyper-util legacy client behind a
//! rustls connector with `https_or_http`. The response body is collected
//! to completion before anything is returned, so the shaping step always
//! sees the full payload. No retries, no redirect following, no timeout
//! of its own.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::http::method::InvalidMethod;
use hyper::http::uri::InvalidUri;
use hyper::{Method, Request, Uri};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use thiserror::Error;

use crate::proxy::transform::OutboundRequest;

/// Fully buffered upstream reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    /// Accumulated body, taken as opaque text.
    pub body: String,
}

/// Any failure establishing or conducting the outbound request.
///
/// All variants are treated identically by callers: the invocation fails
/// as an upstream-transport failure and is reported on the side channel.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream url: {0}")]
    Url(#[from] InvalidUri),

    #[error("invalid request method: {0}")]
    Method(#[from] InvalidMethod),

    #[error("invalid outbound request: {0}")]
    Request(#[from] hyper::http::Error),

    #[error("upstream request failed: {0}")]
    Connect(#[from] hyper_util::client::legacy::Error),

    #[error("failed reading upstream response: {0}")]
    Body(#[from] hyper::Error),
}

/// HTTP(S) client for the single configured upstream.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
}

impl UpstreamClient {
    /// Build the client with the bundled webpki root store.
    pub fn new() -> Self {
        let connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .build();

        Self {
            client: Client::builder(TokioExecutor::new()).build(connector),
        }
    }

    /// Issue the outbound request and buffer the reply to completion.
    pub async fn fetch(&self, outbound: &OutboundRequest) -> Result<UpstreamResponse, UpstreamError> {
        let uri: Uri = outbound.url().parse()?;
        let method = Method::from_bytes(outbound.method.as_bytes())?;

        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in &outbound.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let payload = outbound.body.clone().unwrap_or_default();
        let request = builder.body(Full::new(Bytes::from(payload)))?;

        let response = self.client.request(request).await?;
        let status = response.status().as_u16();

        // Chunks accumulate in arrival order; the bytes are never decoded
        // or decompressed here.
        let bytes = response.into_body().collect().await?.to_bytes();

        Ok(UpstreamResponse {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}
