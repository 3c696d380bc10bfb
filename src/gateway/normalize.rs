//! Request normalization: the front-end gateway layer.
//!
//! # Responsibilities
//! - Turn a raw HTTP request into the normalized [`InboundEvent`] shape
//! - Preserve query parameter wire order for downstream encoding
//! - Buffer the body up to the configured cap
//!
//! # Design Decisions
//! - Header values are stringified lossily; the event contract is string
//!   maps, and forwarding never reinterprets them
//! - Duplicate query keys collapse to the last occurrence

use axum::body::{to_bytes, Body};
use axum::http::Request;
use indexmap::IndexMap;
use thiserror::Error;

use crate::gateway::event::{EventBody, InboundEvent};

/// Error turning a raw request into an event.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The request body exceeded the host-configured cap.
    #[error("event body exceeds the configured limit of {limit} bytes")]
    BodyTooLarge { limit: usize },
}

/// Normalize a raw HTTP request into an [`InboundEvent`].
pub async fn event_from_request(
    request: Request<Body>,
    max_body_bytes: usize,
) -> Result<InboundEvent, NormalizeError> {
    let (parts, body) = request.into_parts();

    let method = Some(parts.method.as_str().to_string());
    let path = Some(parts.uri.path().to_string());

    let query_parameters = parts.uri.query().map(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect::<IndexMap<String, String>>()
    });

    let headers = if parts.headers.is_empty() {
        None
    } else {
        Some(
            parts
                .headers
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect::<IndexMap<String, String>>(),
        )
    };

    let bytes = to_bytes(body, max_body_bytes)
        .await
        .map_err(|_| NormalizeError::BodyTooLarge {
            limit: max_body_bytes,
        })?;
    let body = if bytes.is_empty() {
        None
    } else {
        Some(EventBody::Text(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };

    Ok(InboundEvent {
        method,
        path,
        resource_path: None,
        query_parameters,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_method_path_query_and_body() {
        let request = Request::builder()
            .method("POST")
            .uri("http://proxy.local/Beta/test?parameter2=12&parameter1=value1")
            .header("x-api-key", "secret")
            .body(Body::from("payload"))
            .unwrap();

        let event = event_from_request(request, 1024).await.unwrap();

        assert_eq!(event.method.as_deref(), Some("POST"));
        assert_eq!(event.path.as_deref(), Some("/Beta/test"));
        let query = event.query_parameters.unwrap();
        let pairs: Vec<_> = query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(pairs, vec![("parameter2", "12"), ("parameter1", "value1")]);
        assert_eq!(
            event.headers.unwrap().get("x-api-key").map(String::as_str),
            Some("secret")
        );
        assert_eq!(event.body, Some(EventBody::Text("payload".to_string())));
    }

    #[tokio::test]
    async fn empty_body_and_no_query_become_absent_fields() {
        let request = Request::builder()
            .uri("http://proxy.local/")
            .body(Body::empty())
            .unwrap();

        let event = event_from_request(request, 1024).await.unwrap();

        assert_eq!(event.path.as_deref(), Some("/"));
        assert_eq!(event.query_parameters, None);
        assert_eq!(event.body, None);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let request = Request::builder()
            .uri("http://proxy.local/")
            .body(Body::from(vec![0u8; 64]))
            .unwrap();

        let result = event_from_request(request, 16).await;
        assert!(matches!(
            result,
            Err(NormalizeError::BodyTooLarge { limit: 16 })
        ));
    }
}
