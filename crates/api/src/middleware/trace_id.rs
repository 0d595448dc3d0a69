//! Request id propagation and per-request log span.

use axum::{
    body::Body,
    http::{header::HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Inbound and outbound header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id stored in request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Runs each request inside a span keyed by its id.
///
/// A client-supplied `x-request-id` is honored so ids survive proxies;
/// otherwise a fresh UUID is generated. The id is echoed back in the
/// response headers.
pub async fn trace_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let mut response = async move {
        let started = std::time::Instant::now();
        let response = next.run(req).await;

        tracing::info!(
            status = response.status().as_u16(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Request handled"
        );

        response
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_round_trips_through_extensions() {
        let id = RequestId("req-123".to_string());
        let mut extensions = axum::http::Extensions::new();
        extensions.insert(id);
        assert_eq!(extensions.get::<RequestId>().unwrap().0, "req-123");
    }

    #[test]
    fn test_generated_ids_are_valid_header_values() {
        let id = Uuid::new_v4().to_string();
        assert!(HeaderValue::from_str(&id).is_ok());
    }
}
