//! Baseline security headers applied to every response.

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Headers set unconditionally on every response.
const BASELINE_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
];

/// HSTS is opt-in via `BL__SECURITY__HSTS_ENABLED=true` since it is only
/// meaningful behind HTTPS termination.
fn hsts_enabled() -> bool {
    std::env::var("BL__SECURITY__HSTS_ENABLED")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub async fn security_headers_middleware(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in BASELINE_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    if hsts_enabled() {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_headers_are_valid() {
        for (name, value) in BASELINE_HEADERS {
            assert!(HeaderName::from_bytes(name.as_bytes()).is_ok());
            assert!(HeaderValue::from_str(value).is_ok());
        }
    }

    #[test]
    fn test_hsts_defaults_off() {
        std::env::remove_var("BL__SECURITY__HSTS_ENABLED");
        assert!(!hsts_enabled());
    }
}
