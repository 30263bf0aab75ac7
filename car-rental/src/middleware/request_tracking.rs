//! Request ids and log masking of credentials
//!
//! Every request gets an `x-request-id` (kept when the client sent one),
//! echoed on the response. Session cookies and authorization headers are
//! marked sensitive so the trace layer never prints them.

use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};

/// Header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request headers masked in logs
pub const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "x-csrf-token"];

/// Generates a random UUID (v4) per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        let value = HeaderValue::from_str(&id).ok()?;
        Some(RequestId::new(value))
    }
}

/// Set `x-request-id` on requests that lack one.
pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Copy `x-request-id` from the request to the response.
pub fn request_id_propagation_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Mark credentials as sensitive so they are redacted in traces.
pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    let headers = SENSITIVE_HEADERS
        .iter()
        .filter_map(|h| HeaderName::from_bytes(h.as_bytes()).ok())
        .collect::<Vec<_>>();

    SetSensitiveRequestHeadersLayer::new(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use tower::ServiceExt;

    #[test]
    fn test_make_request_uuid() {
        let mut maker = MakeRequestUuid;
        let request = Request::builder().body(()).unwrap();

        let id = maker.make_request_id(&request).unwrap();
        let value = id.header_value().to_str().unwrap().to_string();
        assert!(uuid::Uuid::parse_str(&value).is_ok());
    }

    #[test]
    fn test_sensitive_headers_are_valid_names() {
        assert!(SENSITIVE_HEADERS.contains(&"cookie"));
        assert!(SENSITIVE_HEADERS
            .iter()
            .all(|h| HeaderName::from_bytes(h.as_bytes()).is_ok()));
    }

    #[tokio::test]
    async fn test_request_id_round_trip() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(request_id_propagation_layer())
            .layer(request_id_layer());

        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));

        let response = app
            .oneshot(
                Request::get("/")
                    .header(REQUEST_ID_HEADER, "client-chosen")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "client-chosen");
    }
}
