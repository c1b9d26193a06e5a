//! Request ID middleware for HTTP request correlation
//!
//! Reuses a client-supplied `X-Request-Id` or generates one, records it on
//! the request span and echoes it on the response.

use axum::{
    extract::Request,
    http::{HeaderValue, header::HeaderName},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// The header name for the request ID
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Longest client-supplied ID that is reused
const MAX_CLIENT_ID_LEN: usize = 128;

/// Request ID extracted from the request headers or generated
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

fn client_id(request: &Request) -> Option<String> {
    request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_CLIENT_ID_LEN)
        .map(ToString::to_string)
}

/// Tag the request with an ID, run it inside a span carrying that ID
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = client_id(&request).unwrap_or_else(|| Uuid::new_v4().to_string());
    request.extensions_mut().insert(RequestId(id.clone()));

    let span = tracing::info_span!(
        "http_request",
        request_id = %id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
    }
    response
}
