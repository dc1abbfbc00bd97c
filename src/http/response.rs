//! Response construction.
//!
//! # Responsibilities
//! - Build the response for an override hit
//! - Relay an origin response to the client
//! - Strip connection-management headers on the way through
//!
//! # Design Decisions
//! - Bodies are fully buffered, so the length is always known and the
//!   server writes its own framing headers
//! - Repeated headers (e.g. Set-Cookie) are kept, in order

use axum::{
    body::{Body, Bytes},
    http::{
        header::{CONNECTION, CONTENT_LENGTH, CONTENT_TYPE, TRANSFER_ENCODING},
        HeaderMap, HeaderName, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};

use crate::http::upstream::UpstreamResponse;

/// Headers that describe the origin connection and never cross the proxy.
const DROPPED_HEADERS: [HeaderName; 2] = [TRANSFER_ENCODING, CONNECTION];

/// 200 response carrying the contents of a local override file.
pub fn override_response(data: Bytes) -> Response {
    let len = data.len();
    let mut response = Response::new(Body::from(data));
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
    response
}

/// Copy status, headers and body of an origin response.
pub fn relay_response(upstream: UpstreamResponse) -> Response {
    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = relayable_headers(&upstream.headers);
    response
}

/// Everything except the dropped connection-management headers.
pub fn relayable_headers(headers: &HeaderMap) -> HeaderMap {
    let mut relayed = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if !DROPPED_HEADERS.contains(name) {
            relayed.append(name.clone(), value.clone());
        }
    }
    relayed
}

/// Answer for methods other than GET.
pub fn not_implemented() -> Response {
    (StatusCode::NOT_IMPLEMENTED, Body::empty()).into_response()
}

/// Answer for a panic caught while handling a request.
pub fn bad_gateway() -> Response {
    (StatusCode::BAD_GATEWAY, Body::empty()).into_response()
}
