//! Request ID generation.
//!
//! Each inbound request gets an `x-request-id` header as early as possible
//! so log lines from the whole forwarding path can be correlated; the
//! propagate layer echoes it back to the caller.

use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Mints UUID v4 request IDs for tower-http's set/propagate layers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeProxyRequestId;

impl MakeRequestId for MakeProxyRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let value = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_ids_are_unique_uuids() {
        let mut make = MakeProxyRequestId;
        let request = Request::builder().body(()).unwrap();

        let a = make.make_request_id(&request).unwrap();
        let b = make.make_request_id(&request).unwrap();

        let a = a.header_value().to_str().unwrap().to_owned();
        let b = b.header_value().to_str().unwrap().to_owned();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
