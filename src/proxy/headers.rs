//! Header sanitization for the proxy hop.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers from requests before forwarding and from
//!   responses before relaying
//! - Fold the caller's IP into the X-Forwarded-For chain
//!
//! Both operations work on a bare [`HeaderMap`] so they stay testable
//! without any network transport.

use std::net::SocketAddr;

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};

/// Headers meaningful only for a single transport connection. They must not
/// be relayed across the proxy hop, in either direction.
///
/// https://www.w3.org/Protocols/rfc2616/rfc2616-sec13.html
pub const HOP_BY_HOP_HEADERS: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    HeaderName::from_static("trailers"),
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// The X-Forwarded-For header name.
pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Remove every hop-by-hop header, with all of its values.
///
/// Matching is case-insensitive and removal of an absent header is a no-op,
/// so applying this twice is the same as applying it once.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in &HOP_BY_HOP_HEADERS {
        headers.remove(name);
    }
}

/// Record the directly-connected peer in the X-Forwarded-For chain.
///
/// Prior values (one per earlier hop, each possibly already a list) are
/// folded into a single comma-and-space-joined header with the peer's IP
/// appended as the last element. A peer address that does not split into
/// host and port leaves the headers untouched; the request still proceeds.
pub fn append_forwarded_for(headers: &mut HeaderMap, peer_addr: &str) {
    let peer: SocketAddr = match peer_addr.parse() {
        Ok(addr) => addr,
        Err(_) => return,
    };

    let mut chain: Vec<String> = headers
        .get_all(&X_FORWARDED_FOR)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_owned)
        .collect();
    chain.push(peer.ip().to_string());

    if let Ok(folded) = HeaderValue::from_str(&chain.join(", ")) {
        headers.insert(&X_FORWARDED_FOR, folded);
    }
}
