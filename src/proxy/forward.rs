//! The forwarding handler: one inbound request, one origin call, one
//! relayed response.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → scheme check (http/https only, else 400 and stop)
//!     → fresh outbound request (sanitized headers + forwarded-for chain)
//!     → origin call (single attempt, optional deadline)
//!     → sanitized response headers
//!     → body streamed back to the caller
//! ```

use std::net::SocketAddr;
use std::time::Instant;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{Request, Uri};
use axum::response::{IntoResponse, Response};

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::proxy::error::ProxyError;
use crate::proxy::headers::{append_forwarded_for, strip_hop_by_hop};

/// Forward one request to the origin named in its target URI.
///
/// Every failure is converted into a well-formed response here; this handler
/// never takes the serving process down with it.
pub async fn forward(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let started = Instant::now();
    let method = request.method().clone();

    tracing::info!(peer = %peer, method = %method, uri = %request.uri(), "proxying request");

    let response = match proxy_request(&state, peer, request).await {
        Ok(response) => {
            tracing::info!(peer = %peer, status = %response.status(), "origin responded");
            response
        }
        Err(error) => error.into_response(),
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), started);
    response
}

async fn proxy_request(
    state: &AppState,
    peer: SocketAddr,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    check_scheme(request.uri())?;

    let (parts, body) = request.into_parts();

    // The parsed inbound request is a server-side artifact; the origin gets
    // a fresh client request carrying only the method, the target verbatim,
    // the sanitized headers, and the body stream. Version and extensions are
    // the outbound connection's own business.
    let mut outbound = Request::new(body);
    *outbound.method_mut() = parts.method;
    *outbound.uri_mut() = parts.uri;
    *outbound.headers_mut() = parts.headers;

    strip_hop_by_hop(outbound.headers_mut());
    append_forwarded_for(outbound.headers_mut(), &peer.to_string());

    let call = state.client.request(outbound);
    let response = match state.upstream_timeout {
        Some(deadline) => tokio::time::timeout(deadline, call)
            .await
            .map_err(|_| ProxyError::UpstreamTimeout(deadline))??,
        None => call.await?,
    };

    let (mut parts, body) = response.into_parts();
    strip_hop_by_hop(&mut parts.headers);

    // Status and headers are committed before the first body byte; the body
    // itself streams through without ever being buffered in full. Dropping
    // the stream (caller gone) releases the origin connection.
    Ok(Response::from_parts(parts, Body::new(body)))
}

fn check_scheme(uri: &Uri) -> Result<(), ProxyError> {
    match uri.scheme_str() {
        Some("http") | Some("https") => Ok(()),
        other => Err(ProxyError::UnsupportedScheme(
            other.unwrap_or_default().to_string(),
        )),
    }
}
