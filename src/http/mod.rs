//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware, accept loop)
//!     → request.rs (mint x-request-id)
//!     → proxy::forward (the actual hop)
//!     → response relayed to the caller
//! ```

pub mod request;
pub mod server;

pub use request::{MakeProxyRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
