//! Network layer subsystem.
//!
//! The accept loop itself belongs to the host networking stack (axum/hyper);
//! what lives here is the optional TLS termination handed to it.

pub mod tls;
