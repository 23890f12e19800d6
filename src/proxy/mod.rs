//! Request forwarding subsystem: the single-hop proxy core.
//!
//! # Data Flow
//! ```text
//! http layer hands over (peer, request)
//!     → forward.rs (validate target, call origin, relay response)
//!     → headers.rs (hop-by-hop stripping, X-Forwarded-For chain)
//!     → error.rs (per-request failure → 400/500 response)
//! ```
//!
//! Nothing here outlives a request; there is no cache, pool state, or any
//! other cross-request coupling.

pub mod error;
pub mod forward;
pub mod headers;

pub use error::ProxyError;
pub use forward::forward;
pub use headers::{append_forwarded_for, strip_hop_by_hop, HOP_BY_HOP_HEADERS, X_FORWARDED_FOR};
