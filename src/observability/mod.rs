//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (per-request counter + latency histogram)
//!
//! Consumers:
//!     → stdout log lines
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
