//! Configuration validation.
//!
//! Serde handles the syntactic side; this module performs the semantic
//! checks (addresses parse, values are in range) and reports every problem
//! it finds rather than stopping at the first.

use std::net::SocketAddr;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `listener.bind_address` is not a valid socket address.
    InvalidBindAddress(String),
    /// `observability.metrics_address` is not a valid socket address.
    InvalidMetricsAddress(String),
    /// `upstream.timeout_secs` is zero; omit the field to disable the deadline.
    ZeroUpstreamTimeout,
    /// A TLS path field is empty.
    EmptyTlsPath(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address {:?} is not a socket address", addr)
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "observability.metrics_address {:?} is not a socket address", addr)
            }
            ValidationError::ZeroUpstreamTimeout => {
                write!(f, "upstream.timeout_secs must be positive; omit it for no deadline")
            }
            ValidationError::EmptyTlsPath(field) => {
                write!(f, "listener.tls.{} must not be empty", field)
            }
        }
    }
}

/// Validate a parsed configuration, returning all problems found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Some(tls) = &config.listener.tls {
        if tls.cert_path.is_empty() {
            errors.push(ValidationError::EmptyTlsPath("cert_path"));
        }
        if tls.key_path.is_empty() {
            errors.push(ValidationError::EmptyTlsPath("key_path"));
        }
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroUpstreamTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
