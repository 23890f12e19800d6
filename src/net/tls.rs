//! TLS configuration and certificate loading for the listener.
//!
//! Certificate provisioning is a collaborator concern: this module only
//! turns already-provisioned PEM files into a server configuration.

use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

/// Load the listener's TLS configuration from certificate and key files.
pub async fn load_tls_config(cert_path: &Path, key_path: &Path) -> Result<RustlsConfig, std::io::Error> {
    if !cert_path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("certificate file not found: {}", cert_path.display()),
        ));
    }
    if !key_path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("private key file not found: {}", key_path.display()),
        ));
    }

    RustlsConfig::from_pem_file(cert_path, key_path).await
}
