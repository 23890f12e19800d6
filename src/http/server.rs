//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the Axum router with the forwarding handler registered explicitly
//! - Wire up middleware (tracing, request ID)
//! - Construct the shared outbound client
//! - Serve plain TCP or, when configured, TLS-terminated connections
//! - Stop accepting on the shutdown signal

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use axum::body::Body;
use axum::routing::any;
use axum::Router;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::request::MakeProxyRequestId;
use crate::net::tls::load_tls_config;
use crate::proxy::forward;

/// The origin-facing HTTP client. One handle is shared by all requests; it
/// is internally synchronized and cheap to clone.
pub type HttpClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Application state injected into the forwarding handler.
#[derive(Clone)]
pub struct AppState {
    /// Client used for the outbound hop to origins.
    pub client: HttpClient,
    /// Optional deadline for the origin call. None imposes no deadline.
    pub upstream_timeout: Option<Duration>,
}

/// HTTP server for the forward proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let state = AppState {
            client,
            upstream_timeout: config.upstream.timeout(),
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The forwarding handler is registered explicitly for the root and the
    /// catch-all pattern; there is no ambient route table.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(forward))
            .route("/{*path}", any(forward))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeProxyRequestId))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    ///
    /// Accepted connections are handled concurrently; a slow origin on one
    /// request never stalls the others.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        match &self.config.listener.tls {
            Some(tls) => {
                let tls_config =
                    load_tls_config(Path::new(&tls.cert_path), Path::new(&tls.key_path)).await?;
                tracing::info!(address = %addr, "HTTPS server starting");

                let handle = axum_server::Handle::new();
                let drain = handle.clone();
                tokio::spawn(async move {
                    let _ = shutdown.recv().await;
                    drain.graceful_shutdown(Some(Duration::from_secs(30)));
                });

                axum_server::from_tcp_rustls(listener.into_std()?, tls_config)
                    .handle(handle)
                    .serve(app)
                    .await?;
            }
            None => {
                tracing::info!(address = %addr, "HTTP server starting");

                axum::serve(listener, app)
                    .with_graceful_shutdown(async move {
                        let _ = shutdown.recv().await;
                    })
                    .await?;
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}
