//! The application's HTTP server.

use std::net::{SocketAddr, TcpListener};

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Router,
};
use axum_server::Handle;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};
use tracing::{debug, info};

use crate::{
    domain::contact::ContactService,
    infrastructure::http::{router, shutdown_signal, state::AppState, HttpServerConfig, Server},
};

/// The application's HTTP server
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    /// Returns a new HTTP server bound to `address`.
    pub async fn new(
        address: SocketAddr,
        config: &HttpServerConfig,
        state: AppState<impl ContactService>,
    ) -> Result<Self> {
        let mut router = router(state).layer(TimeoutLayer::new(config.request_timeout()));

        if let Some(origin) = &config.allowed_origin {
            router = router.layer(cors_layer(origin)?);
        }

        let listener = TcpListener::bind(address)
            .with_context(|| format!("failed to listen on {address}"))?;
        listener
            .set_nonblocking(true)
            .context("failed to make listener non-blocking")?;

        Ok(Self { router, listener })
    }
}

#[async_trait]
impl Server for HttpServer {
    /// Runs the HTTP server.
    #[mutants::skip]
    async fn run(self) -> Result<()> {
        debug!(
            "HTTP Server listening on {}",
            self.listener
                .local_addr()
                .context("failed to get local address")?
        );

        let handle = Handle::new();

        let server = axum_server::from_tcp(self.listener)
            .handle(handle.clone())
            .serve(self.router.into_make_service());

        tokio::select! {
            result = server => result.context("server error")?,
            _ = shutdown_signal(Some(handle)) => {
                info!("Shutting down HTTP server");
            }
        }

        Ok(())
    }
}

/// Allow a browser on `origin` to post the contact form
fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("invalid CORS origin {origin:?}"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]))
}
