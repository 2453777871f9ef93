//! HTTP Server

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::{extract::Request, Router};
use axum_server::Handle;
use clap::{Parser, ValueEnum};
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{debug, info_span};

use crate::domain::contact::ContactService;

pub mod errors;
pub mod handlers;
pub mod open_api;
pub mod servers;
pub mod state;

use handlers::panic_handler;
use state::AppState;

/// The deployment environment
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    /// Local development: failure responses carry the raw cause
    Development,

    /// Production: failure responses only carry generic labels
    Production,
}

impl Environment {
    /// Whether raw error detail may be returned to callers
    pub fn exposes_error_detail(self) -> bool {
        self != Environment::Production
    }
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct HttpServerConfig {
    /// The port to listen on
    #[arg(long = "http-port", env = "HTTP_PORT", default_value = "3000")]
    pub port: u16,

    /// The deployment environment
    #[arg(long = "app-env", env = "APP_ENV", value_enum, default_value_t = Environment::Production)]
    pub environment: Environment,

    /// The origin allowed to call the API from a browser, e.g. `https://example.com`
    #[arg(long = "cors-allowed-origin", env = "CORS_ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,

    /// Seconds before a request is abandoned with 408
    #[arg(long = "request-timeout-secs", env = "REQUEST_TIMEOUT_SECS", default_value = "60")]
    pub request_timeout_secs: u64,

    /// The address offered as a direct-contact fallback; defaults to the recipient
    #[arg(long = "contact-public-email", env = "CONTACT_PUBLIC_EMAIL")]
    pub public_email: Option<String>,
}

impl HttpServerConfig {
    /// The overall request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// A server that runs until shut down
#[async_trait]
pub trait Server {
    /// Serve until a shutdown signal arrives
    async fn run(self) -> Result<()>;
}

/// Create the application's router
pub fn router<C: ContactService>(state: AppState<C>) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        let uri = request.uri().to_string();
        info_span!("http_request", method = ?request.method(), uri)
    });

    handlers::router()
        .layer(CatchPanicLayer::custom(panic_handler))
        .layer(trace_layer)
        .with_state(state)
}

#[mutants::skip]
async fn shutdown_signal(handle: Option<Handle>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    if let Some(handle) = handle {
        debug!("shutting down gracefully");
        handle.graceful_shutdown(Some(Duration::from_secs(10)));
    }
}
