#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Contact relay HTTP server

use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

use anyhow::Result;
use clap::Parser;
use contact_relay::{
    domain::contact::ContactServiceImpl,
    infrastructure::{
        email::smtp::{SmtpConfig, SmtpMailer},
        http::{
            servers::http::HttpServer,
            state::{AppConfig, AppState},
            HttpServerConfig, Server,
        },
    },
};
use tracing::{info, warn};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The SMTP transport and mail account configuration
    #[clap(flatten)]
    pub smtp: SmtpConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load environment: {}", e);

            return Err(e.into());
        }
    }

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let settings = args.smtp.mail_settings();

    if let Err(err) = settings.credentials() {
        warn!("{err}; contact submissions will fail until this is fixed");
    }

    let fallback_email = args
        .server
        .public_email
        .clone()
        .or_else(|| settings.recipient.clone())
        .filter(|email| !email.trim().is_empty());

    let mailer = SmtpMailer::new(args.smtp.profile(), args.smtp.timeout());
    info!(profile = ?mailer.profile(), "mail transport configured");

    let contact = ContactServiceImpl::new(Arc::new(mailer), settings)
        .with_transport_timeout(args.smtp.timeout());

    let state = AppState::new(
        AppConfig {
            environment: args.server.environment,
            fallback_email,
        },
        contact,
    );

    HttpServer::new(
        SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), args.server.port),
        &args.server,
        state,
    )
    .await?
    .run()
    .await
}
