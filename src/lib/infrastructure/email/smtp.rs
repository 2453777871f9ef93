//! SMTP email service implementation

use std::{fmt, time::Duration};

use async_trait::async_trait;
use clap::{ArgAction, Parser, ValueEnum};
use lettre::{
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};
use tracing::{debug, warn};

use crate::domain::communication::{
    credentials::{MailCredentials, MailSettings, DEFAULT_SENDER_NAME},
    mailer::{MailTransport, Mailer, MailerError, OutboundMessage},
};

/// How the transport is put together
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProfileKind {
    /// Host, port and TLS come from a named provider
    Managed,

    /// Host and port are configured explicitly and the login is checked before sending
    DirectSmtp,
}

/// Hosted mail providers with known SMTP endpoints
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    /// Google Mail
    Gmail,

    /// Outlook.com / Office 365
    Outlook,

    /// Yahoo Mail
    Yahoo,

    /// Zoho Mail
    Zoho,

    /// iCloud Mail
    Icloud,
}

/// How TLS is negotiated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Security {
    /// TLS from the first byte (SMTPS)
    Implicit,

    /// Plain connection upgraded with STARTTLS
    StartTls,
}

impl Provider {
    /// The provider's submission host, port and TLS mode
    pub fn endpoint(self) -> (&'static str, u16, Security) {
        match self {
            Provider::Gmail => ("smtp.gmail.com", 465, Security::Implicit),
            Provider::Outlook => ("smtp-mail.outlook.com", 587, Security::StartTls),
            Provider::Yahoo => ("smtp.mail.yahoo.com", 465, Security::Implicit),
            Provider::Zoho => ("smtp.zoho.com", 465, Security::Implicit),
            Provider::Icloud => ("smtp.mail.me.com", 587, Security::StartTls),
        }
    }
}

/// A deployment profile selecting how transports are built
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportProfile {
    /// Resolve everything from the provider
    Managed {
        /// The hosted provider
        provider: Provider,
    },

    /// Connect to an explicit host with implicit TLS and verify before sending
    DirectSmtp {
        /// The SMTP host
        host: String,

        /// The SMTP port
        port: u16,

        /// Skip certificate validation. Only for servers with incomplete CA chains.
        accept_invalid_certs: bool,
    },
}

impl TransportProfile {
    fn endpoint(&self) -> (&str, u16, Security, bool) {
        match self {
            TransportProfile::Managed { provider } => {
                let (host, port, security) = provider.endpoint();
                (host, port, security, false)
            }
            TransportProfile::DirectSmtp {
                host,
                port,
                accept_invalid_certs,
            } => (host, *port, Security::Implicit, *accept_invalid_certs),
        }
    }
}

/// SMTP configuration
#[derive(Clone, Debug, Parser)]
pub struct SmtpConfig {
    /// The sender account, also used as the `From` address
    #[clap(long = "email-user", env = "EMAIL_USER")]
    pub user: Option<String>,

    /// The sender account password
    #[clap(long = "email-password", env = "EMAIL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Where contact notifications are delivered
    #[clap(long = "email-recipient", env = "EMAIL_RECIPIENT")]
    pub recipient: Option<String>,

    /// The display name of the sender
    #[clap(long = "email-sender-name", env = "EMAIL_SENDER_NAME", default_value = DEFAULT_SENDER_NAME)]
    pub sender_name: String,

    /// The transport profile
    #[clap(long = "smtp-profile", env = "SMTP_PROFILE", value_enum, default_value_t = ProfileKind::Managed)]
    pub profile: ProfileKind,

    /// The provider used by the managed profile
    #[clap(long = "smtp-provider", env = "SMTP_PROVIDER", value_enum, default_value_t = Provider::Gmail)]
    pub provider: Provider,

    /// The SMTP host used by the direct-smtp profile
    #[clap(long = "smtp-host", env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    pub host: String,

    /// The SMTP port used by the direct-smtp profile
    #[clap(long = "smtp-port", env = "SMTP_PORT", default_value = "465")]
    pub port: u16,

    /// Accept invalid TLS certificates (direct-smtp only)
    #[clap(
        long = "smtp-accept-invalid-certs",
        env = "SMTP_ACCEPT_INVALID_CERTS",
        default_value = "false",
        action = ArgAction::Set
    )]
    pub accept_invalid_certs: bool,

    /// Seconds allowed for each of connecting, verifying and sending
    #[clap(long = "smtp-timeout-secs", env = "SMTP_TIMEOUT_SECS", default_value = "15")]
    pub timeout_secs: u64,
}

impl SmtpConfig {
    /// The transport profile selected by this configuration
    pub fn profile(&self) -> TransportProfile {
        match self.profile {
            ProfileKind::Managed => TransportProfile::Managed {
                provider: self.provider,
            },
            ProfileKind::DirectSmtp => TransportProfile::DirectSmtp {
                host: self.host.clone(),
                port: self.port,
                accept_invalid_certs: self.accept_invalid_certs,
            },
        }
    }

    /// The per-operation transport timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The mail account settings handed to the relay
    pub fn mail_settings(&self) -> MailSettings {
        MailSettings::new(
            self.user.clone(),
            self.password.clone(),
            self.recipient.clone(),
        )
        .with_sender_name(self.sender_name.clone())
    }
}

/// SMTP mailer
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    profile: TransportProfile,
    timeout: Duration,
}

impl SmtpMailer {
    /// Create a new SMTP mailer
    pub fn new(profile: TransportProfile, timeout: Duration) -> Self {
        if let TransportProfile::DirectSmtp {
            host,
            accept_invalid_certs: true,
            ..
        } = &profile
        {
            warn!(
                %host,
                "TLS certificate validation is DISABLED for the SMTP transport; \
                 credentials can be intercepted by anyone able to impersonate the server"
            );
        }

        Self { profile, timeout }
    }

    /// The profile this mailer builds transports for
    pub fn profile(&self) -> &TransportProfile {
        &self.profile
    }
}

impl Mailer for SmtpMailer {
    type Transport = SmtpConnection;

    fn connect(&self, credentials: &MailCredentials) -> Result<SmtpConnection, MailerError> {
        let (host, port, security, accept_invalid_certs) = self.profile.endpoint();

        if accept_invalid_certs {
            warn!(%host, "connecting without TLS certificate validation");
        }

        let parameters = TlsParameters::builder(host.to_string())
            .dangerous_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        let tls = match security {
            Security::Implicit => Tls::Wrapper(parameters),
            Security::StartTls => Tls::Required(parameters),
        };

        debug!(%host, port, ?security, "building SMTP transport");

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .tls(tls)
            .credentials(Credentials::new(
                credentials.user.to_string(),
                credentials.password.clone(),
            ))
            .timeout(Some(self.timeout))
            .build();

        Ok(SmtpConnection { transport })
    }

    fn verifies_before_send(&self) -> bool {
        matches!(self.profile, TransportProfile::DirectSmtp { .. })
    }
}

/// A transport for one account
pub struct SmtpConnection {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl fmt::Debug for SmtpConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConnection").finish_non_exhaustive()
    }
}

#[async_trait]
impl MailTransport for SmtpConnection {
    async fn verify(&self) -> Result<(), MailerError> {
        match self.transport.test_connection().await? {
            true => Ok(()),
            false => Err(MailerError::Unverified),
        }
    }

    async fn send(&self, message: &OutboundMessage) -> Result<(), MailerError> {
        let response = self.transport.send(message.mime().clone()).await?;

        debug!(code = %response.code(), "message accepted");

        Ok(())
    }
}
