//! Contact relay service

use std::{future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::{
    credentials::{ConfigurationError, MailSettings},
    mailer::{MailTransport, Mailer, MailerError},
};

use super::{notification, RelayError, Submission, SubmissionRequest};

/// How long verification and sending may each take before giving up
pub const DEFAULT_TRANSPORT_TIMEOUT: Duration = Duration::from_secs(15);

/// Contact relay
#[async_trait]
pub trait ContactService: Clone + Send + Sync + 'static {
    /// Relays a contact form submission to the configured recipient.
    ///
    /// Each call is a single attempt: nothing is retried or deduplicated.
    ///
    /// # Arguments
    /// * `request` - The [`SubmissionRequest`] as received from the form.
    ///
    /// # Returns
    /// - [`Ok`] once the mail server has accepted the notification.
    /// - [`Err`] containing a [`RelayError`] naming the stage that failed.
    async fn submit(&self, request: SubmissionRequest) -> Result<(), RelayError>;
}

#[cfg(test)]
mock! {
    pub ContactService {}

    impl Clone for ContactService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl ContactService for ContactService {
        async fn submit(&self, request: SubmissionRequest) -> Result<(), RelayError>;
    }
}

/// Contact relay implementation
#[derive(Debug, Clone)]
pub struct ContactServiceImpl<M>
where
    M: Mailer,
{
    mailer: Arc<M>,
    settings: MailSettings,
    transport_timeout: Duration,
}

impl<M> ContactServiceImpl<M>
where
    M: Mailer,
{
    /// Creates a new contact relay.
    pub fn new(mailer: Arc<M>, settings: MailSettings) -> Self {
        Self {
            mailer,
            settings,
            transport_timeout: DEFAULT_TRANSPORT_TIMEOUT,
        }
    }

    /// Bound verification and sending by `transport_timeout` instead of the default
    pub fn with_transport_timeout(mut self, transport_timeout: Duration) -> Self {
        self.transport_timeout = transport_timeout;
        self
    }

    async fn relay(&self, request: SubmissionRequest) -> Result<(), RelayError> {
        let submission = Submission::try_from(request)?;
        debug!("submission validated");

        let credentials = self.settings.credentials()?;
        debug!("mail credentials resolved");

        let message = notification::compose(&submission, &credentials, &self.settings.sender_name)
            .map_err(|err| RelayError::Configuration(ConfigurationError::Composition(err)))?;
        debug!("notification composed");

        let transport = self
            .mailer
            .connect(&credentials)
            .map_err(|err| RelayError::Configuration(ConfigurationError::Transport(err)))?;

        if self.mailer.verifies_before_send() {
            self.bounded(transport.verify())
                .await
                .map_err(RelayError::Verification)?;
            debug!("mail server is ready to take messages");
        }

        self.bounded(transport.send(&message))
            .await
            .map_err(RelayError::Dispatch)?;

        Ok(())
    }

    async fn bounded<F>(&self, operation: F) -> Result<(), MailerError>
    where
        F: Future<Output = Result<(), MailerError>>,
    {
        timeout(self.transport_timeout, operation)
            .await
            .map_err(|_| MailerError::Timeout(self.transport_timeout))?
    }
}

#[async_trait]
impl<M> ContactService for ContactServiceImpl<M>
where
    M: Mailer,
{
    #[instrument(skip_all, fields(submission_id = %Uuid::now_v7()))]
    async fn submit(&self, request: SubmissionRequest) -> Result<(), RelayError> {
        let result = self.relay(request).await;

        match &result {
            Ok(()) => info!("contact message sent"),
            Err(err) if err.is_client_error() => warn!(error = %err.detail(), "rejected submission"),
            Err(err) => error!(error = %err.detail(), "failed to relay submission"),
        }

        result
    }
}
