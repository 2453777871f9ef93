//! Relay errors

use thiserror::Error;

use crate::domain::communication::{credentials::ConfigurationError, mailer::MailerError};

/// The submitter's input is incomplete or malformed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// Name, email or message is missing
    #[error("Please provide name, email, and message")]
    MissingFields,

    /// The email address is not usable as a reply address
    #[error("Please provide a valid email address")]
    InvalidEmailAddress,
}

/// Everything that can stop a submission from becoming an email
#[derive(Debug, Error)]
pub enum RelayError {
    /// The submission failed validation; the submitter can fix it and resubmit
    #[error(transparent)]
    Validation(#[from] SubmissionError),

    /// The deployment is misconfigured; only an operator can fix it
    #[error("mail relay is not configured")]
    Configuration(#[from] ConfigurationError),

    /// The mail server could not be reached or refused the login
    #[error("SMTP verification failed")]
    Verification(#[source] MailerError),

    /// The message was built but the mail server did not take it
    #[error("failed to send email")]
    Dispatch(#[source] MailerError),
}

impl RelayError {
    /// Whether the submitter, rather than the deployment, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, RelayError::Validation(_))
    }

    /// The message shown to the submitter
    pub fn user_message(&self) -> String {
        match self {
            RelayError::Validation(err) => err.to_string(),
            RelayError::Configuration(_) => "Email service not properly configured".to_string(),
            RelayError::Verification(_) | RelayError::Dispatch(_) => {
                "Failed to send your message".to_string()
            }
        }
    }

    /// A short label naming the failure without revealing its cause
    pub fn summary(&self) -> &'static str {
        match self {
            RelayError::Validation(_) => "Invalid submission",
            RelayError::Configuration(_) => "Missing configuration",
            RelayError::Verification(_) => "Mail server verification failed",
            RelayError::Dispatch(_) => "Failed to send email",
        }
    }

    /// The full cause chain, e.g. `failed to send email: The mail server did not respond within 15s`
    pub fn detail(&self) -> String {
        anyhow::Chain::new(self)
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join(": ")
    }
}
