//! Mailer errors

use std::time::Duration;

use lettre::{error::Error as MessageError, transport::smtp};
use thiserror::Error;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The server answered the pre-flight check but is not ready for mail
    #[error("The mail server did not accept the connection")]
    Unverified,

    /// The SMTP conversation failed
    #[error("The mail server rejected the request")]
    TransportError(#[from] smtp::Error),

    /// The MIME message could not be built
    #[error("The email could not be built")]
    MessageError(#[from] MessageError),

    /// The operation did not finish in time
    #[error("The mail server did not respond within {0:?}")]
    Timeout(Duration),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::UnknownError(err)
    }
}
