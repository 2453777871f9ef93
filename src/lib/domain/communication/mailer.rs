//! Mail transport seams

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::credentials::MailCredentials;

mod errors;
mod message;

pub use errors::MailerError;
pub use message::{OutboundMessage, Sender};

/// A transport able to talk to a mail server on behalf of one account
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Perform the pre-flight check: connect, negotiate TLS and authenticate.
    async fn verify(&self) -> Result<(), MailerError>;

    /// Send a message.
    ///
    /// # Arguments
    /// * `message` - The [`OutboundMessage`] to hand to the mail server.
    ///
    /// # Returns
    /// A [`Result`] indicating whether the server accepted the message.
    async fn send(&self, message: &OutboundMessage) -> Result<(), MailerError>;
}

/// Builds mail transports
pub trait Mailer: Clone + Send + Sync + 'static {
    /// The transport produced by [`Mailer::connect`]
    type Transport: MailTransport;

    /// Build a transport for the given credentials.
    ///
    /// This must not perform any network I/O; connecting happens lazily in
    /// [`MailTransport::verify`] or [`MailTransport::send`].
    fn connect(&self, credentials: &MailCredentials) -> Result<Self::Transport, MailerError>;

    /// Whether transports must pass [`MailTransport::verify`] before sending
    fn verifies_before_send(&self) -> bool;
}

#[cfg(test)]
mock! {
    pub MailTransport {}

    #[async_trait]
    impl MailTransport for MailTransport {
        async fn verify(&self) -> Result<(), MailerError>;
        async fn send(&self, message: &OutboundMessage) -> Result<(), MailerError>;
    }
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    impl Mailer for Mailer {
        type Transport = MockMailTransport;

        fn connect(&self, credentials: &MailCredentials) -> Result<MockMailTransport, MailerError>;
        fn verifies_before_send(&self) -> bool;
    }
}

#[cfg(test)]
pub mod tests {
    //! Test doubles shared with other modules

    pub use super::{MockMailTransport, MockMailer};
}
