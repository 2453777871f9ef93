//! Mail account settings and the credentials resolved from them

use std::{fmt, str::FromStr};

use lettre::Address;
use thiserror::Error;

use crate::domain::communication::mailer::MailerError;

/// The display name used for the relay's own mailbox unless configured otherwise
pub const DEFAULT_SENDER_NAME: &str = "Portfolio Contact Form";

/// The deployment is missing something the relay needs to send mail
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// One or more of the mail settings are absent
    #[error("missing mail settings: {}", .0.join(", "))]
    MissingSettings(Vec<&'static str>),

    /// A setting is present but unusable, e.g. a recipient that is not a mailbox
    #[error("invalid mail setting: {0}")]
    InvalidSetting(&'static str),

    /// The transport could not be built from the configured settings
    #[error("could not build the mail transport")]
    Transport(#[source] MailerError),

    /// The notification could not be rendered from the deployed template
    #[error("could not compose the notification")]
    Composition(#[source] MailerError),
}

/// Mail settings as provided by the hosting environment, possibly incomplete
#[derive(Clone, Debug, Default)]
pub struct MailSettings {
    /// The sender account identifier, also used as the `From` address
    pub user: Option<String>,

    /// The sender account secret
    pub password: Option<String>,

    /// Where contact notifications are delivered
    pub recipient: Option<String>,

    /// The display name attached to the sender address
    pub sender_name: String,
}

impl MailSettings {
    /// Create mail settings with the default sender name
    pub fn new(user: Option<String>, password: Option<String>, recipient: Option<String>) -> Self {
        Self {
            user,
            password,
            recipient,
            sender_name: DEFAULT_SENDER_NAME.to_string(),
        }
    }

    /// Override the sender display name
    pub fn with_sender_name(mut self, sender_name: impl Into<String>) -> Self {
        self.sender_name = sender_name.into();
        self
    }

    /// Resolve the complete set of credentials.
    ///
    /// All three settings must be present together; blank values count as missing.
    /// The sender account and the recipient must both be mailbox addresses.
    /// Errors name the offending settings but never echo a value.
    pub fn credentials(&self) -> Result<MailCredentials, ConfigurationError> {
        let user = present(&self.user);
        let password = present(&self.password);
        let recipient = present(&self.recipient);

        match (user, password, recipient) {
            (Some(user), Some(password), Some(recipient)) => Ok(MailCredentials {
                user: mailbox("user", user)?,
                password: password.to_string(),
                recipient: mailbox("recipient", recipient)?,
            }),
            _ => {
                let missing = [
                    ("user", user.is_none()),
                    ("password", password.is_none()),
                    ("recipient", recipient.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();

                Err(ConfigurationError::MissingSettings(missing))
            }
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn mailbox(name: &'static str, value: &str) -> Result<Address, ConfigurationError> {
    Address::from_str(value).map_err(|_| ConfigurationError::InvalidSetting(name))
}

/// A complete set of mail credentials
#[derive(Clone, PartialEq, Eq)]
pub struct MailCredentials {
    /// The sender account, also the `From` mailbox
    pub user: Address,

    /// The sender account secret
    pub password: String,

    /// The notification recipient
    pub recipient: Address,
}

impl fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailCredentials")
            .field("user", &self.user)
            .field("password", &"[redacted]")
            .field("recipient", &self.recipient)
            .finish()
    }
}
