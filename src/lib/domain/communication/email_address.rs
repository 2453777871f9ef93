//! Email Address

use std::{fmt, str::FromStr};

use lazy_static::lazy_static;
use lettre::Address;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid");
}

/// An error that can occur when parsing a submitter's email address
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailAddressError {
    /// The email address is empty
    #[error("email is empty")]
    EmptyEmailAddress,

    /// The email address is invalid
    #[error("email is invalid")]
    InvalidEmailAddress,
}

/// A trimmed email address that a mail server will accept as a mailbox
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailAddress(Address);

impl EmailAddress {
    /// Parse an email address, trimming surrounding whitespace.
    ///
    /// The address must look like `local@domain.tld` and also parse as an RFC 5321 mailbox.
    pub fn new(raw: &str) -> Result<Self, EmailAddressError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(EmailAddressError::EmptyEmailAddress);
        }

        if !EMAIL_REGEX.is_match(trimmed) {
            return Err(EmailAddressError::InvalidEmailAddress);
        }

        Address::from_str(trimmed)
            .map(Self)
            .map_err(|_| EmailAddressError::InvalidEmailAddress)
    }

    /// The address as a string slice
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    /// The parsed mailbox address
    pub fn address(&self) -> &Address {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0.to_string()
    }
}
