//! Relay results

use serde::{Deserialize, Serialize};

use super::RelayError;

/// The message returned for a successful submission
pub const SENT_MESSAGE: &str = "Your message has been sent successfully!";

/// The outcome of one submission, as reported back to the form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResult {
    /// Whether the email was sent
    pub success: bool,

    /// A message suitable for showing to the submitter
    pub message: String,

    /// The raw cause of a failure, only in non-production deployments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl RelayResult {
    /// A successful result
    pub fn sent() -> Self {
        Self {
            success: true,
            message: SENT_MESSAGE.to_string(),
            error_detail: None,
        }
    }

    /// A failed result; `expose_detail` controls whether the raw cause is included
    pub fn failed(err: &RelayError, expose_detail: bool) -> Self {
        Self {
            success: false,
            message: err.user_message(),
            error_detail: expose_detail.then(|| err.detail()),
        }
    }
}
