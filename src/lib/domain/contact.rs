//! Contact submissions and the relay that turns them into email

mod errors;
mod result;
mod service;
mod submission;

pub mod notification;

pub use errors::{RelayError, SubmissionError};
pub use result::RelayResult;
pub use service::{ContactService, ContactServiceImpl, DEFAULT_TRANSPORT_TIMEOUT};
pub use submission::{Submission, SubmissionRequest};
