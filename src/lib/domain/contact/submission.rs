//! Contact form submissions

use serde::Deserialize;

use crate::domain::communication::email_address::{EmailAddress, EmailAddressError};

use super::SubmissionError;

/// A contact form submission as received, before validation
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SubmissionRequest {
    /// The submitter's name
    pub name: String,

    /// The submitter's email address
    pub email: String,

    /// An optional subject line
    pub subject: Option<String>,

    /// The message body
    pub message: String,
}

/// A validated submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    name: String,
    email: EmailAddress,
    subject: Option<String>,
    message: String,
}

impl Submission {
    /// The submitter's name, trimmed
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The submitter's email address
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The subject the submitter provided, if any
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// The message exactly as submitted
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The subject line for the notification, generated from the name when absent
    pub fn subject_line(&self) -> String {
        match &self.subject {
            Some(subject) => subject.clone(),
            None => format!("New Contact Form Message from {}", self.name),
        }
    }
}

impl TryFrom<SubmissionRequest> for Submission {
    type Error = SubmissionError;

    fn try_from(request: SubmissionRequest) -> Result<Self, Self::Error> {
        let name = request.name.trim();

        if name.is_empty() || request.email.trim().is_empty() || request.message.trim().is_empty()
        {
            return Err(SubmissionError::MissingFields);
        }

        let email = EmailAddress::new(&request.email).map_err(|err| match err {
            EmailAddressError::EmptyEmailAddress => SubmissionError::MissingFields,
            EmailAddressError::InvalidEmailAddress => SubmissionError::InvalidEmailAddress,
        })?;

        let subject = request
            .subject
            .as_deref()
            .map(str::trim)
            .filter(|subject| !subject.is_empty())
            .map(String::from);

        Ok(Self {
            name: name.to_string(),
            email,
            subject,
            message: request.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn request(name: &str, email: &str, subject: Option<&str>, message: &str) -> SubmissionRequest {
        SubmissionRequest {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.map(String::from),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_submission() -> TestResult {
        let submission = Submission::try_from(request(
            " Ada ",
            "ada@example.com",
            Some("Hi"),
            "Hello\nthere",
        ))?;

        assert_eq!(submission.name(), "Ada");
        assert_eq!(submission.email().as_str(), "ada@example.com");
        assert_eq!(submission.subject(), Some("Hi"));
        assert_eq!(submission.message(), "Hello\nthere");
        assert_eq!(submission.subject_line(), "Hi");

        Ok(())
    }

    #[test]
    fn test_missing_required_fields() {
        let cases = [
            request("", "ada@example.com", None, "Hello"),
            request("Ada", "", None, "Hello"),
            request("Ada", "ada@example.com", None, ""),
            request("   ", "ada@example.com", None, "Hello"),
            request("Ada", "ada@example.com", None, " \n\t "),
            SubmissionRequest::default(),
        ];

        for case in cases {
            assert_eq!(
                Submission::try_from(case),
                Err(SubmissionError::MissingFields)
            );
        }
    }

    #[test]
    fn test_invalid_email() {
        assert_eq!(
            Submission::try_from(request("Ada", "not an email", None, "Hello")),
            Err(SubmissionError::InvalidEmailAddress)
        );
    }

    #[test]
    fn test_undeliverable_email_is_invalid() {
        assert_eq!(
            Submission::try_from(request("Ada", "ada@example..com", None, "Hello")),
            Err(SubmissionError::InvalidEmailAddress)
        );
    }

    #[test]
    fn test_generated_subject() -> TestResult {
        let submission = Submission::try_from(request("Ada", "ada@example.com", None, "Hello"))?;

        assert_eq!(submission.subject(), None);
        assert_eq!(
            submission.subject_line(),
            "New Contact Form Message from Ada"
        );

        Ok(())
    }

    #[test]
    fn test_blank_subject_is_generated() -> TestResult {
        let submission =
            Submission::try_from(request("Ada", "ada@example.com", Some("  "), "Hello"))?;

        assert_eq!(submission.subject(), None);
        assert_eq!(
            submission.subject_line(),
            "New Contact Form Message from Ada"
        );

        Ok(())
    }

    #[test]
    fn test_absent_fields_deserialize_empty() -> TestResult {
        let request: SubmissionRequest = serde_json::from_str(r#"{"name":"Ada"}"#)?;

        assert_eq!(request.email, "");
        assert_eq!(request.subject, None);
        assert_eq!(request.message, "");

        Ok(())
    }
}
