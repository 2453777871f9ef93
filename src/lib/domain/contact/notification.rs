//! The notification email sent for each submission

use askama::Template;

use crate::domain::communication::{
    credentials::MailCredentials,
    mailer::{MailerError, OutboundMessage, Sender},
};

use super::Submission;

/// Shown in place of a subject the submitter left out
const NO_SUBJECT: &str = "Not specified";

/// Contact notification template
#[derive(Debug, Template)]
#[template(path = "emails/contact/notification.html")]
pub struct ContactNotificationTemplate<'a> {
    /// The submitter's name
    pub name: &'a str,

    /// The submitter's email address
    pub email: &'a str,

    /// The subject as given, or a placeholder
    pub subject: &'a str,

    /// The message body
    pub message: &'a str,
}

impl<'a> ContactNotificationTemplate<'a> {
    /// Creates a new `ContactNotificationTemplate`
    pub fn new(submission: &'a Submission) -> Self {
        Self {
            name: submission.name(),
            email: submission.email().as_str(),
            subject: submission.subject().unwrap_or(NO_SUBJECT),
            message: submission.message(),
        }
    }

    /// Renders the plain text version of the email
    pub fn render_plain(&self) -> String {
        format!(
            "Name: {name}\nEmail: {email}\nSubject: {subject}\n\nMessage:\n{message}",
            name = self.name,
            email = self.email,
            subject = self.subject,
            message = self.message,
        )
    }

    /// Renders the HTML version of the email with its styles inlined
    pub fn render_html(&self) -> Result<String, MailerError> {
        let html = self.render().map_err(anyhow::Error::from)?;

        Ok(css_inline::inline(&html).map_err(anyhow::Error::from)?)
    }
}

/// Compose the notification for a submission.
///
/// The message always comes from the relay's own mailbox and replies go to the submitter.
pub fn compose(
    submission: &Submission,
    credentials: &MailCredentials,
    sender_name: &str,
) -> Result<OutboundMessage, MailerError> {
    let template = ContactNotificationTemplate::new(submission);

    OutboundMessage::new(
        Sender {
            name: sender_name.to_string(),
            address: credentials.user.clone(),
        },
        credentials.recipient.clone(),
        submission.email().address().clone(),
        submission.subject_line(),
        template.render_plain(),
        template.render_html()?,
    )
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::{
        communication::credentials::MailSettings,
        contact::SubmissionRequest,
    };

    use super::*;

    fn credentials() -> MailCredentials {
        MailSettings::new(
            Some("relay@example.com".to_string()),
            Some("hunter2".to_string()),
            Some("me@example.com".to_string()),
        )
        .credentials()
        .expect("complete settings")
    }

    fn submission(subject: Option<&str>, message: &str) -> Submission {
        Submission::try_from(SubmissionRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: subject.map(String::from),
            message: message.to_string(),
        })
        .expect("valid submission")
    }

    #[test]
    fn test_addresses() -> TestResult {
        let message = compose(&submission(None, "Hello"), &credentials(), "Portfolio Contact Form")?;

        assert_eq!(AsRef::<str>::as_ref(&message.from().address), "relay@example.com");
        assert_eq!(message.from().name, "Portfolio Contact Form");
        assert_eq!(AsRef::<str>::as_ref(&message.to()), "me@example.com");
        assert_eq!(AsRef::<str>::as_ref(&message.reply_to()), "ada@example.com");
        assert_ne!(&message.from().address, message.reply_to());

        Ok(())
    }

    #[test]
    fn test_generated_subject() -> TestResult {
        let message = compose(&submission(None, "Hello"), &credentials(), "Contact")?;

        assert_eq!(message.subject(), "New Contact Form Message from Ada");

        Ok(())
    }

    #[test]
    fn test_plain_body() -> TestResult {
        let message = compose(&submission(Some("Hi"), "Hello\nWorld"), &credentials(), "Contact")?;

        assert_eq!(
            message.text_body(),
            "Name: Ada\nEmail: ada@example.com\nSubject: Hi\n\nMessage:\nHello\nWorld"
        );

        Ok(())
    }

    #[test]
    fn test_bodies_carry_the_same_fields() -> TestResult {
        let message = compose(&submission(None, "Hello"), &credentials(), "Contact")?;

        for value in ["Ada", "ada@example.com", "Hello", "Not specified"] {
            assert!(message.text_body().contains(value), "text body is missing {value}");
            assert!(message.html_body().contains(value), "html body is missing {value}");
        }

        assert!(message.html_body().contains("mailto:ada@example.com"));

        Ok(())
    }

    #[test]
    fn test_bodies_agree_on_special_characters() -> TestResult {
        let submission = Submission::try_from(SubmissionRequest {
            name: "Ada <Byron> O'Neil & Co".to_string(),
            email: "ada@example.com".to_string(),
            subject: Some("Q&A".to_string()),
            message: "Is 1 < 2 & 'yes'?".to_string(),
        })?;

        let message = compose(&submission, &credentials(), "Contact")?;
        let html = decode_entities(message.html_body());

        for value in ["Ada <Byron> O'Neil & Co", "Q&A", "Is 1 < 2 & 'yes'?"] {
            assert!(message.text_body().contains(value), "text body is missing {value}");
            assert!(html.contains(value), "html body is missing {value}");
        }

        assert!(!message.html_body().contains("<Byron>"));

        Ok(())
    }

    fn decode_entities(html: &str) -> String {
        html.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#x27;", "'")
            .replace("&#39;", "'")
            .replace("&#x2f;", "/")
            .replace("&#x2F;", "/")
            .replace("&amp;", "&")
    }

    #[test]
    fn test_html_styles_are_inlined() -> TestResult {
        let message = compose(&submission(None, "Hello"), &credentials(), "Contact")?;

        assert!(!message.html_body().contains("<style"));
        assert!(message.html_body().contains("white-space: pre-line"));

        Ok(())
    }

    #[test]
    fn test_html_escapes_submitted_markup() -> TestResult {
        let message = compose(
            &submission(None, "<script>alert(1)</script>"),
            &credentials(),
            "Contact",
        )?;

        assert!(!message.html_body().contains("<script>"));
        assert!(message.text_body().contains("<script>alert(1)</script>"));

        Ok(())
    }
}
