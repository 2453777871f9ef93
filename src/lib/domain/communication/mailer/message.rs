//! Email message

use std::fmt;

use lettre::{
    message::{Mailbox, MultiPart},
    Address, Message,
};

use super::MailerError;

/// The relay's own mailbox, with a display name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sender {
    /// The display name
    pub name: String,

    /// The mailbox address
    pub address: Address,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" <{}>", self.name, self.address)
    }
}

/// A fully composed notification, ready for a transport.
///
/// The MIME message is built when the notification is created, so a transport only ever
/// receives messages that are known to be well formed.
#[derive(Clone, Debug)]
pub struct OutboundMessage {
    from: Sender,
    to: Address,
    reply_to: Address,
    subject: String,
    text_body: String,
    html_body: String,
    mime: Message,
}

impl OutboundMessage {
    /// Build a notification with plain text and HTML alternatives
    pub fn new(
        from: Sender,
        to: Address,
        reply_to: Address,
        subject: String,
        text_body: String,
        html_body: String,
    ) -> Result<Self, MailerError> {
        let mime = Message::builder()
            .from(Mailbox::new(Some(from.name.clone()), from.address.clone()))
            .to(Mailbox::new(None, to.clone()))
            .reply_to(Mailbox::new(None, reply_to.clone()))
            .subject(subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                text_body.clone(),
                html_body.clone(),
            ))?;

        Ok(Self {
            from,
            to,
            reply_to,
            subject,
            text_body,
            html_body,
            mime,
        })
    }

    /// The sender, always the relay's configured mailbox
    pub fn from(&self) -> &Sender {
        &self.from
    }

    /// The recipient
    pub fn to(&self) -> &Address {
        &self.to
    }

    /// Where replies go: the person who submitted the form
    pub fn reply_to(&self) -> &Address {
        &self.reply_to
    }

    /// The subject line
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The plain text body
    pub fn text_body(&self) -> &str {
        &self.text_body
    }

    /// The HTML body
    pub fn html_body(&self) -> &str {
        &self.html_body
    }

    /// The MIME message handed to the mail server
    pub fn mime(&self) -> &Message {
        &self.mime
    }
}
