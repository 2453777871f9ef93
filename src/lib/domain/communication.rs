//! Outbound email building blocks

pub mod credentials;
pub mod email_address;
pub mod mailer;
