//! Domain logic, independent of HTTP and SMTP

pub mod communication;
pub mod contact;
