//! Adapters for the outside world: the SMTP transport and the HTTP API

pub mod email;
pub mod http;
