//! Servers

pub mod http;
