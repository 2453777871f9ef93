//! OpenAPI module

use utoipa::OpenApi;

use crate::infrastructure::http::{errors::ErrorResponse, handlers::*};

/// The OpenAPI document for the relay
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Contact Relay"),
    paths(contact::handler, fallback::handler, uptime::handler),
    components(schemas(
        contact::ContactBody,
        contact::ContactResponse,
        fallback::FallbackResponse,
        uptime::UptimeResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDocs;
