//! Direct-contact fallback handler

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::contact::ContactService,
    infrastructure::http::{
        errors::{ApiError, ErrorResponse},
        state::AppState,
    },
};

const MAILTO_SUBJECT: &str = "Contact from Portfolio Website";

/// Where to write when the form is not working
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FallbackResponse {
    /// The address to copy
    #[schema(example = "me@example.com")]
    pub email: String,

    /// A link that opens the visitor's mail client
    #[schema(example = "mailto:me@example.com?subject=Contact%20from%20Portfolio%20Website")]
    pub mailto: String,
}

impl FallbackResponse {
    /// Build the fallback for an address
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            mailto: format!(
                "mailto:{email}?subject={subject}",
                subject = urlencoding::encode(MAILTO_SUBJECT)
            ),
        }
    }
}

/// Get the direct-contact fallback
#[utoipa::path(
    get,
    operation_id = "contact_fallback",
    tag = "Contact",
    path = "/contact/fallback",
    responses(
        (status = StatusCode::OK, description = "Fallback contact details", body = FallbackResponse),
        (status = StatusCode::NOT_FOUND, description = "No fallback address configured", body = ErrorResponse),
    )
)]
pub async fn handler<C: ContactService>(
    State(state): State<AppState<C>>,
) -> Result<Json<FallbackResponse>, ApiError> {
    state
        .config
        .fallback_email
        .as_deref()
        .map(|email| Json(FallbackResponse::new(email)))
        .ok_or_else(|| ApiError::new_404("No fallback contact address is configured"))
}
