//! API error-handling module

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::contact::{RelayError, RelayResult};

use super::Environment;

/// A failure response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    #[schema(example = false)]
    pub success: bool,

    /// A message suitable for showing to the submitter
    #[schema(example = "Failed to send your message")]
    pub message: String,

    /// The failure: a generic label in production, the raw cause elsewhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Mail server verification failed")]
    pub error: Option<String>,

    /// Debug representation of the error, outside production only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// An error raised in the API
#[derive(Debug)]
pub struct ApiError {
    /// The status code
    pub status: StatusCode,

    /// The user-facing message
    pub message: String,

    /// The failure label or cause
    pub error: Option<String>,

    /// Debug detail, never set in production
    pub stack: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
            error: None,
            stack: None,
        }
    }

    /// Create a new not found error
    pub fn new_404(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Create new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Map a relay failure onto a response.
    ///
    /// Validation failures are 400 and carry only the message. Everything else is 500
    /// with an `error` field; the raw cause and `stack` are included only when
    /// `environment` allows it.
    pub fn relay(err: &RelayError, environment: Environment) -> Self {
        let expose = environment.exposes_error_detail();
        let result = RelayResult::failed(err, expose);

        if err.is_client_error() {
            return Self::new(StatusCode::BAD_REQUEST, &result.message);
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: result.message,
            error: Some(
                result
                    .error_detail
                    .unwrap_or_else(|| err.summary().to_string()),
            ),
            stack: expose.then(|| format!("{err:#?}")),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                success: false,
                message: self.message,
                error: self.error,
                stack: self.stack,
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("JsonRejection -> ApiError: {}", rejection.body_text());

        ApiError::new(rejection.status(), &rejection.body_text())
    }
}
