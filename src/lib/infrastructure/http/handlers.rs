//! API handler modules

use std::any::Any;

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::error;
use utoipa::OpenApi;

use crate::domain::contact::ContactService;

use super::{errors::ErrorResponse, open_api::ApiDocs, state::AppState};

pub mod contact;
pub mod docs;
pub mod fallback;
pub mod uptime;

/// The API routes
pub fn router<C: ContactService>() -> Router<AppState<C>> {
    Router::new()
        .route("/contact", post(contact::handler))
        .route("/contact/fallback", get(fallback::handler))
        .route("/uptime", get(uptime::handler))
        .route("/openapi.json", get(Json(ApiDocs::openapi())))
        .route("/docs", get(docs::handler))
}

/// Catch panics and return a 500 error
pub fn panic_handler(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal server error".to_string()
    };

    error!(panic = %details, "request handler panicked");

    let error = ErrorResponse {
        success: false,
        message: "Internal server error".to_string(),
        error: None,
        stack: None,
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
}
