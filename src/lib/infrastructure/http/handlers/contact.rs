//! Contact form submission handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::contact::{ContactService, RelayResult, SubmissionRequest},
    infrastructure::http::{
        errors::{ApiError, ErrorResponse},
        state::AppState,
    },
};

/// Contact form request body
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ContactBody {
    /// The submitter's name
    #[schema(example = "Ada Lovelace")]
    name: String,

    /// The submitter's email address; replies go here
    #[schema(example = "ada@example.com")]
    email: String,

    /// An optional subject line
    #[schema(example = "Collaboration")]
    subject: Option<String>,

    /// The message
    #[schema(example = "Hello!")]
    message: String,
}

impl From<ContactBody> for SubmissionRequest {
    fn from(body: ContactBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            subject: body.subject,
            message: body.message,
        }
    }
}

/// Contact form response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    #[schema(example = true)]
    success: bool,

    #[schema(example = "Your message has been sent successfully!")]
    message: String,
}

impl From<RelayResult> for ContactResponse {
    fn from(result: RelayResult) -> Self {
        Self {
            success: result.success,
            message: result.message,
        }
    }
}

/// Relay a contact form submission by email
#[utoipa::path(
    post,
    operation_id = "submit_contact",
    tag = "Contact",
    path = "/contact",
    request_body = ContactBody,
    responses(
        (status = StatusCode::OK, description = "Message sent", body = ContactResponse),
        (status = StatusCode::BAD_REQUEST, description = "Missing or invalid fields", body = ErrorResponse, example = json!({"success": false, "message": "Please provide name, email, and message"})),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Configuration, verification or dispatch failure", body = ErrorResponse, example = json!({"success": false, "message": "Failed to send your message", "error": "Failed to send email"})),
    )
)]
pub async fn handler<C: ContactService>(
    State(state): State<AppState<C>>,
    request: Result<Json<ContactBody>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let Json(request) = request?;

    state
        .contact
        .submit(request.into())
        .await
        .map_err(|err| ApiError::relay(&err, state.config.environment))?;

    Ok(Json(RelayResult::sent().into()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{body::Bytes, http::StatusCode};
    use axum_test::TestServer;
    use testresult::TestResult;

    use crate::{
        domain::{
            communication::{credentials::ConfigurationError, mailer::MailerError},
            contact::{tests::MockContactService, RelayError, SubmissionError},
        },
        infrastructure::http::{
            router,
            state::tests::{test_state, test_state_in},
            Environment,
        },
    };

    use super::*;

    impl ContactBody {
        /// Create a new `ContactBody` instance
        fn new(name: &str, email: &str, subject: Option<&str>, message: &str) -> Self {
            Self {
                name: name.to_string(),
                email: email.to_string(),
                subject: subject.map(String::from),
                message: message.to_string(),
            }
        }
    }

    #[tokio::test]
    async fn test_contact_success() -> TestResult {
        let mut contact = MockContactService::new();

        contact
            .expect_submit()
            .times(1)
            .withf(|request| {
                request.name == "Ada"
                    && request.email == "ada@example.com"
                    && request.subject.as_deref() == Some("Hi")
                    && request.message == "Hello"
            })
            .returning(|_| Ok(()));

        let response = TestServer::new(router(test_state(Some(contact))))?
            .post("/contact")
            .json(&ContactBody::new("Ada", "ada@example.com", Some("Hi"), "Hello"))
            .await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!({
            "success": true,
            "message": "Your message has been sent successfully!"
        }));

        Ok(())
    }

    #[tokio::test]
    async fn test_contact_validation_error() -> TestResult {
        let mut contact = MockContactService::new();

        contact
            .expect_submit()
            .returning(|_| Err(RelayError::from(SubmissionError::MissingFields)));

        let response = TestServer::new(router(test_state(Some(contact))))?
            .post("/contact")
            .json(&serde_json::json!({ "name": "Ada" }))
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert!(!json.success);
        assert_eq!(json.message, "Please provide name, email, and message");
        assert_eq!(json.error, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_absent_fields_reach_the_relay_empty() -> TestResult {
        let mut contact = MockContactService::new();

        contact
            .expect_submit()
            .times(1)
            .withf(|request| {
                request.name == "Ada" && request.email.is_empty() && request.message.is_empty()
            })
            .returning(|_| Err(RelayError::from(SubmissionError::MissingFields)));

        let response = TestServer::new(router(test_state(Some(contact))))?
            .post("/contact")
            .json(&serde_json::json!({ "name": "Ada" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    #[tokio::test]
    async fn test_contact_configuration_error_in_production() -> TestResult {
        let mut contact = MockContactService::new();

        contact.expect_submit().returning(|_| {
            Err(RelayError::from(ConfigurationError::MissingSettings(vec![
                "password",
            ])))
        });

        let response = TestServer::new(router(test_state(Some(contact))))?
            .post("/contact")
            .json(&ContactBody::new("Ada", "ada@example.com", None, "Hello"))
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json.message, "Email service not properly configured");
        assert_eq!(json.error.as_deref(), Some("Missing configuration"));
        assert_eq!(json.stack, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_contact_dispatch_error_in_development() -> TestResult {
        let mut contact = MockContactService::new();

        contact.expect_submit().returning(|_| {
            Err(RelayError::Dispatch(MailerError::Timeout(
                Duration::from_secs(15),
            )))
        });

        let state = test_state_in(Some(contact), Environment::Development);

        let response = TestServer::new(router(state))?
            .post("/contact")
            .json(&ContactBody::new("Ada", "ada@example.com", None, "Hello"))
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json.message, "Failed to send your message");
        assert_eq!(
            json.error.as_deref(),
            Some("failed to send email: The mail server did not respond within 15s")
        );
        assert!(json.stack.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_contact_verification_error() -> TestResult {
        let mut contact = MockContactService::new();

        contact
            .expect_submit()
            .returning(|_| Err(RelayError::Verification(MailerError::Unverified)));

        let response = TestServer::new(router(test_state(Some(contact))))?
            .post("/contact")
            .json(&ContactBody::new("Ada", "ada@example.com", None, "Hello"))
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json.error.as_deref(), Some("Mail server verification failed"));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected_before_the_relay() -> TestResult {
        let mut contact = MockContactService::new();

        contact.expect_submit().times(0);

        let response = TestServer::new(router(test_state(Some(contact))))?
            .post("/contact")
            .bytes(Bytes::from_static(b"{not json"))
            .content_type("application/json")
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert!(!json.success);

        Ok(())
    }
}
