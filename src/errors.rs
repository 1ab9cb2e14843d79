use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use sea_orm::SqlErr;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

/// Field name to the list of messages produced for it by the payload validators.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Error body returned for every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Bad Request",
    "message": "Invalid order id or product id",
    "request_id": "req-abc123xyz",
    "timestamp": "2024-12-09T10:30:00.000Z"
}))]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Bad Request", "Internal Server Error")
    #[schema(example = "Bad Request")]
    pub error: String,
    /// Human-readable error description
    #[schema(example = "Invalid customer id")]
    pub message: String,
    /// Per-field validation messages, present only for rejected payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
    /// Unique request identifier for support and debugging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "req-abc123xyz")]
    pub request_id: Option<String>,
    /// ISO 8601 timestamp when error occurred
    #[schema(example = "2024-12-09T10:30:00.000Z")]
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Validation failed")]
    ValidationError(FieldErrors),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    InvalidId(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),
}

/// Field name to messages. A bare `required` check gets the missing-field
/// message, other checks keep their own or fall back to the code.
pub fn collect_field_errors(err: &validator::ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for (field, errors) in err.field_errors() {
        let messages = errors
            .iter()
            .map(|e| match (&e.message, e.code.as_ref()) {
                (Some(m), _) => m.to_string(),
                (None, "required") => crate::dto::MISSING_FIELD.to_string(),
                (None, code) => format!("Invalid value ({})", code),
            })
            .collect();
        fields.insert(field.to_string(), messages);
    }
    fields
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(collect_field_errors(&err))
    }
}

impl ServiceError {
    /// Validation failure on a single field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![message.into()]);
        ServiceError::ValidationError(fields)
    }

    /// Maps a store-level unique violation to `conflict`, anything else stays a database error.
    pub fn from_write(err: DbErr, conflict: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::Conflict(conflict.into()),
            _ => ServiceError::DatabaseError(err),
        }
    }

    /// Returns the HTTP status code for this error.
    /// Every client-caused failure is a 400, whatever its kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ValidationError(_)
            | Self::MalformedPayload(_)
            | Self::BadRequest(_)
            | Self::InvalidId(_)
            | Self::NotFound(_)
            | Self::Conflict(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Store failures return a generic message to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            _ => self.to_string(),
        }
    }

    fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            Self::ValidationError(fields) => Some(fields.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Self::DatabaseError(e) = &self {
            error!(error = %e, "Unhandled database failure");
        }

        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            field_errors: self.field_errors(),
            request_id: current_request_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use validator::{ValidationError, ValidationErrors};

    async fn body_of(response: Response) -> ErrorResponse {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn service_error_response_includes_request_id() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("req-123"), async {
                ServiceError::InvalidId("Invalid customer id".into()).into_response()
            })
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let payload = body_of(response).await;
        assert_eq!(payload.request_id.as_deref(), Some("req-123"));
        assert_eq!(payload.message, "Invalid customer id");
        assert!(payload.field_errors.is_none());
    }

    #[test]
    fn client_errors_all_map_to_bad_request() {
        let errors = [
            ServiceError::field("name", "required"),
            ServiceError::MalformedPayload("x".into()),
            ServiceError::BadRequest("x".into()),
            ServiceError::InvalidId("x".into()),
            ServiceError::NotFound("x".into()),
            ServiceError::Conflict("x".into()),
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{err:?}");
        }
        assert_eq!(
            ServiceError::DatabaseError(DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_error_message_is_generic() {
        let err = ServiceError::DatabaseError(DbErr::Custom("connection refused at 10.0.0.1".into()));
        assert_eq!(err.response_message(), "Database error");
    }

    #[test]
    fn non_unique_write_failure_stays_database_error() {
        let err = ServiceError::from_write(DbErr::Custom("disk full".into()), "duplicate");
        assert!(matches!(err, ServiceError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn validation_errors_are_reported_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("required"));
        errors.add("email", ValidationError::new("length"));

        let response = ServiceError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let payload = body_of(response).await;
        let fields = payload.field_errors.expect("field errors expected");
        assert_eq!(fields["name"], vec!["Missing data for required field.".to_string()]);
        assert_eq!(fields["email"], vec!["Invalid value (length)".to_string()]);
        assert_eq!(payload.message, "Validation failed");
    }
}
