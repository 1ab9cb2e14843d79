use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::ServiceError;

/// JSON body extractor whose rejections carry the service error body
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPayload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonPayload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonPayload(value)),
            Err(rejection) => Err(malformed(rejection)),
        }
    }
}

fn malformed(rejection: JsonRejection) -> ServiceError {
    ServiceError::MalformedPayload(rejection.body_text())
}

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::body::Body;
    use axum::http::{header, Request as HttpRequest};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    fn json_request(body: &'static str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn well_formed_body_is_extracted() {
        let JsonPayload(named) = JsonPayload::<Named>::from_request(json_request(r#"{"name":"Alice"}"#), &())
            .await
            .unwrap();
        assert_eq!(named.name, "Alice");
    }

    #[tokio::test]
    async fn syntax_error_becomes_malformed_payload() {
        let err = JsonPayload::<Named>::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();
        assert_matches!(err, ServiceError::MalformedPayload(_));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_becomes_malformed_payload() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"name":"Alice"}"#))
            .unwrap();
        let err = JsonPayload::<Named>::from_request(request, &())
            .await
            .unwrap_err();
        assert_matches!(err, ServiceError::MalformedPayload(_));
    }
}
