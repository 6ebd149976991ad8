use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// A rejected registration or account field, reported to the client with the
/// offending field as `location`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub message: String,
    pub location: &'static str,
}

impl FieldError {
    pub fn new(message: impl Into<String>, location: &'static str) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }

    pub fn username_taken() -> Self {
        Self::new("Username already taken", "username")
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error on {}: {}", .0.location, .0.message)]
    Validation(FieldError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => AppError::Validation(FieldError::username_taken()),
            other => AppError::Store(other),
        }
    }
}

impl From<FieldError> for AppError {
    fn from(err: FieldError) -> Self {
        AppError::Validation(err)
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(field) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "code": StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
                    "reason": "ValidationError",
                    "message": field.message,
                    "location": field.location,
                })),
            )
                .into_response(),
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Not Found" })),
            )
                .into_response(),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Unauthorized" })),
            )
                .into_response(),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({ "message": "Method Not Allowed" })),
            )
                .into_response(),
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                internal_server_error()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                internal_server_error()
            }
        }
    }
}

fn internal_server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Internal Server Error" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_shape() {
        let (status, body) =
            body_json(FieldError::new("Missing field", "username").into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], 422);
        assert_eq!(body["reason"], "ValidationError");
        assert_eq!(body["message"], "Missing field");
        assert_eq!(body["location"], "username");
    }

    #[tokio::test]
    async fn test_duplicate_username_maps_to_validation() {
        let (status, body) = body_json(StoreError::DuplicateUsername.into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Username already taken");
    }

    #[tokio::test]
    async fn test_method_not_allowed_shape() {
        let (status, body) = body_json(AppError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "message": "Method Not Allowed" }));
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let (status, body) =
            body_json(AppError::Internal(anyhow::anyhow!("pool exhausted"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Internal Server Error" }));
    }

    #[tokio::test]
    async fn test_store_error_hides_cause() {
        let (status, body) = body_json(StoreError::Database(sqlx::Error::PoolTimedOut).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal Server Error");
    }
}
