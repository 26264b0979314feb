//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// A required field whose value had the wrong JSON type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeMismatch {
    pub field: &'static str,
    pub expected: &'static str,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("type errors: {}", join_mismatches(.0))]
    InvalidTypes(Vec<TypeMismatch>),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("resource not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(sqlx::Error),
}

fn join_mismatches(list: &[TypeMismatch]) -> String {
    list.iter()
        .map(|m| format!("'{}' must be of type {}", m.field, m.expected))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<sqlx::Error> for ApiError {
    /// Row-not-found and constraint violations get their own statuses;
    /// everything else stays a driver error.
    fn from(e: sqlx::Error) -> Self {
        if matches!(e, sqlx::Error::RowNotFound) {
            return ApiError::NotFound;
        }
        if let sqlx::Error::Database(ref db) = e {
            match db.code().as_deref() {
                // unique_violation
                Some("23505") => return ApiError::Conflict(db.message().to_string()),
                // foreign_key_violation
                Some("23503") => return ApiError::NotFound,
                _ => {}
            }
        }
        ApiError::Db(e)
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingFields(_) | ApiError::InvalidTypes(_) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Db(e) => {
                tracing::error!(error = %e, "database failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            error: ErrorDetail {
                message: self.to_string(),
                status: status.as_u16(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_fields_envelope() {
        let response = ApiError::MissingFields(vec!["code", "name"]).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["message"], "missing fields: code, name");
        assert_eq!(body["error"]["status"], 400);
    }

    #[tokio::test]
    async fn type_errors_enumerate_all_violations() {
        let err = ApiError::InvalidTypes(vec![
            TypeMismatch { field: "comp_code", expected: "string" },
            TypeMismatch { field: "amt", expected: "number" },
        ]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["error"]["message"],
            "type errors: 'comp_code' must be of type string, 'amt' must be of type number"
        );
    }

    #[tokio::test]
    async fn not_found_envelope() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["message"], "resource not found");
        assert_eq!(body["error"]["status"], 404);
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(ApiError::from(sqlx::Error::RowNotFound), ApiError::NotFound));
    }
}
