use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// HTTP error with a client-facing message; `detail` is logged, never sent.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: &'static str, detail: Option<String>) -> Self {
        Self { status, message, detail }
    }

    pub fn data_required() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Data is required", None)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", None)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(detail.into()))
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(_) => Self::data_required(),
            ServiceError::NotFound(_) => Self::not_found(),
            other => Self::internal(other.to_string()),
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, detail = self.detail.as_deref().unwrap_or(""), "request failed");
        }
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("shared payload"), StatusCode::NOT_FOUND),
            (ServiceError::Db("disk full".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::DuplicateId("abc".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Timeout("get"), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::IdGeneration("no entropy".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn internal_detail_is_kept_out_of_the_message() {
        let e = JsonApiError::from(ServiceError::Db("SQLITE_CORRUPT: malformed".into()));
        assert_eq!(e.message, "Internal Server Error");
        assert!(e.detail.unwrap().contains("SQLITE_CORRUPT"));
    }
}
