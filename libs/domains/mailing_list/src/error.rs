use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmailError {
    /// Bad pagination parameters or an empty/malformed address
    #[error("{0}")]
    Validation(String),

    /// Address already present on create
    #[error("{0}")]
    Conflict(String),

    /// Any other database or I/O failure
    #[error("{0}")]
    Store(String),
}

pub type EmailResult<T> = Result<T, EmailError>;

impl EmailError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EmailError::Validation(_) | EmailError::Conflict(_) => StatusCode::BAD_REQUEST,
            EmailError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for EmailError {
    fn from(err: sqlx::Error) -> Self {
        EmailError::Store(err.to_string())
    }
}

/// `{"Err": message}` with 400 for caller mistakes and 500 for store failures.
impl IntoResponse for EmailError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Mailing list request failed");
        }
        (status, Json(json!({ "Err": self.to_string() }))).into_response()
    }
}

impl From<EmailError> for tonic::Status {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::Validation(msg) => tonic::Status::invalid_argument(msg),
            EmailError::Conflict(msg) => tonic::Status::already_exists(msg),
            EmailError::Store(msg) => tonic::Status::internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            EmailError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EmailError::Conflict("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EmailError::Store("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_grpc_status_mapping() {
        let status: tonic::Status = EmailError::Conflict("dup".into()).into();
        assert_eq!(status.code(), tonic::Code::AlreadyExists);
        assert_eq!(status.message(), "dup");

        let status: tonic::Status = EmailError::Validation("bad".into()).into();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);

        let status: tonic::Status = EmailError::Store("disk".into()).into();
        assert_eq!(status.code(), tonic::Code::Internal);
    }
}
