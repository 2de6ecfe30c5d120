use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sheet::SheetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Submission failed: {0}")]
    Sheet(#[from] SheetError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::MalformedPayload { .. } => StatusCode::BAD_REQUEST,
            AppError::Sheet { .. } => StatusCode::BAD_GATEWAY,
        };

        (status, self.to_string()).into_response()
    }
}
