use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    /// Message is client-facing, e.g. `Product with chair not found`
    #[error("{0}")]
    NotFound(String),

    /// Carries the database's constraint detail, e.g. `Key (slug)=(chair) already exists.`
    #[error("{0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    /// Cause is logged where it is classified and never sent to clients
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(msg) => AppError::NotFound(msg),
            ProductError::Conflict(detail) => AppError::Conflict(detail),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Internal(_) => {
                AppError::InternalServerError(ErrorCode::InternalError.default_message().to_string())
            }
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
