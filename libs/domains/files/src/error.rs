use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("File is required")]
    MissingFile,

    /// Holds the declared type, if any
    #[error("Validation failed (expected type is image/jpeg)")]
    UnsupportedType(Option<String>),

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("File {0} not found")]
    NotFound(String),

    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type FileResult<T> = Result<T, FileError>;

impl From<axum::extract::multipart::MultipartError> for FileError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        FileError::Multipart(err.body_text())
    }
}

impl From<axum::extract::multipart::MultipartRejection> for FileError {
    fn from(err: axum::extract::multipart::MultipartRejection) -> Self {
        FileError::Multipart(err.body_text())
    }
}

impl From<FileError> for AppError {
    fn from(err: FileError) -> Self {
        match err {
            FileError::Io(e) => AppError::Io(e),
            FileError::NotFound(_) => AppError::NotFound(err.to_string()),
            FileError::MissingFile
            | FileError::UnsupportedType(_)
            | FileError::InvalidName(_)
            | FileError::Multipart(_) => AppError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for FileError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
