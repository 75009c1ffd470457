//! Request extractors that reject through [`AppError`](crate::errors::AppError).
//!
//! Keeps extractor failures in the same [`ErrorResponse`](crate::errors::ErrorResponse)
//! shape as handler errors.

pub mod uuid_path;
pub mod validated_json;
pub mod validated_query;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
