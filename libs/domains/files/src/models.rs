use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One multipart part as received, before validation.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub field_name: String,
    pub original_name: String,
    /// Declared by the client; not sniffed
    pub mime_type: Option<String>,
    pub bytes: Bytes,
}

/// Metadata echoed back for an accepted upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadedFile {
    #[schema(example = "file")]
    pub field_name: String,
    #[schema(example = "chair.jpeg")]
    pub original_name: String,
    #[schema(example = "image/jpeg")]
    pub mime_type: String,
    /// Bytes
    pub size: u64,
    /// Stored name, `{uuid}.jpg`
    pub file_name: String,
    #[schema(example = "/api/files/product/0190f2a4-7d43-7c1e-9a5b-2f1d3c4b5a69.jpg")]
    pub location: String,
}
