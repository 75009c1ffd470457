use crate::error::{FileError, FileResult};
use uuid::Uuid;

/// Declared content types accepted on product image uploads
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg"];

pub const STORED_EXTENSION: &str = "jpg";

/// Returns the declared type when it is on the allow-list.
///
/// The match is exact: parameters or a different case are rejected.
pub fn validate_mime_type(mime_type: Option<&str>) -> FileResult<&str> {
    match mime_type {
        Some(mime) if ALLOWED_MIME_TYPES.contains(&mime) => Ok(mime),
        other => Err(FileError::UnsupportedType(other.map(str::to_string))),
    }
}

/// Accepts only names of the form `{uuid}.jpg`, as produced on upload.
pub fn validate_file_name(file_name: &str) -> FileResult<Uuid> {
    let invalid = || FileError::InvalidName(file_name.to_string());

    let stem = file_name
        .strip_suffix(STORED_EXTENSION)
        .and_then(|rest| rest.strip_suffix('.'))
        .ok_or_else(invalid)?;

    if stem.len() != 36 {
        return Err(invalid());
    }
    Uuid::parse_str(stem).map_err(|_| invalid())
}
