//! Files Domain
//!
//! Product image uploads: multipart intake, the `image/jpeg` allow-list and
//! storage of accepted files.
//!
//! ```rust,no_run
//! use domain_files::{FileService, InMemoryFileStorage, handlers};
//!
//! let service = FileService::new(InMemoryFileStorage::new(), "/api/files/product");
//! let router = handlers::router(service, None);
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod service;
pub mod storage;
pub mod validator;

pub use config::UploadConfig;
pub use error::{FileError, FileResult};
pub use models::{IncomingFile, UploadedFile};
pub use service::FileService;
pub use storage::{FileStorage, InMemoryFileStorage, LocalFileStorage};
pub use validator::{ALLOWED_MIME_TYPES, validate_file_name, validate_mime_type};
