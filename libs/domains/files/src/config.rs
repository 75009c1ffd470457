use core_config::{ConfigError, FromEnv, env_or_default, env_parse_optional};
use std::path::PathBuf;

/// Where accepted uploads go and how they are addressed afterwards.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub dir: PathBuf,
    /// Prefix of the `location` returned for each upload
    pub public_path: String,
    /// `None` lifts axum's default body limit on the upload route
    pub body_limit_bytes: Option<usize>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./static/products"),
            public_path: "/api/files/product".to_string(),
            body_limit_bytes: None,
        }
    }
}

/// Environment variables:
/// - `UPLOAD_DIR` (./static/products)
/// - `UPLOAD_PUBLIC_PATH` (/api/files/product)
/// - `UPLOAD_BODY_LIMIT_BYTES` (unset)
impl FromEnv for UploadConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let public_path = env_or_default("UPLOAD_PUBLIC_PATH", "/api/files/product");

        Ok(Self {
            dir: PathBuf::from(env_or_default("UPLOAD_DIR", "./static/products")),
            public_path: public_path.trim_end_matches('/').to_string(),
            body_limit_bytes: env_parse_optional("UPLOAD_BODY_LIMIT_BYTES")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_config_defaults() {
        temp_env::with_vars(
            [
                ("UPLOAD_DIR", None::<&str>),
                ("UPLOAD_PUBLIC_PATH", None),
                ("UPLOAD_BODY_LIMIT_BYTES", None),
            ],
            || {
                let config = UploadConfig::from_env().unwrap();
                assert_eq!(config.dir, PathBuf::from("./static/products"));
                assert_eq!(config.public_path, "/api/files/product");
                assert_eq!(config.body_limit_bytes, None);
            },
        );
    }

    #[test]
    fn test_upload_config_custom() {
        temp_env::with_vars(
            [
                ("UPLOAD_DIR", Some("/var/lib/catalog")),
                ("UPLOAD_PUBLIC_PATH", Some("https://cdn.example.com/img/")),
                ("UPLOAD_BODY_LIMIT_BYTES", Some("5242880")),
            ],
            || {
                let config = UploadConfig::from_env().unwrap();
                assert_eq!(config.dir, PathBuf::from("/var/lib/catalog"));
                assert_eq!(config.public_path, "https://cdn.example.com/img");
                assert_eq!(config.body_limit_bytes, Some(5 * 1024 * 1024));
            },
        );
    }

    #[test]
    fn test_upload_config_bad_limit() {
        temp_env::with_var("UPLOAD_BODY_LIMIT_BYTES", Some("lots"), || {
            let err = UploadConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("UPLOAD_BODY_LIMIT_BYTES"));
        });
    }
}
