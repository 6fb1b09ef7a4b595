use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Runtime settings for the viewer service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    /// Interface the HTTP server binds to
    #[validate(length(min = 1))]
    pub host: String,

    #[validate(range(min = 1))]
    pub port: u16,

    /// Default tracing filter; `RUST_LOG` takes precedence
    #[validate(length(min = 1))]
    pub log_level: String,

    /// Largest accepted upload, in decoded bytes
    #[validate(range(min = 1))]
    pub max_upload_bytes: usize,

    /// Number of rows shown in the preview table
    #[validate(range(min = 1, max = 1000))]
    pub preview_rows: usize,

    /// WHATWG label used to decode uploads that carry no byte-order mark
    #[validate(custom(function = "validate_encoding"))]
    pub encoding: String,

    /// Trim surrounding whitespace from every field before type inference
    pub trim_whitespace: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            log_level: "info".to_string(),
            max_upload_bytes: 200 * 1024 * 1024,
            preview_rows: 5,
            encoding: "utf-8".to_string(),
            trim_whitespace: false,
        }
    }
}

fn validate_encoding(label: &str) -> Result<(), ValidationError> {
    if encoding_rs::Encoding::for_label(label.as_bytes()).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_encoding"))
    }
}
