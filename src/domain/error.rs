use serde::Serialize;
use thiserror::Error;

/// Failure to turn an upload into a dataset.
///
/// This is the only error a user ever sees. It covers rejected uploads, undecodable
/// bytes and malformed CSV alike; the message is the underlying diagnostic verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Start-up and infrastructure errors. These never reach the page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_displays_message_verbatim() {
        let err = ParseError::new("No columns to parse from file");
        assert_eq!(err.to_string(), "No columns to parse from file");
        assert_eq!(err.message(), "No columns to parse from file");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.to_string(), "IO error: port taken");
    }

    #[test]
    fn test_figment_error_conversion() {
        let err: AppError = figment::Error::from("missing field `port`".to_string()).into();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error: missing field"));
    }
}
