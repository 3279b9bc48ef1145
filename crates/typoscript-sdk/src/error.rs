//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Parser error
    #[error("Parser error: {0}")]
    ParseError(#[from] typoscript_parser::ParseError),

    /// Runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] typoscript_runtime::RuntimeError),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let error = SdkError::ConfigError("unknown user function".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("unknown user function"));
    }

    #[test]
    fn test_runtime_error_conversion() {
        let runtime_error = typoscript_runtime::RuntimeError::InvalidName {
            kind: "condition",
            name: String::new(),
        };
        let sdk_error: SdkError = runtime_error.into();
        assert!(sdk_error.to_string().starts_with("Runtime error: Invalid condition name"));
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse_error = typoscript_parser::ParseError::InvalidPath("a..b".to_string());
        let sdk_error: SdkError = parse_error.into();
        assert!(sdk_error.to_string().contains("Parser error"));
        assert!(sdk_error.to_string().contains("a..b"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let sdk_error: SdkError = io_error.into();
        assert!(sdk_error.to_string().contains("I/O error"));
        assert!(sdk_error.to_string().contains("File not found"));
    }
}
