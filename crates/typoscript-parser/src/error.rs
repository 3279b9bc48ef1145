//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Custom modifier name is malformed or shadows a built-in
    #[error("Invalid modifier '{name}': {message}")]
    InvalidModifier { name: String, message: String },

    /// Object path is empty or otherwise unusable
    #[error("Invalid object path: {0}")]
    InvalidPath(String),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
