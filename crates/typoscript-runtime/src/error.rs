//! Runtime error types
//!
//! Evaluation itself never fails: unknown or malformed conditions resolve to
//! "no match". Errors are reserved for plugin registration.

use thiserror::Error;

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Plugin name is empty or contains forbidden characters
    #[error("Invalid {kind} name: '{name}'")]
    InvalidName { kind: &'static str, name: String },

    /// Plugin name is already taken
    #[error("{kind} '{name}' is already registered")]
    DuplicateRegistration { kind: &'static str, name: String },
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
