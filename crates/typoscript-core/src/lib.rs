//! TypoScript Core - Core types shared by the TypoScript crates
//!
//! This crate provides the fundamental types used across the workspace:
//! - Value types for request parameters, page records and globals
//! - Loose scalar helpers (numeric prefix coercion, loose equality)
//! - Comma/pipe list helpers
//! - Condition expression types and the expression splitter

pub mod condition;
pub mod types;

// Re-export commonly used types
pub use condition::{AtomicCondition, ConditionExpression, ConditionParser, Resolution};
pub use types::Value;
