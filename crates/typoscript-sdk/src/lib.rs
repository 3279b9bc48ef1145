//! TypoScript SDK
//!
//! High-level API for matching TypoScript conditions, applying value
//! modifiers and parsing TypoScript setups.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;

// Re-export main types
pub use builder::ConditionEngineBuilder;
pub use config::MatcherConfig;
pub use engine::{ConditionEngine, ContextEvaluator};
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use typoscript_core::{AtomicCondition, Resolution, Value};
pub use typoscript_parser::{ConfigTree, IssueKind, ParsedTypoScript};
pub use typoscript_runtime::{CustomCondition, FrontendUser, MatchTrace, PredicateContext};
