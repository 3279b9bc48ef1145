//! TypoScript Parser - Key paths, value modifiers and configuration trees
//!
//! This crate provides:
//! - The dotted key tokenizer with backslash escaping
//! - The value modifier engine behind the `:=` operator
//! - A configuration tree addressed by dotted keys
//! - A line-oriented TypoScript text parser with condition blocks

pub mod error;
pub mod key;
pub mod modifier;
pub mod tree;
pub mod typoscript;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use key::{escape_key_segment, parse_next_key_segment, split_key_path};
pub use modifier::{apply_modifier, parse_modifier_call, ModifierEngine, ModifierFn, ValueModifier};
pub use tree::{ConfigNode, ConfigTree};
pub use typoscript::{
    ConditionEvaluator, IssueKind, ParseIssue, ParsedTypoScript, TypoScriptParser,
};
