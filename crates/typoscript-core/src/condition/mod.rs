//! Condition Expression Module
//!
//! This module provides the shared condition expression logic used by:
//! - The condition matcher (evaluating whether a block applies)
//! - The TypoScript text parser (`[condition]` lines)
//! - Custom condition and user function plugins (argument parsing)
//!
//! # Syntax
//!
//! ## Single Conditions
//! ```text
//! [browser = msie]
//! [globalVar = TSFE:id > 10]
//! [page|layout = 2]
//! ```
//!
//! ## Combined Conditions
//! ```text
//! [hour = >8] && [hour = <18]
//! [loginUser = *] AND [usergroup = 3]
//! [IP = devIP] || [applicationContext = Development*]
//! [language = *de*][language = *en*]
//! ```
//!
//! Adjacent bracket groups without an operator are OR-ed. The word forms
//! `AND`/`OR` are case-insensitive. There is no operator precedence beyond
//! "AND binds tighter than OR" and no nesting; brackets inside a condition
//! are not supported.

mod parser;
mod types;

pub use parser::ConditionParser;
pub use types::{AtomicCondition, ConditionExpression, Resolution};
