//! Type definitions for TypoScript
//!
//! This module contains the loosely typed value model and the scalar and
//! list helpers that reproduce TypoScript's string-first comparisons.

pub mod list;
pub mod scalar;
pub mod value;

pub use list::{in_list, trim_explode};
pub use scalar::{is_integer_string, is_numeric, leading_number, loose_equals, regular_cmp};
pub use value::Value;
