//! Comparison helpers shared by the condition families

use once_cell::sync::Lazy;
use regex::Regex;
use typoscript_core::types::{leading_number, loose_equals};
use typoscript_core::Value;

static OPERATOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(!?=+|<=?|>=?)\s*([^\s]*)\s*$").unwrap_or_else(|_| unreachable!("operator regex is valid"))
});

/// Compare `left` against an operator test such as `>=5`, `<3` or `!=1|2`
///
/// Ordering operators compare numerically. `!=` holds when none of the
/// `|`-separated values equals `left`; any other `=` form holds when one of
/// them does. A test without a recognizable operator never holds.
pub fn compare_number(test: &str, left: &Value) -> bool {
    let captures = match OPERATOR_PATTERN.captures(test) {
        Some(captures) => captures,
        None => return false,
    };
    let operator = &captures[1];
    let right = &captures[2];

    match operator {
        ">=" => left.to_number() >= leading_number(right),
        "<=" => left.to_number() <= leading_number(right),
        ">" => left.to_number() > leading_number(right),
        "<" => left.to_number() < leading_number(right),
        "!=" => {
            let number = left.to_number();
            !right.split('|').any(|single| number == leading_number(single.trim()))
        }
        _ => right.split('|').any(|single| loose_equals(left, single.trim())),
    }
}

/// Match `haystack` against a wildcard or regex needle
///
/// An identical string always matches. A needle wrapped in slashes is a
/// regular expression; otherwise `*` matches any run and `?` any single
/// character, anchored at both ends.
pub fn search_string_wildcard(haystack: &str, needle: &str) -> bool {
    if haystack == needle {
        return true;
    }
    if needle.is_empty() || needle == "0" {
        return false;
    }

    let pattern = if needle.len() > 2 && needle.starts_with('/') && needle.ends_with('/') {
        needle[1..needle.len() - 1].to_string()
    } else {
        let quoted = regex::escape(needle).replace("\\*", ".*").replace("\\?", ".");
        format!("^{}$", quoted)
    };

    match Regex::new(&pattern) {
        Ok(regex) => regex.is_match(haystack),
        Err(e) => {
            tracing::warn!("Invalid pattern '{}' in condition: {}", needle, e);
            false
        }
    }
}

/// `major.minor.patch` as `major * 1_000_000 + minor * 1_000 + patch`
///
/// Each part contributes its leading digits; missing parts count as zero.
/// Oversized major versions saturate at `u64::MAX`.
pub fn version_to_integer(version: &str) -> u64 {
    let mut parts = version.trim().split('.').map(|part| {
        let digits: String = part.trim().chars().take_while(char::is_ascii_digit).collect();
        digits.parse::<u64>().unwrap_or(0)
    });

    let major = parts.next().unwrap_or(0);
    let minor = parts.next().unwrap_or(0).min(999);
    let patch = parts.next().unwrap_or(0).min(999);
    major
        .saturating_mul(1_000_000)
        .saturating_add(minor * 1_000 + patch)
}
