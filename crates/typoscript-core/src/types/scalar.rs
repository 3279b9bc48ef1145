//! Scalar coercion helpers
//!
//! TypoScript values are untyped strings. Numeric comparisons coerce a
//! string by parsing its leading numeric prefix and fall back to `0.0` when
//! there is none, so `"12px"` is `12.0` and `"abc"` is `0.0`.

use super::value::Value;
use std::cmp::Ordering;

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Length of the longest numeric prefix of `bytes` (sign, digits, fraction, exponent).
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

/// Parse the leading numeric prefix of `s`, defaulting to `0.0`.
///
/// Leading whitespace is skipped; anything after the prefix is ignored.
pub fn leading_number(s: &str) -> f64 {
    let start = s.bytes().position(|b| !is_space(b)).unwrap_or(s.len());
    let rest = &s[start..];
    let len = numeric_prefix_len(rest.as_bytes());
    if len == 0 {
        return 0.0;
    }
    rest[..len].parse::<f64>().unwrap_or(0.0)
}

/// Whether the whole string (ignoring surrounding whitespace) is a number.
pub fn is_numeric(s: &str) -> bool {
    let trimmed = s.trim_matches(|c: char| c.is_ascii() && is_space(c as u8));
    !trimmed.is_empty() && numeric_prefix_len(trimmed.as_bytes()) == trimmed.len()
}

/// Whether the string is the canonical form of an integer (`"42"`, `"-7"`, `"0"`).
pub fn is_integer_string(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return false;
    }
    if s == "-0" {
        return false;
    }
    s.parse::<i64>().is_ok()
}

/// Loose equality between a value and a string operand.
///
/// Numbers compare against the operand's numeric prefix, two numeric
/// strings compare numerically, everything else compares as strings.
pub fn loose_equals(left: &Value, right: &str) -> bool {
    match left {
        Value::Number(n) => *n == leading_number(right),
        Value::String(s) => {
            if is_numeric(s) && is_numeric(right) {
                leading_number(s) == leading_number(right)
            } else {
                s == right
            }
        }
        Value::Null => right.is_empty(),
        Value::Bool(b) => *b == Value::String(right.to_string()).is_truthy(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Ordering used by the default list sort: numeric strings compare by
/// value, any other pair compares byte-wise.
pub fn regular_cmp(a: &str, b: &str) -> Ordering {
    if is_numeric(a) && is_numeric(b) {
        leading_number(a)
            .partial_cmp(&leading_number(b))
            .unwrap_or(Ordering::Equal)
    } else {
        a.cmp(b)
    }
}
