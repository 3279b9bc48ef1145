//! `globalVar` and `globalString` conditions and the variable paths they read

use crate::compare::{compare_number, search_string_wildcard};
use crate::context::PredicateContext;
use typoscript_core::types::trim_explode;
use typoscript_core::Value;

/// Read a variable path
///
/// | Path | Source |
/// |------|--------|
/// | `GP:tx_news\|id` | request parameters |
/// | `ENV:HOME` | environment |
/// | `IENV:HTTP_HOST` | server variables |
/// | `LIT:text` | the literal text |
/// | `TSFE:id` | globals below `TSFE` |
/// | `some\|path` | globals |
///
/// Paths ending on a container, and unknown sources, yield `None`.
pub fn get_variable(context: &PredicateContext, path: &str) -> Option<Value> {
    let (source, key) = match path.split_once(':') {
        Some(split) => split,
        None => return global_scalar(&context.globals, path),
    };

    let segments: Vec<&str> = key.split('|').map(str::trim).collect();
    let first = segments.first().copied().unwrap_or("");
    if first.is_empty() {
        return None;
    }

    match source.trim() {
        "LIT" => Some(Value::String(key.trim().to_string())),
        "GP" => {
            let value = context.request_params.get(first)?;
            descend(value, &segments[1..])
        }
        "ENV" => {
            let value = Value::String(context.environment.get(first)?.clone());
            descend(&value, &segments[1..])
        }
        "IENV" => {
            let value = Value::String(context.server_variable(first).to_string());
            descend(&value, &segments[1..])
        }
        "TSFE" => {
            let tsfe = context.globals.get("TSFE")?;
            global_scalar(tsfe, key)
        }
        other => {
            tracing::debug!("Unknown variable source '{}'", other);
            None
        }
    }
}

/// Follow the remaining path below a source value; a path into a scalar
/// yields an empty string
fn descend(value: &Value, rest: &[&str]) -> Option<Value> {
    if rest.is_empty() || rest.iter().all(|segment| segment.is_empty()) {
        return scalar(value);
    }
    match value {
        Value::Array(_) | Value::Object(_) => scalar(value.get_path(rest)?),
        _ => Some(Value::String(String::new())),
    }
}

fn global_scalar(root: &Value, path: &str) -> Option<Value> {
    let segments: Vec<&str> = path.split('|').map(str::trim).collect();
    scalar(root.get_path(&segments)?)
}

fn scalar(value: &Value) -> Option<Value> {
    match value {
        Value::Array(_) | Value::Object(_) => None,
        other => Some(other.clone()),
    }
}

/// Comma list of `path<operator>number` tests
pub(super) fn global_var(context: &PredicateContext, value: &str) -> bool {
    trim_explode(',', value, true).iter().any(|test| {
        let split = test.find(['!', '=', '<', '>']).unwrap_or(test.len());
        let (path, comparison) = test.split_at(split);
        let current = get_variable(context, path.trim()).unwrap_or_default();
        compare_number(comparison, &current)
    })
}

/// Comma list of `path = pattern` tests, matched with wildcards
pub(super) fn global_string(context: &PredicateContext, value: &str) -> bool {
    trim_explode(',', value, true).iter().any(|test| {
        let (path, pattern) = test.split_once('=').unwrap_or((test.as_str(), ""));
        let current = get_variable(context, path.trim())
            .map(|value| value.to_scalar_string())
            .unwrap_or_default();
        search_string_wildcard(&current, pattern.trim())
    })
}
