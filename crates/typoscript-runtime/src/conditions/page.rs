//! Conditions on the current page and its rootline

use crate::context::PredicateContext;
use typoscript_core::types::{loose_equals, trim_explode};
use typoscript_core::Value;

/// `page|field = value`: the field's string form must equal the value
pub(super) fn field(context: &PredicateContext, qualifiers: &[String], value: &str) -> bool {
    let name = match qualifiers.first() {
        Some(name) if !name.is_empty() => name,
        _ => return false,
    };
    match context.page.get(name) {
        Some(field) if !field.is_null() => field.to_scalar_string() == value,
        _ => false,
    }
}

pub(super) fn tree_level(context: &PredicateContext, value: &str) -> bool {
    let level = Value::from(context.tree_level());
    trim_explode(',', value, true)
        .iter()
        .any(|test| loose_equals(&level, test))
}

/// Any listed page id in the rootline; with `exclude_current` the current
/// page itself being listed fails the condition
pub(super) fn pid_in_rootline(context: &PredicateContext, value: &str, exclude_current: bool) -> bool {
    let values = trim_explode(',', value, true);

    if exclude_current {
        if let Some(page_id) = context.page_id {
            let current = Value::from(page_id);
            if values.iter().any(|test| loose_equals(&current, test)) {
                return false;
            }
        }
    }

    values.iter().any(|test| {
        context
            .rootline
            .iter()
            .any(|uid| loose_equals(&Value::from(*uid), test))
    })
}
