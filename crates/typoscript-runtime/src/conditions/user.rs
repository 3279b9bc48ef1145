//! Conditions on the frontend user

use crate::context::PredicateContext;
use typoscript_core::types::trim_explode;

/// Logged in: `*` or the user id. Not logged in: only an empty value matches.
pub(super) fn login_user(context: &PredicateContext, value: &str) -> bool {
    match &context.user {
        Some(user) => {
            let id = user.id.to_string();
            trim_explode(',', value, true)
                .iter()
                .any(|test| test == "*" || *test == id)
        }
        None => value.is_empty(),
    }
}

pub(super) fn usergroup(context: &PredicateContext, value: &str) -> bool {
    let user = match &context.user {
        Some(user) => user,
        None => return false,
    };
    let groups: Vec<String> = user.groups.iter().map(ToString::to_string).collect();

    trim_explode(',', value, true)
        .iter()
        .any(|test| test == "*" || groups.contains(test))
}
