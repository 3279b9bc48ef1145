//! User functions callable from `[userFunc = name(arguments)]`
//!
//! A function is only callable when it is both registered and allow-listed.

use crate::error::{Result, RuntimeError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

static CALL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([^(\s]+)\s*(?:\((.*)\))?\s*$").unwrap_or_else(|_| unreachable!("call regex is valid"))
});

/// Function deciding a `userFunc` condition from its arguments
pub type UserFunction = Arc<dyn Fn(&[String]) -> bool + Send + Sync>;

/// Split a `userFunc` call into function name and raw argument text
pub fn parse_user_func_call(call: &str) -> Option<(String, String)> {
    let captures = CALL_PATTERN.captures(call)?;
    let name = captures[1].to_string();
    let arguments = captures.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
    Some((name, arguments))
}

/// Split an argument list on commas, honouring single and double quotes
///
/// Unquoted arguments are trimmed. Inside quotes the quote character may be
/// escaped with a backslash. Anything between a closing quote and the next
/// comma is dropped.
pub fn parse_user_func_arguments(arguments: &str) -> Vec<String> {
    let chars: Vec<char> = arguments.trim().chars().collect();
    let mut result = Vec::new();
    if chars.is_empty() {
        return result;
    }

    let mut pos = 0;
    loop {
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }

        if pos < chars.len() && (chars[pos] == '"' || chars[pos] == '\'') {
            let quote = chars[pos];
            pos += 1;
            let mut segment = String::new();
            while pos < chars.len() && chars[pos] != quote {
                if chars[pos] == '\\' && chars.get(pos + 1) == Some(&quote) {
                    pos += 1;
                }
                segment.push(chars[pos]);
                pos += 1;
            }
            result.push(segment);
            while pos < chars.len() && chars[pos] != ',' {
                pos += 1;
            }
        } else {
            let start = pos;
            while pos < chars.len() && chars[pos] != ',' {
                pos += 1;
            }
            let segment: String = chars[start..pos].iter().collect();
            result.push(segment.trim().to_string());
        }

        if pos >= chars.len() {
            break;
        }
        // skip the comma
        pos += 1;
    }

    result
}

/// Registered user functions and the allow-list gating them
#[derive(Clone, Default)]
pub struct UserFunctionRegistry {
    functions: HashMap<String, UserFunction>,
    allowed: HashSet<String>,
}

impl fmt::Debug for UserFunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("UserFunctionRegistry")
            .field("functions", &names)
            .field("allowed", &self.allowed)
            .finish()
    }
}

impl UserFunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under `name`
    pub fn register<F>(&mut self, name: &str, function: F) -> Result<()>
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c == '(' || c == ')') {
            return Err(RuntimeError::InvalidName {
                kind: "user function",
                name: name.to_string(),
            });
        }
        if self.functions.contains_key(name) {
            return Err(RuntimeError::DuplicateRegistration {
                kind: "User function",
                name: name.to_string(),
            });
        }
        self.functions.insert(name.to_string(), Arc::new(function));
        Ok(())
    }

    /// Permit calls to `name`
    pub fn allow(&mut self, name: impl Into<String>) {
        self.allowed.insert(name.into());
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn is_allowed(&self, name: &str) -> bool {
        self.allowed.contains(name)
    }

    pub fn allowed(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(String::as_str)
    }

    /// Call `name`; `None` when it is unknown or not allow-listed
    pub fn call(&self, name: &str, arguments: &[String]) -> Option<bool> {
        let function = match self.functions.get(name) {
            Some(function) => function,
            None => {
                tracing::warn!("User function '{}' is not registered", name);
                return None;
            }
        };
        if !self.is_allowed(name) {
            tracing::warn!("User function '{}' is not allow-listed", name);
            return None;
        }
        Some(function(arguments))
    }

    /// Evaluate a full `name(arguments)` call text
    pub fn evaluate(&self, call: &str) -> bool {
        match parse_user_func_call(call) {
            Some((name, arguments)) => self
                .call(&name, &parse_user_func_arguments(&arguments))
                .unwrap_or(false),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_call() {
        assert_eq!(
            parse_user_func_call("isWeekend()"),
            Some(("isWeekend".to_string(), String::new()))
        );
        assert_eq!(
            parse_user_func_call(" check ( a, b ) "),
            Some(("check".to_string(), " a, b ".to_string()))
        );
        assert_eq!(parse_user_func_call("plain"), Some(("plain".to_string(), String::new())));
        assert_eq!(parse_user_func_call("   "), None);
    }

    #[test]
    fn test_parse_arguments() {
        assert!(parse_user_func_arguments("").is_empty());
        assert_eq!(parse_user_func_arguments(" a , b,c "), vec!["a", "b", "c"]);
        assert_eq!(parse_user_func_arguments("a,,b"), vec!["a", "", "b"]);
        assert_eq!(parse_user_func_arguments("a,"), vec!["a", ""]);
    }

    #[test]
    fn test_parse_quoted_arguments() {
        assert_eq!(
            parse_user_func_arguments(r#""x, y", 'z'"#),
            vec!["x, y", "z"]
        );
        assert_eq!(parse_user_func_arguments(r#""say \"hi\"", 2"#), vec![r#"say "hi""#, "2"]);
        assert_eq!(parse_user_func_arguments("' padded ' junk, next"), vec![" padded ", "next"]);
    }

    #[test]
    fn test_call_requires_registration_and_allow_list() {
        let mut registry = UserFunctionRegistry::new();
        registry
            .register("hasArgs", |args: &[String]| !args.is_empty())
            .unwrap();

        assert_eq!(registry.call("hasArgs", &["x".to_string()]), None);
        registry.allow("hasArgs");
        assert_eq!(registry.call("hasArgs", &["x".to_string()]), Some(true));
        assert_eq!(registry.call("hasArgs", &[]), Some(false));

        registry.allow("missing");
        assert_eq!(registry.call("missing", &[]), None);
    }

    #[test]
    fn test_evaluate_call_text() {
        let mut registry = UserFunctionRegistry::new();
        registry
            .register("equals", |args: &[String]| args.len() == 2 && args[0] == args[1])
            .unwrap();
        registry.allow("equals");

        assert!(registry.evaluate("equals(a, a)"));
        assert!(!registry.evaluate("equals(a, b)"));
        assert!(!registry.evaluate("unknown(a)"));
    }

    #[test]
    fn test_register_rejects_bad_names() {
        let mut registry = UserFunctionRegistry::new();
        assert!(registry.register("", |_: &[String]| true).is_err());
        assert!(registry.register("has space", |_: &[String]| true).is_err());
        registry.register("ok", |_: &[String]| true).unwrap();
        assert_eq!(
            registry.register("ok", |_: &[String]| false),
            Err(RuntimeError::DuplicateRegistration {
                kind: "User function",
                name: "ok".to_string()
            })
        );
        assert!(registry.is_registered("ok"));
        assert!(!registry.is_allowed("ok"));
    }
}
