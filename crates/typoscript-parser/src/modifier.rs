//! Value modifiers
//!
//! Modifiers implement the `:=` assignment operator, e.g.
//! `page.10.value := appendString( world)`. A modifier receives its
//! argument and the current value of the object path and returns the new
//! value. List modifiers treat the value as a comma separated list whose
//! elements are trimmed; commas cannot be escaped.

use crate::error::{ParseError, Result};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use typoscript_core::types::{leading_number, regular_cmp, trim_explode};

/// Custom modifier callback: `(argument, current) -> new value`
pub type ModifierFn = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Built-in value modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueModifier {
    PrependString,
    AppendString,
    RemoveString,
    ReplaceString,
    AddToList,
    RemoveFromList,
    UniqueList,
    ReverseList,
    SortList,
}

impl ValueModifier {
    pub const ALL: [ValueModifier; 9] = [
        ValueModifier::PrependString,
        ValueModifier::AppendString,
        ValueModifier::RemoveString,
        ValueModifier::ReplaceString,
        ValueModifier::AddToList,
        ValueModifier::RemoveFromList,
        ValueModifier::UniqueList,
        ValueModifier::ReverseList,
        ValueModifier::SortList,
    ];

    /// Look up a built-in modifier by its (case-sensitive) name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|modifier| modifier.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueModifier::PrependString => "prependString",
            ValueModifier::AppendString => "appendString",
            ValueModifier::RemoveString => "removeString",
            ValueModifier::ReplaceString => "replaceString",
            ValueModifier::AddToList => "addToList",
            ValueModifier::RemoveFromList => "removeFromList",
            ValueModifier::UniqueList => "uniqueList",
            ValueModifier::ReverseList => "reverseList",
            ValueModifier::SortList => "sortList",
        }
    }

    /// Apply the modifier to `current`
    pub fn apply(&self, argument: &str, current: &str) -> String {
        match self {
            ValueModifier::PrependString => format!("{}{}", argument, current),
            ValueModifier::AppendString => format!("{}{}", current, argument),
            ValueModifier::RemoveString => replace_all(current, argument, ""),
            ValueModifier::ReplaceString => {
                let (search, replace) = argument.split_once('|').unwrap_or((argument, ""));
                replace_all(current, search, replace)
            }
            ValueModifier::AddToList => {
                // An empty argument still adds an (empty) element.
                if current.is_empty() {
                    argument.trim().to_string()
                } else {
                    format!("{},{}", current, argument.trim())
                }
            }
            ValueModifier::RemoveFromList => {
                let remove = trim_explode(',', argument, false);
                trim_explode(',', current, false)
                    .into_iter()
                    .filter(|element| !remove.contains(element))
                    .collect::<Vec<_>>()
                    .join(",")
            }
            ValueModifier::UniqueList => {
                let mut unique: Vec<String> = Vec::new();
                for element in trim_explode(',', current, false) {
                    if !unique.contains(&element) {
                        unique.push(element);
                    }
                }
                unique.join(",")
            }
            ValueModifier::ReverseList => {
                let mut elements = trim_explode(',', current, false);
                elements.reverse();
                elements.join(",")
            }
            ValueModifier::SortList => sort_list(argument, current),
        }
    }
}

impl fmt::Display for ValueModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn replace_all(subject: &str, search: &str, replace: &str) -> String {
    if search.is_empty() {
        return subject.to_string();
    }
    subject.replace(search, replace)
}

fn sort_list(argument: &str, current: &str) -> String {
    let flags: Vec<String> = trim_explode(',', argument, false)
        .into_iter()
        .map(|flag| flag.to_lowercase())
        .collect();
    let numeric = flags.iter().any(|flag| flag == "numeric");
    let descending = flags.iter().any(|flag| flag == "descending");

    let mut elements = trim_explode(',', current, false);
    if numeric {
        elements.sort_by(|a, b| {
            leading_number(a)
                .partial_cmp(&leading_number(b))
                .unwrap_or(Ordering::Equal)
        });
    } else {
        insertion_sort(&mut elements, regular_cmp);
    }
    if descending {
        elements.reverse();
    }
    elements.join(",")
}

/// Stable sort that tolerates comparators without a total order.
///
/// Mixed numeric/string comparison is not transitive (`"9" < "10"`,
/// `"10" < "1a"`, `"1a" < "9"`), which the std sorts may reject.
fn insertion_sort(elements: &mut [String], cmp: fn(&str, &str) -> Ordering) {
    for i in 1..elements.len() {
        let mut j = i;
        while j > 0 && cmp(&elements[j - 1], &elements[j]) == Ordering::Greater {
            elements.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Apply a built-in modifier by name
///
/// Unknown names leave the value untouched.
pub fn apply_modifier(name: &str, argument: &str, current: &str) -> String {
    match ValueModifier::from_name(name) {
        Some(modifier) => modifier.apply(argument, current),
        None => {
            log::warn!("Missing function definition for {} on TypoScript", name);
            current.to_string()
        }
    }
}

/// Parse the right-hand side of a `:=` line, e.g. `appendString(foo)`
///
/// The argument reaches up to the last closing parenthesis; `\\`, `\n` and
/// `\t` escapes inside it are resolved.
pub fn parse_modifier_call(call: &str) -> Option<(String, String)> {
    let call = call.trim_start();
    let name_len = call
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(call.len());
    if name_len == 0 {
        return None;
    }
    let name = &call[..name_len];

    let rest = call[name_len..].trim_start().strip_prefix('(')?;
    let close = rest.rfind(')')?;
    let argument = unescape_argument(&rest[..close]);

    Some((name.to_string(), argument))
}

fn unescape_argument(argument: &str) -> String {
    let mut result = String::with_capacity(argument.len());
    let mut chars = argument.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('\\') => {
                    result.push('\\');
                    chars.next();
                }
                Some('n') => {
                    result.push('\n');
                    chars.next();
                }
                Some('t') => {
                    result.push('\t');
                    chars.next();
                }
                _ => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// Modifier engine with caller-registered custom modifiers
#[derive(Clone, Default)]
pub struct ModifierEngine {
    custom: HashMap<String, ModifierFn>,
}

impl fmt::Debug for ModifierEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.custom.keys().collect();
        names.sort();
        f.debug_struct("ModifierEngine")
            .field("custom", &names)
            .finish()
    }
}

impl ModifierEngine {
    /// Create an engine with only the built-in modifiers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom modifier
    ///
    /// Names must be non-empty, consist of ASCII letters, digits and
    /// underscores, and must not shadow a built-in modifier.
    pub fn register<F>(&mut self, name: impl Into<String>, modifier: F) -> Result<()>
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        let name = name.into();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ParseError::InvalidModifier {
                name,
                message: "name must consist of letters, digits and underscores".to_string(),
            });
        }
        if ValueModifier::from_name(&name).is_some() {
            return Err(ParseError::InvalidModifier {
                name,
                message: "shadows a built-in modifier".to_string(),
            });
        }
        if self.custom.contains_key(&name) {
            return Err(ParseError::InvalidModifier {
                name,
                message: "already registered".to_string(),
            });
        }

        log::debug!("Registered custom modifier {}", name);
        self.custom.insert(name, Arc::new(modifier));
        Ok(())
    }

    /// Whether `name` is a built-in or registered modifier
    pub fn is_known(&self, name: &str) -> bool {
        ValueModifier::from_name(name).is_some() || self.custom.contains_key(name)
    }

    /// Apply the named modifier; unknown names leave the value untouched
    pub fn apply(&self, name: &str, argument: &str, current: &str) -> String {
        if let Some(modifier) = ValueModifier::from_name(name) {
            return modifier.apply(argument, current);
        }
        match self.custom.get(name) {
            Some(custom) => custom(argument, current),
            None => apply_modifier(name, argument, current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_modifiers() {
        assert_eq!(apply_modifier("prependString", "abc", "!"), "abc!");
        assert_eq!(apply_modifier("appendString", "abc", "!"), "!abc");
        assert_eq!(apply_modifier("removeString", "foo", "foobarfoo"), "bar");
        assert_eq!(apply_modifier("replaceString", "foo|bar", "foofoo"), "barbar");
        assert_eq!(apply_modifier("replaceString", "foo|", "foobarfoo"), "bar");
        assert_eq!(apply_modifier("replaceString", "foo", "foobar"), "bar");
    }

    #[test]
    fn test_empty_search_leaves_value_untouched() {
        assert_eq!(apply_modifier("removeString", "", "abc"), "abc");
        assert_eq!(apply_modifier("replaceString", "|x", "abc"), "abc");
    }

    #[test]
    fn test_add_to_list() {
        assert_eq!(apply_modifier("addToList", "789", "123,456"), "123,456,789");
        assert_eq!(apply_modifier("addToList", "", "123,456"), "123,456,");
        assert_eq!(apply_modifier("addToList", " 789 ", ""), "789");
    }

    #[test]
    fn test_remove_from_list() {
        assert_eq!(apply_modifier("removeFromList", "456", "123,456,789,456"), "123,789");
        assert_eq!(apply_modifier("removeFromList", "", "123,,456,"), "123,456");
        assert_eq!(apply_modifier("removeFromList", "123,789", "123, 456 ,789"), "456");
    }

    #[test]
    fn test_unique_list() {
        assert_eq!(apply_modifier("uniqueList", "", "123,456,abc,456,123"), "123,456,abc");
        assert_eq!(apply_modifier("uniqueList", "", "1,,2,,3"), "1,,2,3");
    }

    #[test]
    fn test_reverse_list() {
        assert_eq!(apply_modifier("reverseList", "", "123,456,abc,456"), "456,abc,456,123");
        assert_eq!(apply_modifier("reverseList", "", "1,,3"), "3,,1");
        let once = apply_modifier("reverseList", "", "a,b,,c");
        assert_eq!(apply_modifier("reverseList", "", &once), "a,b,,c");
    }

    #[test]
    fn test_sort_list() {
        assert_eq!(apply_modifier("sortList", "", "10,100,0,20,abc"), "0,10,20,100,abc");
        assert_eq!(apply_modifier("sortList", "numeric", "10,0,100,-20,abc"), "-20,0,abc,10,100");
        assert_eq!(apply_modifier("sortList", "descending", "10,100,0,20,abc"), "abc,100,20,10,0");
        assert_eq!(apply_modifier("sortList", "Numeric, Descending", "3,1,2"), "3,2,1");
        assert_eq!(apply_modifier("sortList", "bogus", "b,c,a"), "a,b,c");
    }

    #[test]
    fn test_unknown_modifier_is_noop() {
        assert_eq!(apply_modifier("doesNotExist", "x", "value"), "value");
    }

    #[test]
    fn test_modifier_names_round_trip() {
        for modifier in ValueModifier::ALL {
            assert_eq!(ValueModifier::from_name(modifier.name()), Some(modifier));
        }
        assert_eq!(ValueModifier::from_name("appendstring"), None);
    }

    #[test]
    fn test_parse_modifier_call() {
        assert_eq!(
            parse_modifier_call("appendString(foo)"),
            Some(("appendString".to_string(), "foo".to_string()))
        );
        assert_eq!(
            parse_modifier_call(" replaceString ( a|b ) "),
            Some(("replaceString".to_string(), " a|b ".to_string()))
        );
        assert_eq!(
            parse_modifier_call("appendString(f(x))"),
            Some(("appendString".to_string(), "f(x)".to_string()))
        );
        assert_eq!(
            parse_modifier_call("appendString(a\\nb\\\\c)"),
            Some(("appendString".to_string(), "a\nb\\c".to_string()))
        );
        assert_eq!(parse_modifier_call("appendString foo"), None);
        assert_eq!(parse_modifier_call("(foo)"), None);
        assert_eq!(parse_modifier_call("appendString(foo"), None);
    }

    #[test]
    fn test_engine_custom_modifier() {
        let mut engine = ModifierEngine::new();
        engine
            .register("wrapWith", |argument, current| {
                format!("{}{}{}", argument, current, argument)
            })
            .unwrap();

        assert!(engine.is_known("wrapWith"));
        assert!(engine.is_known("sortList"));
        assert_eq!(engine.apply("wrapWith", "*", "x"), "*x*");
        assert_eq!(engine.apply("appendString", "!", "x"), "x!");
        assert_eq!(engine.apply("missing", "!", "x"), "x");
    }

    #[test]
    fn test_engine_rejects_bad_registrations() {
        let mut engine = ModifierEngine::new();
        assert!(engine.register("", |_, c| c.to_string()).is_err());
        assert!(engine.register("has space", |_, c| c.to_string()).is_err());
        assert!(engine.register("appendString", |_, c| c.to_string()).is_err());

        engine.register("custom", |_, c| c.to_string()).unwrap();
        let err = engine.register("custom", |_, c| c.to_string()).unwrap_err();
        assert!(err.to_string().contains("already registered"));
    }
}
