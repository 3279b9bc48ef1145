//! Condition types for expression evaluation

use crate::types::trim_explode;

/// A normalized condition expression split into OR-groups of AND-parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionExpression {
    /// Expression as written by the author
    pub raw: String,
    /// Expression after operator normalization
    pub normalized: String,
    /// OR-groups, each a list of bare condition texts joined by AND
    pub groups: Vec<Vec<String>>,
}

impl ConditionExpression {
    /// Total number of atomic conditions in the expression
    pub fn condition_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}

/// One atomic condition, the text between a pair of brackets
///
/// `page|layout = 2` has the key `page|layout`, the key segments
/// `["page", "layout"]` and the value `2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicCondition {
    /// Untouched condition text
    pub raw: String,
    /// Trimmed text before the first `=`
    pub key: String,
    /// Trimmed text after the first `=` (empty when there is none)
    pub value: String,
    /// Key split on `|`, every segment trimmed
    pub key_segments: Vec<String>,
}

impl AtomicCondition {
    /// Split a bare condition text into key and value
    pub fn parse(text: &str) -> Self {
        let (key, value) = match text.split_once('=') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (text.trim(), ""),
        };

        Self {
            raw: text.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            key_segments: trim_explode('|', key, false),
        }
    }

    /// First key segment, the condition family name
    pub fn name(&self) -> &str {
        self.key_segments.first().map(String::as_str).unwrap_or("")
    }

    /// Key segments after the name (`page|title` has the qualifier `title`)
    pub fn qualifiers(&self) -> &[String] {
        self.key_segments.get(1..).unwrap_or(&[])
    }

    /// Whether the condition text contains an `=` at all
    pub fn has_value(&self) -> bool {
        self.raw.contains('=')
    }
}

/// Outcome of resolving one atomic condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The condition holds
    Matched,
    /// The condition was understood and does not hold
    NotMatched,
    /// No resolver recognizes the condition
    Unresolved,
}

impl Resolution {
    /// Only `Matched` counts as a match; `Unresolved` fails closed
    pub fn is_matched(self) -> bool {
        matches!(self, Resolution::Matched)
    }

    pub fn is_resolved(self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }
}

impl From<bool> for Resolution {
    fn from(matched: bool) -> Self {
        if matched {
            Resolution::Matched
        } else {
            Resolution::NotMatched
        }
    }
}

impl From<Option<bool>> for Resolution {
    fn from(result: Option<bool>) -> Self {
        match result {
            Some(matched) => matched.into(),
            None => Resolution::Unresolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        let condition = AtomicCondition::parse(" browser = msie ");
        assert_eq!(condition.key, "browser");
        assert_eq!(condition.value, "msie");
        assert_eq!(condition.name(), "browser");
        assert!(condition.qualifiers().is_empty());
        assert!(condition.has_value());
    }

    #[test]
    fn test_value_keeps_later_equals_signs() {
        let condition = AtomicCondition::parse("globalVar = GP:L=1");
        assert_eq!(condition.key, "globalVar");
        assert_eq!(condition.value, "GP:L=1");
    }

    #[test]
    fn test_parse_piped_key() {
        let condition = AtomicCondition::parse("page | layout = 2");
        assert_eq!(condition.key, "page | layout");
        assert_eq!(condition.name(), "page");
        assert_eq!(condition.qualifiers(), &["layout".to_string()]);
        assert_eq!(condition.value, "2");
    }

    #[test]
    fn test_parse_without_value() {
        let condition = AtomicCondition::parse("Vendor\\Condition 1, 2");
        assert_eq!(condition.key, "Vendor\\Condition 1, 2");
        assert_eq!(condition.value, "");
        assert!(!condition.has_value());
    }

    #[test]
    fn test_resolution_conversions() {
        assert_eq!(Resolution::from(true), Resolution::Matched);
        assert_eq!(Resolution::from(false), Resolution::NotMatched);
        assert_eq!(Resolution::from(None), Resolution::Unresolved);
        assert!(!Resolution::Unresolved.is_matched());
        assert!(!Resolution::Unresolved.is_resolved());
        assert!(Resolution::NotMatched.is_resolved());
    }
}
