//! Condition expression parser
//!
//! Normalizes and splits expressions like:
//! - `[browser = msie]`
//! - `[A] && [B] || [C]`
//! - `[A]AND[B]OR[C]`
//! - `[A][B]` (adjacent groups are OR-ed)

use super::types::ConditionExpression;

const OR_DELIMITER: &str = "]||[";
const AND_DELIMITER: &str = "]&&[";

/// Stateless parser for bracketed condition expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct ConditionParser;

#[derive(Clone, Copy)]
enum Junction {
    And,
    Or,
}

impl ConditionParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Rewrite every `]…[` junction to its canonical form
    ///
    /// `] OR [`, `]||[` and a bare `][` become `]||[`; `] AND [` and `]&&[`
    /// become `]&&[`. Whitespace around the operator is dropped and the
    /// word forms are case-insensitive. The input is trimmed first.
    pub fn normalize(expression: &str) -> String {
        let input = expression.trim();
        let mut normalized = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(pos) = rest.find(']') {
            normalized.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            match Self::match_junction(after) {
                Some((junction, consumed)) => {
                    normalized.push_str(match junction {
                        Junction::Or => OR_DELIMITER,
                        Junction::And => AND_DELIMITER,
                    });
                    rest = &after[consumed..];
                }
                None => {
                    normalized.push(']');
                    rest = after;
                }
            }
        }

        normalized.push_str(rest);
        normalized
    }

    /// Match `\s*(OR|\|\||AND|&&)?\s*\[` at the start of `input`.
    ///
    /// Returns the junction kind and the number of bytes consumed including
    /// the opening bracket.
    fn match_junction(input: &str) -> Option<(Junction, usize)> {
        let trimmed = input.trim_start();
        let mut consumed = input.len() - trimmed.len();

        let (junction, operator_len) = if starts_with_ignore_case(trimmed, "or") {
            (Junction::Or, 2)
        } else if trimmed.starts_with("||") {
            (Junction::Or, 2)
        } else if starts_with_ignore_case(trimmed, "and") {
            (Junction::And, 3)
        } else if trimmed.starts_with("&&") {
            (Junction::And, 2)
        } else {
            (Junction::Or, 0)
        };

        let after_operator = &trimmed[operator_len..];
        let after_space = after_operator.trim_start();
        consumed += operator_len + (after_operator.len() - after_space.len());

        if after_space.starts_with('[') {
            Some((junction, consumed + 1))
        } else {
            None
        }
    }

    /// Normalize an expression and split it into OR-groups of AND-parts
    ///
    /// Returns `None` when the normalized expression does not start with `[`
    /// and end with `]`; such expressions never match.
    pub fn parse(expression: &str) -> Option<ConditionExpression> {
        let normalized = Self::normalize(expression);

        if !normalized.starts_with('[') || !normalized.ends_with(']') {
            log::debug!("Condition expression without bracket envelope: {}", expression);
            return None;
        }

        let inner = &normalized[1..normalized.len() - 1];
        let groups = inner
            .split(OR_DELIMITER)
            .map(|group| group.split(AND_DELIMITER).map(str::to_string).collect())
            .collect();

        Some(ConditionExpression {
            raw: expression.to_string(),
            normalized,
            groups,
        })
    }
}

fn starts_with_ignore_case(input: &str, prefix: &str) -> bool {
    input
        .get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_operators() {
        assert_eq!(ConditionParser::normalize("[A] && [B]"), "[A]&&[B]");
        assert_eq!(ConditionParser::normalize("[A] AND [B]"), "[A]&&[B]");
        assert_eq!(ConditionParser::normalize("[A]and[B]"), "[A]&&[B]");
        assert_eq!(ConditionParser::normalize("[A] || [B]"), "[A]||[B]");
        assert_eq!(ConditionParser::normalize("[A] Or [B]"), "[A]||[B]");
        assert_eq!(ConditionParser::normalize("[A][B]"), "[A]||[B]");
        assert_eq!(ConditionParser::normalize("  [A]  [B]  "), "[A]||[B]");
    }

    #[test]
    fn test_normalize_leaves_other_text_alone() {
        assert_eq!(ConditionParser::normalize("[A] XOR [B]"), "[A] XOR [B]");
        assert_eq!(ConditionParser::normalize("[A]"), "[A]");
        assert_eq!(ConditionParser::normalize("A]"), "A]");
    }

    #[test]
    fn test_parse_groups() {
        let expression = ConditionParser::parse("[A] && [B] || [C]").unwrap();
        assert_eq!(expression.normalized, "[A]&&[B]||[C]");
        assert_eq!(
            expression.groups,
            vec![
                vec!["A".to_string(), "B".to_string()],
                vec!["C".to_string()],
            ]
        );
        assert_eq!(expression.condition_count(), 3);
    }

    #[test]
    fn test_parse_keeps_condition_text() {
        let expression = ConditionParser::parse("[globalVar = TSFE:id > 10]").unwrap();
        assert_eq!(expression.groups, vec![vec!["globalVar = TSFE:id > 10".to_string()]]);
    }

    #[test]
    fn test_parse_rejects_missing_envelope() {
        assert!(ConditionParser::parse("browser = msie").is_none());
        assert!(ConditionParser::parse("[browser = msie").is_none());
        assert!(ConditionParser::parse("").is_none());
        assert!(ConditionParser::parse("]").is_none());
        assert!(ConditionParser::parse("[").is_none());
        assert!(ConditionParser::parse(" [ ").is_none());
    }

    #[test]
    fn test_parse_empty_brackets() {
        let expression = ConditionParser::parse("[]").unwrap();
        assert_eq!(expression.groups, vec![vec![String::new()]]);
    }
}
