//! Condition matcher
//!
//! Evaluates a full expression such as `[browser = msie] && [version = 6]`:
//! the expression is normalized and split into OR-groups of AND-parts, each
//! part is handed to a [`PredicateResolver`]. Groups short-circuit on the
//! first failing part, the expression on the first matching group.

use crate::resolver::PredicateResolver;
use serde::Serialize;
use std::collections::HashSet;
use typoscript_core::{AtomicCondition, ConditionParser, Resolution};

/// One resolved atomic condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionEvaluation {
    /// Condition text without brackets
    pub condition: String,
    #[serde(serialize_with = "serialize_resolution")]
    pub resolution: Resolution,
}

fn serialize_resolution<S: serde::Serializer>(
    resolution: &Resolution,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let name = match resolution {
        Resolution::Matched => "matched",
        Resolution::NotMatched => "not_matched",
        Resolution::Unresolved => "unresolved",
    };
    serializer.serialize_str(name)
}

/// Record of one expression evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchTrace {
    pub expression: String,
    pub result: bool,
    /// Result came from a simulation override, nothing was resolved
    pub simulated: bool,
    /// Conditions in the order they were resolved
    pub evaluations: Vec<ConditionEvaluation>,
}

/// Expression matcher with optional simulation overrides
#[derive(Debug, Clone, Default)]
pub struct ConditionMatcher {
    simulate_match_result: Option<bool>,
    simulate_match_conditions: HashSet<String>,
}

impl ConditionMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force every expression to this result
    pub fn set_simulate_match_result(&mut self, result: Option<bool>) {
        self.simulate_match_result = result;
    }

    /// Only these exact expressions match, nothing is resolved
    pub fn set_simulate_match_conditions<I, S>(&mut self, conditions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.simulate_match_conditions = conditions.into_iter().map(Into::into).collect();
    }

    pub fn with_simulate_match_result(mut self, result: Option<bool>) -> Self {
        self.set_simulate_match_result(result);
        self
    }

    pub fn with_simulate_match_conditions<I, S>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_simulate_match_conditions(conditions);
        self
    }

    pub fn simulate_match_result(&self) -> Option<bool> {
        self.simulate_match_result
    }

    pub fn simulate_match_conditions(&self) -> &HashSet<String> {
        &self.simulate_match_conditions
    }

    /// Whether `expression` matches
    pub fn matches(&self, expression: &str, resolver: &dyn PredicateResolver) -> bool {
        self.evaluate(expression, resolver, &mut |_, _| {})
    }

    /// Like [`matches`](Self::matches), recording every resolved condition
    pub fn matches_with_trace(&self, expression: &str, resolver: &dyn PredicateResolver) -> MatchTrace {
        let mut evaluations = Vec::new();
        let result = self.evaluate(expression, resolver, &mut |condition, resolution| {
            evaluations.push(ConditionEvaluation {
                condition: condition.to_string(),
                resolution,
            });
        });

        MatchTrace {
            expression: expression.to_string(),
            result,
            simulated: self.is_simulating(),
            evaluations,
        }
    }

    fn is_simulating(&self) -> bool {
        self.simulate_match_result.is_some() || !self.simulate_match_conditions.is_empty()
    }

    fn evaluate(
        &self,
        expression: &str,
        resolver: &dyn PredicateResolver,
        observe: &mut dyn FnMut(&str, Resolution),
    ) -> bool {
        if let Some(result) = self.simulate_match_result {
            return result;
        }
        if !self.simulate_match_conditions.is_empty() {
            return self.simulate_match_conditions.contains(expression);
        }

        let parsed = match ConditionParser::parse(expression) {
            Some(parsed) => parsed,
            None => return false,
        };

        for group in &parsed.groups {
            let mut group_matched = true;
            for part in group {
                let resolution = resolver.resolve(&AtomicCondition::parse(part));
                observe(part, resolution);
                if !resolution.is_matched() {
                    if resolution == Resolution::Unresolved {
                        tracing::debug!("Unrecognized condition '{}' treated as no match", part);
                    }
                    group_matched = false;
                    break;
                }
            }

            if group_matched {
                tracing::debug!("Condition '{}' matched", expression);
                return true;
            }
        }

        tracing::debug!("Condition '{}' did not match", expression);
        false
    }
}
