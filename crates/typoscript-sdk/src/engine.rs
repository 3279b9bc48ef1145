//! Condition engine
//!
//! Ties together the matcher, the built-in and custom resolvers, the user
//! function allow-list, the modifier engine and the TypoScript parser.

use crate::config::MatcherConfig;
use typoscript_parser::{ConditionEvaluator, ParsedTypoScript, TypoScriptParser};
use typoscript_runtime::{
    BuiltinResolver, ConditionMatcher, ConditionRegistry, MatchTrace, PredicateContext,
    ResolverChain, UserFunctionRegistry,
};

/// Condition engine, created with [`ConditionEngineBuilder`](crate::ConditionEngineBuilder)
#[derive(Debug, Clone)]
pub struct ConditionEngine {
    pub(crate) config: MatcherConfig,
    pub(crate) matcher: ConditionMatcher,
    pub(crate) conditions: ConditionRegistry,
    pub(crate) user_functions: UserFunctionRegistry,
    pub(crate) parser: TypoScriptParser,
}

impl ConditionEngine {
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// A fresh request context carrying the configured application
    /// context, compat version and dev IP mask
    pub fn context(&self) -> PredicateContext {
        PredicateContext::new()
            .with_application_context(self.config.application_context.clone())
            .with_compat_version(self.config.compat_version.clone())
            .with_dev_ip_mask(self.config.dev_ip_mask.clone())
    }

    /// Whether `expression` matches in `context`
    pub fn matches(&self, expression: &str, context: &PredicateContext) -> bool {
        let builtin = BuiltinResolver::new(context).with_user_functions(&self.user_functions);
        let custom = self.conditions.resolver(context);
        let chain = ResolverChain::new().with(&builtin).with(&custom);
        self.matcher.matches(expression, &chain)
    }

    /// Like [`matches`](Self::matches), recording every resolved condition
    pub fn matches_with_trace(&self, expression: &str, context: &PredicateContext) -> MatchTrace {
        let builtin = BuiltinResolver::new(context).with_user_functions(&self.user_functions);
        let custom = self.conditions.resolver(context);
        let chain = ResolverChain::new().with(&builtin).with(&custom);
        self.matcher.matches_with_trace(expression, &chain)
    }

    /// Apply a built-in or registered modifier
    pub fn apply_modifier(&self, name: &str, argument: &str, current: &str) -> String {
        self.parser.modifiers().apply(name, argument, current)
    }

    /// Parse a TypoScript text, deciding its condition blocks in `context`
    pub fn parse_typoscript(&self, text: &str, context: &PredicateContext) -> ParsedTypoScript {
        let parsed = self.parser.parse(text, &self.evaluator(context));
        tracing::debug!(
            "Parsed TypoScript: {} sections, {} matched, {} issues",
            parsed.sections.len(),
            parsed.matched_sections.len(),
            parsed.issues.len()
        );
        parsed
    }

    /// Condition evaluator bound to `context`
    pub fn evaluator<'a>(&'a self, context: &'a PredicateContext) -> ContextEvaluator<'a> {
        ContextEvaluator {
            engine: self,
            context,
        }
    }
}

/// [`ConditionEvaluator`] answering condition lines with an engine and a context
pub struct ContextEvaluator<'a> {
    engine: &'a ConditionEngine,
    context: &'a PredicateContext,
}

impl ConditionEvaluator for ContextEvaluator<'_> {
    fn evaluate(&self, expression: &str) -> bool {
        self.engine.matches(expression, self.context)
    }
}
