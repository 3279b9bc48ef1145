//! Builder pattern for ConditionEngine

use crate::config::MatcherConfig;
use crate::engine::ConditionEngine;
use crate::error::{Result, SdkError};
use std::path::Path;
use typoscript_parser::{ModifierEngine, TypoScriptParser};
use typoscript_runtime::{
    ConditionMatcher, ConditionRegistry, CustomCondition, PredicateContext, UserFunctionRegistry,
};

/// Builder for ConditionEngine
///
/// Registration problems are collected and reported by [`build`](Self::build).
///
/// # Example
///
/// ```rust,ignore
/// use typoscript_sdk::ConditionEngineBuilder;
///
/// let engine = ConditionEngineBuilder::new()
///     .application_context("Development")
///     .register_user_function("isWeekend", |_args| true)
///     .allow_user_function("isWeekend")
///     .build()?;
///
/// let context = engine.context().with_remote_addr("127.0.0.1");
/// assert!(engine.matches("[IP = devIP] && [userFunc = isWeekend()]", &context));
/// ```
#[derive(Debug, Default)]
pub struct ConditionEngineBuilder {
    config: MatcherConfig,
    conditions: ConditionRegistry,
    user_functions: UserFunctionRegistry,
    modifiers: ModifierEngine,
    errors: Vec<SdkError>,
}

impl ConditionEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Configuration ==========

    /// Replace the whole configuration
    pub fn with_config(mut self, config: MatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a YAML file
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Self {
        match MatcherConfig::from_file(path) {
            Ok(config) => self.config = config,
            Err(e) => self.errors.push(e),
        }
        self
    }

    pub fn simulate_match_result(mut self, result: Option<bool>) -> Self {
        self.config.simulate_match_result = result;
        self
    }

    pub fn simulate_match_condition(mut self, condition: impl Into<String>) -> Self {
        self.config.simulate_match_conditions.push(condition.into());
        self
    }

    pub fn application_context(mut self, context: impl Into<String>) -> Self {
        self.config.application_context = context.into();
        self
    }

    pub fn compat_version(mut self, version: impl Into<String>) -> Self {
        self.config.compat_version = version.into();
        self
    }

    pub fn dev_ip_mask(mut self, mask: impl Into<String>) -> Self {
        self.config.dev_ip_mask = mask.into();
        self
    }

    /// Permit `[userFunc = name(...)]` to call `name`
    pub fn allow_user_function(mut self, name: impl Into<String>) -> Self {
        self.config.allowed_user_functions.push(name.into());
        self
    }

    // ========== Plugins ==========

    /// Register a custom condition written as `[name arguments]`
    pub fn register_condition<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn() -> Box<dyn CustomCondition> + Send + Sync + 'static,
    {
        if let Err(e) = self.conditions.register(name, factory) {
            self.errors.push(e.into());
        }
        self
    }

    /// Register a custom condition from a plain function
    pub fn register_condition_fn<F>(self, name: &str, function: F) -> Self
    where
        F: Fn(&[String], &PredicateContext) -> bool + Clone + Send + Sync + 'static,
    {
        self.register_condition(name, move || -> Box<dyn CustomCondition> {
            Box::new(FnCondition(function.clone()))
        })
    }

    /// Register a user function; it is only callable once allow-listed
    pub fn register_user_function<F>(mut self, name: &str, function: F) -> Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        if let Err(e) = self.user_functions.register(name, function) {
            self.errors.push(e.into());
        }
        self
    }

    /// Register a custom value modifier for `:=`
    pub fn register_modifier<F>(mut self, name: &str, modifier: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        if let Err(e) = self.modifiers.register(name, modifier) {
            self.errors.push(e.into());
        }
        self
    }

    /// Build the engine
    ///
    /// Fails with the first registration error, or when an allow-listed
    /// user function was never registered.
    pub fn build(mut self) -> Result<ConditionEngine> {
        if !self.errors.is_empty() {
            return Err(self.errors.remove(0));
        }

        for name in &self.config.allowed_user_functions {
            if !self.user_functions.is_registered(name) {
                return Err(SdkError::ConfigError(format!(
                    "User function '{}' is allow-listed but not registered",
                    name
                )));
            }
            self.user_functions.allow(name.clone());
        }

        let matcher = ConditionMatcher::new()
            .with_simulate_match_result(self.config.simulate_match_result)
            .with_simulate_match_conditions(self.config.simulate_match_conditions.iter().cloned());

        tracing::info!(
            "Condition engine ready: {} custom conditions, {} allowed user functions, context {}",
            self.conditions.len(),
            self.config.allowed_user_functions.len(),
            self.config.application_context
        );

        Ok(ConditionEngine {
            config: self.config,
            matcher,
            conditions: self.conditions,
            user_functions: self.user_functions,
            parser: TypoScriptParser::with_modifiers(self.modifiers),
        })
    }
}

struct FnCondition<F>(F);

impl<F> CustomCondition for FnCondition<F>
where
    F: Fn(&[String], &PredicateContext) -> bool + Send + Sync,
{
    fn matches(&self, arguments: &[String], context: &PredicateContext) -> bool {
        (self.0)(arguments, context)
    }
}
