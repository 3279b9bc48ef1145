//! Custom condition plugins
//!
//! A custom condition is written as `[Name arg1, arg2]`: the text up to the
//! first whitespace names a registered factory, the rest is parsed like
//! `userFunc` arguments. Each evaluation gets a fresh instance.

use crate::context::PredicateContext;
use crate::error::{Result, RuntimeError};
use crate::resolver::PredicateResolver;
use crate::user_func::parse_user_func_arguments;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use typoscript_core::{AtomicCondition, Resolution};

/// A condition implemented outside the built-in families
pub trait CustomCondition: Send + Sync {
    fn matches(&self, arguments: &[String], context: &PredicateContext) -> bool;
}

/// Creates a fresh condition instance per evaluation
pub type ConditionFactory = Arc<dyn Fn() -> Box<dyn CustomCondition> + Send + Sync>;

/// Registered custom conditions by name
#[derive(Clone, Default)]
pub struct ConditionRegistry {
    factories: HashMap<String, ConditionFactory>,
}

impl fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("ConditionRegistry").field("conditions", &names).finish()
    }
}

impl ConditionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: &str, factory: F) -> Result<()>
    where
        F: Fn() -> Box<dyn CustomCondition> + Send + Sync + 'static,
    {
        if name.is_empty() || name.chars().any(|c| c.is_whitespace() || "=[]|".contains(c)) {
            return Err(RuntimeError::InvalidName {
                kind: "condition",
                name: name.to_string(),
            });
        }
        if self.factories.contains_key(name) {
            return Err(RuntimeError::DuplicateRegistration {
                kind: "Condition",
                name: name.to_string(),
            });
        }
        self.factories.insert(name.to_string(), Arc::new(factory));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Resolver answering registered conditions against `context`
    pub fn resolver<'a>(&'a self, context: &'a PredicateContext) -> CustomConditionResolver<'a> {
        CustomConditionResolver {
            registry: self,
            context,
        }
    }
}

/// Resolves custom conditions, leaves everything else unresolved
pub struct CustomConditionResolver<'a> {
    registry: &'a ConditionRegistry,
    context: &'a PredicateContext,
}

impl PredicateResolver for CustomConditionResolver<'_> {
    fn resolve(&self, condition: &AtomicCondition) -> Resolution {
        let text = condition.raw.trim();
        let (name, arguments) = match text.split_once(char::is_whitespace) {
            Some((name, arguments)) => (name, arguments),
            None => (text, ""),
        };

        let factory = match self.registry.factories.get(name) {
            Some(factory) => factory,
            None => return Resolution::Unresolved,
        };

        let instance = factory();
        let matched = instance.matches(&parse_user_func_arguments(arguments), self.context);
        tracing::debug!("Custom condition '{}' evaluated to {}", name, matched);
        matched.into()
    }
}
