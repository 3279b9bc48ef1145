//! Predicate resolvers
//!
//! A resolver decides one atomic condition. Resolvers are chained: the first
//! one that recognizes a condition answers it, later ones are not asked.

use typoscript_core::{AtomicCondition, Resolution};

/// Decides atomic conditions
pub trait PredicateResolver {
    /// Resolve one condition. Return [`Resolution::Unresolved`] for
    /// conditions this resolver does not recognize.
    fn resolve(&self, condition: &AtomicCondition) -> Resolution;
}

impl<F> PredicateResolver for F
where
    F: Fn(&AtomicCondition) -> Resolution,
{
    fn resolve(&self, condition: &AtomicCondition) -> Resolution {
        self(condition)
    }
}

/// Ordered list of resolvers, asked in turn until one recognizes a condition
#[derive(Default)]
pub struct ResolverChain<'a> {
    resolvers: Vec<&'a dyn PredicateResolver>,
}

impl<'a> ResolverChain<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resolver: &'a dyn PredicateResolver) -> Self {
        self.resolvers.push(resolver);
        self
    }

    pub fn push(&mut self, resolver: &'a dyn PredicateResolver) {
        self.resolvers.push(resolver);
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl PredicateResolver for ResolverChain<'_> {
    fn resolve(&self, condition: &AtomicCondition) -> Resolution {
        self.resolvers
            .iter()
            .map(|resolver| resolver.resolve(condition))
            .find(|resolution| resolution.is_resolved())
            .unwrap_or(Resolution::Unresolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_closure_resolver() {
        let resolver = |condition: &AtomicCondition| Resolution::from(condition.name() == "yes");
        assert_eq!(resolver.resolve(&AtomicCondition::parse("yes")), Resolution::Matched);
        assert_eq!(resolver.resolve(&AtomicCondition::parse("no")), Resolution::NotMatched);
    }

    #[test]
    fn test_chain_stops_at_first_recognizer() {
        let later_calls = Cell::new(0);
        let first = |condition: &AtomicCondition| {
            if condition.name() == "known" {
                Resolution::NotMatched
            } else {
                Resolution::Unresolved
            }
        };
        let second = |_: &AtomicCondition| {
            later_calls.set(later_calls.get() + 1);
            Resolution::Matched
        };
        let chain = ResolverChain::new().with(&first).with(&second);

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.resolve(&AtomicCondition::parse("known")), Resolution::NotMatched);
        assert_eq!(later_calls.get(), 0);
        assert_eq!(chain.resolve(&AtomicCondition::parse("other")), Resolution::Matched);
        assert_eq!(later_calls.get(), 1);
    }

    #[test]
    fn test_empty_chain_is_unresolved() {
        let chain = ResolverChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.resolve(&AtomicCondition::parse("x = 1")), Resolution::Unresolved);
    }
}
