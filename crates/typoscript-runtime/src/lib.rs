//! TypoScript Runtime - Condition evaluation
//!
//! This crate evaluates condition expressions against a request context:
//! the matcher walks OR-groups of AND-parts, resolvers decide the atomic
//! conditions, and the built-in resolver implements the standard condition
//! families (browser, IP, time, page, global variables, ...).

pub mod client;
pub mod compare;
pub mod conditions;
pub mod context;
pub mod error;
pub mod matcher;
pub mod network;
pub mod registry;
pub mod resolver;
pub mod user_func;

// Re-export main types
pub use client::ClientInfo;
pub use compare::{compare_number, search_string_wildcard, version_to_integer};
pub use conditions::BuiltinResolver;
pub use context::{FrontendUser, PredicateContext};
pub use error::{Result, RuntimeError};
pub use matcher::{ConditionEvaluation, ConditionMatcher, MatchTrace};
pub use network::{cmp_fqdn, cmp_ip};
pub use registry::{ConditionFactory, ConditionRegistry, CustomCondition, CustomConditionResolver};
pub use resolver::{PredicateResolver, ResolverChain};
pub use user_func::{parse_user_func_arguments, UserFunction, UserFunctionRegistry};

pub use typoscript_core::{AtomicCondition, Resolution, Value};
