//! Built-in condition families
//!
//! | Family | Example |
//! |--------|---------|
//! | client | `[browser = msie]`, `[system = win]`, `[language = *de*]` |
//! | network | `[IP = 192.168.*.*]`, `[hostname = *.example.com]` |
//! | time | `[hour = >8, <18]`, `[dayofweek = 0]` |
//! | page | `[page\|layout = 2]`, `[PIDinRootline = 12]`, `[treeLevel = 0]` |
//! | user | `[loginUser = *]`, `[usergroup = 1,2]` |
//! | variables | `[globalVar = GP:L = 1]`, `[globalString = IENV:HTTP_HOST = *.org]` |
//! | misc | `[applicationContext = Development*]`, `[compatVersion = 6.2]`, `[userFunc = f(x)]` |
//!
//! Unknown family names are left unresolved for the next resolver.

mod client;
mod network;
mod page;
mod time;
mod user;
mod variables;

pub use variables::get_variable;

use crate::compare::{search_string_wildcard, version_to_integer};
use crate::context::PredicateContext;
use crate::resolver::PredicateResolver;
use crate::user_func::UserFunctionRegistry;
use typoscript_core::types::trim_explode;
use typoscript_core::{AtomicCondition, Resolution};

/// Condition names answered by [`BuiltinResolver`]
pub const BUILTIN_CONDITIONS: &[&str] = &[
    "applicationContext",
    "browser",
    "version",
    "system",
    "device",
    "useragent",
    "language",
    "IP",
    "hostname",
    "hour",
    "minute",
    "month",
    "year",
    "dayofweek",
    "dayofmonth",
    "dayofyear",
    "compatVersion",
    "loginUser",
    "usergroup",
    "page",
    "treeLevel",
    "PIDinRootline",
    "PIDupinRootline",
    "globalVar",
    "globalString",
    "userFunc",
];

/// Resolver for the built-in condition families
#[derive(Debug, Clone, Copy)]
pub struct BuiltinResolver<'a> {
    context: &'a PredicateContext,
    user_functions: Option<&'a UserFunctionRegistry>,
}

impl<'a> BuiltinResolver<'a> {
    pub fn new(context: &'a PredicateContext) -> Self {
        Self {
            context,
            user_functions: None,
        }
    }

    /// Answer `userFunc` conditions from `registry`
    pub fn with_user_functions(mut self, registry: &'a UserFunctionRegistry) -> Self {
        self.user_functions = Some(registry);
        self
    }

    fn evaluate(&self, condition: &AtomicCondition) -> Option<bool> {
        let context = self.context;
        let value = condition.value.as_str();

        let matched = match condition.name() {
            "applicationContext" => trim_explode(',', value, true)
                .iter()
                .any(|test| search_string_wildcard(&context.application_context, test)),
            "browser" => client::browser(context, value),
            "version" => client::version(context, value),
            "system" => client::system(context, value),
            "device" => client::device(context, value),
            "useragent" => client::useragent(context, value),
            "language" => client::language(context, value),
            "IP" => network::ip(context, value),
            "hostname" => network::hostname(context, value),
            name @ ("hour" | "minute" | "month" | "year" | "dayofweek" | "dayofmonth" | "dayofyear") => {
                time::matches(context, name, value)
            }
            "compatVersion" => {
                version_to_integer(&context.compat_version) >= version_to_integer(value)
            }
            "loginUser" => user::login_user(context, value),
            "usergroup" => user::usergroup(context, value),
            "page" => page::field(context, condition.qualifiers(), value),
            "treeLevel" => page::tree_level(context, value),
            "PIDinRootline" => page::pid_in_rootline(context, value, false),
            "PIDupinRootline" => page::pid_in_rootline(context, value, true),
            "globalVar" => variables::global_var(context, value),
            "globalString" => variables::global_string(context, value),
            "userFunc" => match self.user_functions {
                Some(registry) => registry.evaluate(value),
                None => {
                    tracing::warn!("userFunc condition '{}' without user function registry", value);
                    false
                }
            },
            _ => return None,
        };

        Some(matched)
    }
}

impl PredicateResolver for BuiltinResolver<'_> {
    fn resolve(&self, condition: &AtomicCondition) -> Resolution {
        let result = self.evaluate(condition);
        tracing::trace!("Condition '{}' resolved to {:?}", condition.raw.trim(), result);
        result.into()
    }
}
