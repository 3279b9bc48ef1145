//! Request context the built-in conditions are evaluated against
//!
//! The context is a plain snapshot: request parameters, server variables,
//! page data and the evaluation time are supplied by the caller, so the same
//! context always yields the same results.

use crate::client::ClientInfo;
use chrono::{Local, NaiveDateTime};
use std::collections::HashMap;
use std::sync::OnceLock;
use typoscript_core::Value;

/// Default application context
pub const DEFAULT_APPLICATION_CONTEXT: &str = "Production";

/// Default compatibility version
pub const DEFAULT_COMPAT_VERSION: &str = "6.2";

/// Default developer IP mask
pub const DEFAULT_DEV_IP_MASK: &str = "127.0.0.1,::1";

/// Logged-in frontend user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontendUser {
    pub id: i64,
    pub groups: Vec<i64>,
}

impl FrontendUser {
    pub fn new(id: i64) -> Self {
        Self { id, groups: Vec::new() }
    }

    pub fn with_groups(mut self, groups: impl IntoIterator<Item = i64>) -> Self {
        self.groups = groups.into_iter().collect();
        self
    }
}

/// Everything a built-in condition may look at
#[derive(Debug, Clone)]
pub struct PredicateContext {
    /// Current page id
    pub page_id: Option<i64>,
    /// Page ids from the site root down to the current page
    pub rootline: Vec<i64>,
    /// Fields of the current page record
    pub page: HashMap<String, Value>,
    pub user: Option<FrontendUser>,
    /// Merged GET/POST parameters, read by `GP:`
    pub request_params: Value,
    /// Process environment, read by `ENV:`
    pub environment: HashMap<String, String>,
    /// Server variables such as `REMOTE_ADDR` or `HTTP_USER_AGENT`, read by `IENV:`
    pub server_variables: HashMap<String, String>,
    /// Global variable tree, read by bare paths and `TSFE:`
    pub globals: Value,
    /// Reverse-resolved name of the remote host
    pub remote_hostname: Option<String>,
    pub application_context: String,
    /// Configured compatibility version, `major.minor.patch`
    pub compat_version: String,
    /// Addresses substituted for `devIP` in IP conditions
    pub dev_ip_mask: String,
    /// Point in time the time conditions compare against
    pub evaluation_time: NaiveDateTime,
    client: OnceLock<ClientInfo>,
}

impl Default for PredicateContext {
    fn default() -> Self {
        Self {
            page_id: None,
            rootline: Vec::new(),
            page: HashMap::new(),
            user: None,
            request_params: Value::Object(HashMap::new()),
            environment: HashMap::new(),
            server_variables: HashMap::new(),
            globals: Value::Object(HashMap::new()),
            remote_hostname: None,
            application_context: DEFAULT_APPLICATION_CONTEXT.to_string(),
            compat_version: DEFAULT_COMPAT_VERSION.to_string(),
            dev_ip_mask: DEFAULT_DEV_IP_MASK.to_string(),
            evaluation_time: Local::now().naive_local(),
            client: OnceLock::new(),
        }
    }
}

impl PredicateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page_id: i64, rootline: impl IntoIterator<Item = i64>) -> Self {
        self.page_id = Some(page_id);
        self.rootline = rootline.into_iter().collect();
        self
    }

    pub fn with_page_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.page.insert(name.into(), value.into());
        self
    }

    pub fn with_user(mut self, user: FrontendUser) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_request_params(mut self, params: impl Into<Value>) -> Self {
        self.request_params = params.into();
        self
    }

    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(name.into(), value.into());
        self
    }

    /// Copy the environment of the current process
    pub fn with_process_environment(mut self) -> Self {
        self.environment.extend(std::env::vars());
        self
    }

    pub fn with_server_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.server_variables.insert(name.into(), value.into());
        self.client = OnceLock::new();
        self
    }

    pub fn with_user_agent(self, useragent: impl Into<String>) -> Self {
        self.with_server_variable("HTTP_USER_AGENT", useragent)
    }

    pub fn with_remote_addr(self, address: impl Into<String>) -> Self {
        self.with_server_variable("REMOTE_ADDR", address)
    }

    pub fn with_accept_language(self, header: impl Into<String>) -> Self {
        self.with_server_variable("HTTP_ACCEPT_LANGUAGE", header)
    }

    pub fn with_remote_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.remote_hostname = Some(hostname.into());
        self
    }

    pub fn with_globals(mut self, globals: impl Into<Value>) -> Self {
        self.globals = globals.into();
        self
    }

    pub fn with_application_context(mut self, context: impl Into<String>) -> Self {
        self.application_context = context.into();
        self
    }

    pub fn with_compat_version(mut self, version: impl Into<String>) -> Self {
        self.compat_version = version.into();
        self
    }

    pub fn with_dev_ip_mask(mut self, mask: impl Into<String>) -> Self {
        self.dev_ip_mask = mask.into();
        self
    }

    pub fn with_evaluation_time(mut self, time: NaiveDateTime) -> Self {
        self.evaluation_time = time;
        self
    }

    /// Server variable by name, empty when unset
    pub fn server_variable(&self, name: &str) -> &str {
        self.server_variables.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn user_agent(&self) -> &str {
        self.server_variable("HTTP_USER_AGENT")
    }

    pub fn remote_addr(&self) -> &str {
        self.server_variable("REMOTE_ADDR")
    }

    pub fn accept_language(&self) -> &str {
        self.server_variable("HTTP_ACCEPT_LANGUAGE")
    }

    pub fn is_user_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Client information, detected from the user agent on first use
    pub fn client(&self) -> &ClientInfo {
        self.client.get_or_init(|| ClientInfo::detect(self.user_agent()))
    }

    /// Depth of the current page, 0 for the site root
    pub fn tree_level(&self) -> i64 {
        self.rootline.len() as i64 - 1
    }
}
