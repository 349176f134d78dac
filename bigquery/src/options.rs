use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use bigquery_minimal_gax::retry::RetrySetting;

use crate::idempotency::{DefaultIdempotencyPolicy, IdempotencyPolicy};

/// Logging component enabling request/response logging of every RPC.
pub const LOGGING_COMPONENT_RPC: &str = "rpc";

pub const DEFAULT_ENDPOINT: &str = "bigquery.googleapis.com";

const API_PATH: &str = "/bigquery/v2";

/// Prefixes `https://` when no scheme is given and makes sure the endpoint ends with exactly one
/// `/bigquery/v2`. An empty endpoint stays empty.
pub fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.is_empty() {
        return String::new();
    }
    let endpoint = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{endpoint}")
    };
    let trimmed = endpoint.trim_end_matches('/');
    if trimmed.ends_with(API_PATH) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{API_PATH}")
    }
}

/// How requests and responses are rendered by the RPC logging decorator.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TracingOptions {
    /// Render on a single line (`{:?}`) instead of pretty printing (`{:#?}`).
    pub single_line_mode: bool,
    /// String literals longer than this are truncated.
    pub truncate_string_field_longer_than: usize,
}

impl Default for TracingOptions {
    fn default() -> Self {
        Self {
            single_line_mode: true,
            truncate_string_field_longer_than: 128,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Options {
    /// Normalized service endpoint, see [`normalize_endpoint`].
    pub endpoint: String,
    /// Project billed for the calls, sent as `x-goog-user-project`.
    pub user_project: Option<String>,
    pub retry: RetrySetting,
    pub idempotency_policy: Arc<dyn IdempotencyPolicy>,
    /// Maximum idle connections kept per host by the HTTP client.
    pub connection_pool_size: usize,
    pub logging_components: HashSet<String>,
    pub tracing_options: TracingOptions,
    /// Timeout of a single HTTP request. Each retry attempt gets the full timeout.
    pub timeout: Option<Duration>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            endpoint: normalize_endpoint(DEFAULT_ENDPOINT),
            user_project: None,
            retry: RetrySetting::default(),
            idempotency_policy: Arc::new(DefaultIdempotencyPolicy),
            connection_pool_size: 4,
            logging_components: HashSet::new(),
            tracing_options: TracingOptions::default(),
            timeout: None,
        }
    }
}

impl Options {
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = normalize_endpoint(endpoint);
        self
    }

    pub fn with_logging_component(mut self, component: &str) -> Self {
        self.logging_components.insert(component.to_string());
        self
    }

    pub fn rpc_logging_enabled(&self) -> bool {
        self.logging_components.contains(LOGGING_COMPONENT_RPC)
    }

    /// Returns these options overridden by the values set in `call`.
    pub fn merge(&self, call: &CallOptions) -> Options {
        let mut merged = self.clone();
        if let Some(v) = &call.user_project {
            merged.user_project = Some(v.clone());
        }
        if let Some(v) = &call.retry {
            merged.retry = v.clone();
        }
        if let Some(v) = &call.idempotency_policy {
            merged.idempotency_policy = v.clone();
        }
        if let Some(v) = &call.logging_components {
            merged.logging_components = v.clone();
        }
        if let Some(v) = &call.tracing_options {
            merged.tracing_options = v.clone();
        }
        if call.timeout.is_some() {
            merged.timeout = call.timeout;
        }
        merged
    }
}

/// Per call overrides of [`Options`]. Unset fields keep the connection's value.
#[derive(Clone, Debug, Default)]
pub struct CallOptions {
    pub user_project: Option<String>,
    pub retry: Option<RetrySetting>,
    pub idempotency_policy: Option<Arc<dyn IdempotencyPolicy>>,
    pub logging_components: Option<HashSet<String>>,
    pub tracing_options: Option<TracingOptions>,
    pub timeout: Option<Duration>,
}
