use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;

use async_trait::async_trait;

use crate::http::error::Error;
use crate::options::Options;

/// A REST call relative to the service endpoint, e.g. `/projects/p/jobs/j?location=US`.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct RestRequest {
    path: String,
    query: Vec<(String, String)>,
}

impl RestRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: vec![],
        }
    }

    pub fn add_query_parameter(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn query_parameter(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Fails with [`Error::InvalidRequest`] when a path parameter is empty.
pub(crate) fn required_param<'a>(value: &'a str, name: &str) -> Result<&'a str, Error> {
    if value.is_empty() {
        Err(Error::InvalidRequest(format!("{name} is required")))
    } else {
        Ok(value)
    }
}

/// The raw HTTP response. Typed responses keep a copy of it for diagnostics.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub payload: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Per call ambient state: the headers to send and the options in effect for the call.
#[derive(Clone, Debug, Default)]
pub struct RestContext {
    headers: BTreeMap<String, String>,
    options: Options,
}

impl RestContext {
    pub fn new(options: Options) -> Self {
        Self {
            headers: BTreeMap::new(),
            options,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Looks a header up by its case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Sets a header, replacing any previous value with the same name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }
}

/// The HTTP transport. Any HTTP status is returned as a response; `Err` means the request
/// could not be completed at all.
#[async_trait]
pub trait RestClient: Send + Sync + Debug {
    async fn get(&self, context: &RestContext, request: &RestRequest) -> Result<HttpResponse, Error>;

    async fn post(
        &self,
        context: &RestContext,
        request: &RestRequest,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, Error>;
}

#[cfg(test)]
mod tests {
    use crate::http::rest::RestContext;
    use crate::options::Options;

    #[test]
    fn test_header_names_ignore_case() {
        let mut context = RestContext::new(Options::default());
        context.set_header("X-Goog-User-Project", "billing");
        assert_eq!(context.header("x-goog-user-project"), Some("billing"));
        assert_eq!(context.header("X-Goog-User-Project"), Some("billing"));

        context.set_header("x-goog-user-project", "other");
        assert_eq!(context.headers().len(), 1);
        assert_eq!(context.header("X-GOOG-USER-PROJECT"), Some("other"));
    }
}
