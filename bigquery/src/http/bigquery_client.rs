use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use token_source::TokenSource;

use crate::http::error::Error;
use crate::http::rest::{HttpResponse, RestClient, RestContext, RestRequest};

pub const SCOPES: [&str; 3] = [
    "https://www.googleapis.com/auth/bigquery",
    "https://www.googleapis.com/auth/cloud-platform",
    "https://www.googleapis.com/auth/cloud-platform.read-only",
];

const USER_AGENT: &str = concat!("bigquery-minimal/", env!("CARGO_PKG_VERSION"));

/// [`RestClient`] sending the calls over HTTP to the endpoint found in the call options.
///
/// Without a token source the requests are sent without credentials, which is what emulators
/// expect.
#[derive(Debug, Clone)]
pub struct BigqueryClient {
    ts: Option<Arc<dyn TokenSource>>,
    http: Client,
}

impl BigqueryClient {
    pub fn new(ts: Option<Arc<dyn TokenSource>>, http: Client) -> Self {
        Self { ts, http }
    }

    async fn with_headers(&self, context: &RestContext, builder: RequestBuilder) -> Result<RequestBuilder, Error> {
        let mut builder = builder.header(reqwest::header::USER_AGENT, USER_AGENT);
        for (name, value) in context.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = context.options().timeout {
            builder = builder.timeout(timeout);
        }
        match &self.ts {
            Some(ts) => {
                let token = ts.token().await.map_err(Error::TokenSource)?;
                Ok(builder.header(reqwest::header::AUTHORIZATION, token))
            }
            None => Ok(builder),
        }
    }

    async fn send(&self, context: &RestContext, builder: RequestBuilder) -> Result<HttpResponse, Error> {
        let builder = self.with_headers(context, builder).await?;
        let response = builder.send().await.inspect_err(|e| {
            tracing::debug!("failed to send request: {e}");
        })?;
        let status_code = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.to_string(), v.to_string())))
            .collect::<HashMap<_, _>>();
        let payload = response.text().await.inspect_err(|e| {
            tracing::debug!("failed to read response body: status={status_code}, {e}");
        })?;
        Ok(HttpResponse {
            status_code,
            headers,
            payload,
        })
    }
}

/// The absolute URL of `request` below `endpoint`, without the query string.
pub(crate) fn request_url(endpoint: &str, request: &RestRequest) -> String {
    format!("{endpoint}{}", request.path())
}

#[async_trait]
impl RestClient for BigqueryClient {
    async fn get(&self, context: &RestContext, request: &RestRequest) -> Result<HttpResponse, Error> {
        let url = request_url(&context.options().endpoint, request);
        let builder = self.http.get(url).query(request.query());
        self.send(context, builder).await
    }

    async fn post(
        &self,
        context: &RestContext,
        request: &RestRequest,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, Error> {
        let url = request_url(&context.options().endpoint, request);
        let builder = self.http.post(url).query(request.query());
        let builder = if body.is_null() {
            builder.header(reqwest::header::CONTENT_LENGTH, "0")
        } else {
            builder.json(body)
        };
        self.send(context, builder).await
    }
}
