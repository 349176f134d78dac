use std::sync::Arc;

use token_source::TokenSourceProvider;

use crate::connection::{make_dataset_connection, make_job_connection, make_table_connection};
use crate::http::bigquery_client::BigqueryClient;
use crate::http::bigquery_dataset_client::BigqueryDatasetClient;
use crate::http::bigquery_job_client::BigqueryJobClient;
use crate::http::bigquery_table_client::BigqueryTableClient;
use crate::http::error::Error;
use crate::http::rest::RestClient;
use crate::log::{LogSink, TracingLogSink};
use crate::options::{normalize_endpoint, Options, DEFAULT_ENDPOINT};

#[derive(Debug)]
pub struct ClientConfig {
    /// HTTP client to send the requests with. When unset one is built honoring
    /// [`Options::connection_pool_size`].
    pub http: Option<reqwest::Client>,
    /// Service endpoint, normalized with [`crate::options::normalize_endpoint`]. Ignored when
    /// `options` already carries an endpoint other than the default one.
    pub endpoint: String,
    /// `None` sends the requests without credentials.
    pub token_source_provider: Option<Box<dyn TokenSourceProvider>>,
    pub options: Options,
    /// Destination of the RPC log records, see [`crate::options::LOGGING_COMPONENT_RPC`].
    pub log_sink: Arc<dyn LogSink>,
    pub project_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token_source_provider: None,
            options: Options::default(),
            log_sink: Arc::new(TracingLogSink),
            project_id: None,
        }
    }
}

#[cfg(feature = "auth")]
pub use google_cloud_auth;

#[cfg(feature = "auth")]
impl ClientConfig {
    /// Uses the application default credentials and the project they belong to.
    pub async fn with_auth(mut self) -> Result<Self, google_cloud_auth::error::Error> {
        let config = google_cloud_auth::project::Config::default().with_scopes(&crate::http::bigquery_client::SCOPES);
        let ts = google_cloud_auth::token::DefaultTokenSourceProvider::new(config).await?;
        if self.project_id.is_none() {
            self.project_id = ts.project_id.clone();
        }
        self.token_source_provider = Some(Box::new(ts));
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    dataset_client: BigqueryDatasetClient,
    table_client: BigqueryTableClient,
    job_client: BigqueryJobClient,
    project_id: String,
}

impl Client {
    /// New client
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let ts = config.token_source_provider.map(|tsp| tsp.token_source());
        if ts.is_none() {
            tracing::trace!("Use anonymous access due to lack of token");
        }
        let options = resolve_options(&config.endpoint, config.options)?;
        let http = match config.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .pool_max_idle_per_host(options.connection_pool_size)
                .build()?,
        };
        let http = reqwest_middleware::ClientBuilder::new(http).build();
        let rest: Arc<dyn RestClient> = Arc::new(BigqueryClient::new(ts, http));
        let sink = config.log_sink;

        Ok(Self {
            dataset_client: BigqueryDatasetClient::new(Arc::new(make_dataset_connection(
                options.clone(),
                rest.clone(),
                sink.clone(),
            ))),
            table_client: BigqueryTableClient::new(Arc::new(make_table_connection(
                options.clone(),
                rest.clone(),
                sink.clone(),
            ))),
            job_client: BigqueryJobClient::new(Arc::new(make_job_connection(options, rest, sink))),
            project_id: config.project_id.unwrap_or_default(),
        })
    }

    pub fn dataset(&self) -> &BigqueryDatasetClient {
        &self.dataset_client
    }

    pub fn table(&self) -> &BigqueryTableClient {
        &self.table_client
    }

    pub fn job(&self) -> &BigqueryJobClient {
        &self.job_client
    }

    /// The project of the credentials, or the one given in the config. Empty when neither is known.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }
}

fn resolve_options(endpoint: &str, options: Options) -> Result<Options, Error> {
    let options = if options.endpoint == normalize_endpoint(DEFAULT_ENDPOINT) {
        options.with_endpoint(endpoint)
    } else {
        options
    };
    if options.endpoint.is_empty() {
        return Err(Error::InvalidRequest("endpoint must not be empty".to_string()));
    }
    Ok(options)
}
