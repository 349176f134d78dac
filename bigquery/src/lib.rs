#![allow(clippy::result_large_err)]
//! # bigquery-minimal
//!
//! A typed client for the BigQuery v2 REST API covering datasets, tables, jobs and queries.
//!
//! ## Quick Start
//!
//! ### CreateClient
//!
//! `ClientConfig::with_auth()` reads the credentials from the file specified in the environment
//! variable `GOOGLE_APPLICATION_CREDENTIALS`, `GOOGLE_APPLICATION_CREDENTIALS_JSON` or from a
//! metadata server.
//!
//! ```rust
//! use bigquery_minimal::client::{Client, ClientConfig};
//!
//! async fn run() {
//!     let config = ClientConfig::default().with_auth().await.unwrap();
//!     let client = Client::new(config).unwrap();
//! }
//! ```
//!
//! Without credentials the requests are sent anonymously, which is how an emulator is reached.
//!
//! ```rust
//! use bigquery_minimal::client::{Client, ClientConfig};
//!
//! async fn run() {
//!     let config = ClientConfig {
//!         endpoint: "http://localhost:9050".to_string(),
//!         ..Default::default()
//!     };
//!     let client = Client::new(config).unwrap();
//! }
//! ```
//!
//! ### Query
//!
//! ```rust
//! use bigquery_minimal::client::Client;
//! use bigquery_minimal::http::job::get_query_results::GetQueryResultsRequest;
//! use bigquery_minimal::http::job::query::{PostQueryRequest, QueryRequest};
//! use bigquery_minimal::options::CallOptions;
//!
//! async fn run(client: &Client) {
//!     let mut request = QueryRequest::new("SELECT 1 AS one");
//!     request.request_id = Some("unique-request-id".to_string());
//!     let options = CallOptions::default();
//!     let response = client
//!         .job()
//!         .query(&PostQueryRequest::new(client.project_id(), request), &options)
//!         .await
//!         .unwrap();
//!     if !response.job_complete {
//!         let request = GetQueryResultsRequest::new(client.project_id(), response.job_reference.job_id);
//!         let results = client.job().get_query_results(&request, &options).await.unwrap();
//!         println!("{:?}", results.rows);
//!     }
//! }
//! ```
//!
//! ### List
//!
//! List calls return a stream of items. Pages are requested while the stream is consumed and a
//! failed page ends the stream with its error.
//!
//! ```rust
//! use futures_util::StreamExt;
//! use bigquery_minimal::client::Client;
//! use bigquery_minimal::http::dataset::list::ListDatasetsRequest;
//! use bigquery_minimal::options::CallOptions;
//!
//! async fn run(client: &Client) {
//!     let mut datasets = client
//!         .dataset()
//!         .list(ListDatasetsRequest::new(client.project_id()), &CallOptions::default());
//!     while let Some(dataset) = datasets.next().await {
//!         match dataset {
//!             Ok(dataset) => println!("{}", dataset.id),
//!             Err(e) => println!("{e}"),
//!         }
//!     }
//! }
//! ```
//!
//! ### Logging
//!
//! Add the `rpc` logging component to write every request and response through the configured
//! [`log::LogSink`]. The default sink emits `tracing` events under the `bigquery_minimal::rpc`
//! target.
//!
//! ```rust
//! use bigquery_minimal::client::ClientConfig;
//! use bigquery_minimal::options::{Options, LOGGING_COMPONENT_RPC};
//!
//! let config = ClientConfig {
//!     options: Options::default().with_logging_component(LOGGING_COMPONENT_RPC),
//!     ..Default::default()
//! };
//! ```
pub mod client;
pub mod connection;
pub mod http;
pub mod idempotency;
pub mod iterator;
pub mod log;
pub mod options;
pub mod stub;
