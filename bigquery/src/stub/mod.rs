//! The RPC layer under the clients.
//!
//! Every call goes through the same traits. [`default::DefaultStub`] sends one HTTP request per
//! call and the decorators wrap it, outermost first:
//! [`retry::RetryStub`] → [`logging::LoggingStub`] → [`metadata::MetadataStub`] → [`default::DefaultStub`].
use std::fmt::Debug;

use async_trait::async_trait;

use crate::http::dataset::get::{GetDatasetRequest, GetDatasetResponse};
use crate::http::dataset::list::{ListDatasetsRequest, ListDatasetsResponse};
use crate::http::error::Error;
use crate::http::job::cancel::{CancelJobRequest, CancelJobResponse};
use crate::http::job::get::{GetJobRequest, GetJobResponse};
use crate::http::job::get_query_results::{GetQueryResultsRequest, GetQueryResultsResponse};
use crate::http::job::insert::{InsertJobRequest, InsertJobResponse};
use crate::http::job::list::{ListJobsRequest, ListJobsResponse};
use crate::http::job::query::{PostQueryRequest, QueryResponse};
use crate::http::rest::RestContext;
use crate::http::table::get::{GetTableRequest, GetTableResponse};
use crate::http::table::list::{ListTablesRequest, ListTablesResponse};

pub mod default;
pub mod logging;
pub mod metadata;
pub mod retry;

#[async_trait]
pub trait DatasetStub: Send + Sync + Debug {
    async fn get_dataset(
        &self,
        context: &mut RestContext,
        request: &GetDatasetRequest,
    ) -> Result<GetDatasetResponse, Error>;

    async fn list_datasets(
        &self,
        context: &mut RestContext,
        request: &ListDatasetsRequest,
    ) -> Result<ListDatasetsResponse, Error>;
}

#[async_trait]
pub trait TableStub: Send + Sync + Debug {
    async fn get_table(&self, context: &mut RestContext, request: &GetTableRequest) -> Result<GetTableResponse, Error>;

    async fn list_tables(
        &self,
        context: &mut RestContext,
        request: &ListTablesRequest,
    ) -> Result<ListTablesResponse, Error>;
}

#[async_trait]
pub trait JobStub: Send + Sync + Debug {
    async fn get_job(&self, context: &mut RestContext, request: &GetJobRequest) -> Result<GetJobResponse, Error>;

    async fn list_jobs(&self, context: &mut RestContext, request: &ListJobsRequest) -> Result<ListJobsResponse, Error>;

    async fn insert_job(
        &self,
        context: &mut RestContext,
        request: &InsertJobRequest,
    ) -> Result<InsertJobResponse, Error>;

    async fn cancel_job(
        &self,
        context: &mut RestContext,
        request: &CancelJobRequest,
    ) -> Result<CancelJobResponse, Error>;

    async fn query(&self, context: &mut RestContext, request: &PostQueryRequest) -> Result<QueryResponse, Error>;

    async fn get_query_results(
        &self,
        context: &mut RestContext,
        request: &GetQueryResultsRequest,
    ) -> Result<GetQueryResultsResponse, Error>;
}
