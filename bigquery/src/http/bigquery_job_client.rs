use std::sync::Arc;

use futures_util::stream::BoxStream;

use crate::connection::JobConnection;
use crate::http::error::Error;
use crate::http::job::cancel::{CancelJobRequest, CancelJobResponse};
use crate::http::job::get::{GetJobRequest, GetJobResponse};
use crate::http::job::get_query_results::{GetQueryResultsRequest, GetQueryResultsResponse};
use crate::http::job::insert::{InsertJobRequest, InsertJobResponse};
use crate::http::job::list::{JobOverview, ListJobsRequest};
use crate::http::job::query::{PostQueryRequest, QueryResponse};
use crate::options::CallOptions;

#[derive(Debug, Clone)]
pub struct BigqueryJobClient {
    inner: Arc<JobConnection>,
}

impl BigqueryJobClient {
    pub fn new(inner: Arc<JobConnection>) -> Self {
        Self { inner }
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get(&self, request: &GetJobRequest, options: &CallOptions) -> Result<GetJobResponse, Error> {
        self.inner.get_job(request, options).await
    }

    pub fn list(&self, request: ListJobsRequest, options: &CallOptions) -> BoxStream<'static, Result<JobOverview, Error>> {
        self.inner.list_jobs(request, options)
    }

    /// Starts a job. Leaving the job id empty lets the service pick one, but such a request is
    /// never retried.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn create(&self, request: &InsertJobRequest, options: &CallOptions) -> Result<InsertJobResponse, Error> {
        self.inner.insert_job(request, options).await
    }

    /// Requests the cancellation of a job. The returned job may still be running.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn cancel(&self, request: &CancelJobRequest, options: &CallOptions) -> Result<CancelJobResponse, Error> {
        self.inner.cancel_job(request, options).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn query(&self, request: &PostQueryRequest, options: &CallOptions) -> Result<QueryResponse, Error> {
        self.inner.query(request, options).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_query_results(
        &self,
        request: &GetQueryResultsRequest,
        options: &CallOptions,
    ) -> Result<GetQueryResultsResponse, Error> {
        self.inner.get_query_results(request, options).await
    }
}
