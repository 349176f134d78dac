use std::sync::Arc;

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
use crate::stub::{DatasetStub, JobStub, TableStub};

pub const API_CLIENT_HEADER: &str = "x-goog-api-client";
pub const REQUEST_PARAMS_HEADER: &str = "x-goog-request-params";
pub const USER_PROJECT_HEADER: &str = "x-goog-user-project";

/// Adds the version and routing headers to every call.
#[derive(Debug)]
pub struct MetadataStub<S> {
    inner: Arc<S>,
    api_client: String,
}

impl<S> MetadataStub<S> {
    pub fn new(inner: Arc<S>) -> Self {
        Self {
            inner,
            api_client: format!("gl-rust gccl/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    fn set_metadata(&self, context: &mut RestContext, params: &[(&str, &str)]) {
        context.set_header(API_CLIENT_HEADER, self.api_client.as_str());
        let routing = params
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        if !routing.is_empty() {
            context.set_header(REQUEST_PARAMS_HEADER, routing);
        }
        if let Some(user_project) = context.options().user_project.clone() {
            context.set_header(USER_PROJECT_HEADER, user_project);
        }
    }
}

#[async_trait]
impl<S: DatasetStub> DatasetStub for MetadataStub<S> {
    async fn get_dataset(
        &self,
        context: &mut RestContext,
        request: &GetDatasetRequest,
    ) -> Result<GetDatasetResponse, Error> {
        self.set_metadata(
            context,
            &[("project_id", request.project_id.as_str()), ("dataset_id", request.dataset_id.as_str())],
        );
        self.inner.get_dataset(context, request).await
    }

    async fn list_datasets(
        &self,
        context: &mut RestContext,
        request: &ListDatasetsRequest,
    ) -> Result<ListDatasetsResponse, Error> {
        self.set_metadata(context, &[("project_id", request.project_id.as_str())]);
        self.inner.list_datasets(context, request).await
    }
}

#[async_trait]
impl<S: TableStub> TableStub for MetadataStub<S> {
    async fn get_table(&self, context: &mut RestContext, request: &GetTableRequest) -> Result<GetTableResponse, Error> {
        self.set_metadata(
            context,
            &[
                ("project_id", request.project_id.as_str()),
                ("dataset_id", request.dataset_id.as_str()),
                ("table_id", request.table_id.as_str()),
            ],
        );
        self.inner.get_table(context, request).await
    }

    async fn list_tables(
        &self,
        context: &mut RestContext,
        request: &ListTablesRequest,
    ) -> Result<ListTablesResponse, Error> {
        self.set_metadata(
            context,
            &[("project_id", request.project_id.as_str()), ("dataset_id", request.dataset_id.as_str())],
        );
        self.inner.list_tables(context, request).await
    }
}

#[async_trait]
impl<S: JobStub> JobStub for MetadataStub<S> {
    async fn get_job(&self, context: &mut RestContext, request: &GetJobRequest) -> Result<GetJobResponse, Error> {
        self.set_metadata(context, &[("project_id", request.project_id.as_str()), ("job_id", request.job_id.as_str())]);
        self.inner.get_job(context, request).await
    }

    async fn list_jobs(&self, context: &mut RestContext, request: &ListJobsRequest) -> Result<ListJobsResponse, Error> {
        self.set_metadata(context, &[("project_id", request.project_id.as_str())]);
        self.inner.list_jobs(context, request).await
    }

    async fn insert_job(
        &self,
        context: &mut RestContext,
        request: &InsertJobRequest,
    ) -> Result<InsertJobResponse, Error> {
        self.set_metadata(
            context,
            &[
                ("project_id", request.project_id.as_str()),
                ("job_id", request.job.job_reference.job_id.as_str()),
            ],
        );
        self.inner.insert_job(context, request).await
    }

    async fn cancel_job(
        &self,
        context: &mut RestContext,
        request: &CancelJobRequest,
    ) -> Result<CancelJobResponse, Error> {
        self.set_metadata(context, &[("project_id", request.project_id.as_str()), ("job_id", request.job_id.as_str())]);
        self.inner.cancel_job(context, request).await
    }

    async fn query(&self, context: &mut RestContext, request: &PostQueryRequest) -> Result<QueryResponse, Error> {
        self.set_metadata(context, &[("project_id", request.project_id.as_str())]);
        self.inner.query(context, request).await
    }

    async fn get_query_results(
        &self,
        context: &mut RestContext,
        request: &GetQueryResultsRequest,
    ) -> Result<GetQueryResultsResponse, Error> {
        self.set_metadata(context, &[("project_id", request.project_id.as_str()), ("job_id", request.job_id.as_str())]);
        self.inner.get_query_results(context, request).await
    }
}
