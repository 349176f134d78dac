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
use crate::http::response::BuildFromHttpResponse;
use crate::http::rest::{RestClient, RestContext};
use crate::http::table::get::{GetTableRequest, GetTableResponse};
use crate::http::table::list::{ListTablesRequest, ListTablesResponse};
use crate::http::{dataset, job, table};
use crate::stub::{DatasetStub, JobStub, TableStub};

/// Sends each call as a single HTTP request and builds the typed response.
#[derive(Debug, Clone)]
pub struct DefaultStub {
    rest: Arc<dyn RestClient>,
}

impl DefaultStub {
    pub fn new(rest: Arc<dyn RestClient>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl DatasetStub for DefaultStub {
    async fn get_dataset(
        &self,
        context: &mut RestContext,
        request: &GetDatasetRequest,
    ) -> Result<GetDatasetResponse, Error> {
        let rest = dataset::get::build(request)?;
        GetDatasetResponse::build_from_http_response(self.rest.get(context, &rest).await?)
    }

    async fn list_datasets(
        &self,
        context: &mut RestContext,
        request: &ListDatasetsRequest,
    ) -> Result<ListDatasetsResponse, Error> {
        let rest = dataset::list::build(request)?;
        ListDatasetsResponse::build_from_http_response(self.rest.get(context, &rest).await?)
    }
}

#[async_trait]
impl TableStub for DefaultStub {
    async fn get_table(&self, context: &mut RestContext, request: &GetTableRequest) -> Result<GetTableResponse, Error> {
        let rest = table::get::build(request)?;
        GetTableResponse::build_from_http_response(self.rest.get(context, &rest).await?)
    }

    async fn list_tables(
        &self,
        context: &mut RestContext,
        request: &ListTablesRequest,
    ) -> Result<ListTablesResponse, Error> {
        let rest = table::list::build(request)?;
        ListTablesResponse::build_from_http_response(self.rest.get(context, &rest).await?)
    }
}

#[async_trait]
impl JobStub for DefaultStub {
    async fn get_job(&self, context: &mut RestContext, request: &GetJobRequest) -> Result<GetJobResponse, Error> {
        let rest = job::get::build(request)?;
        GetJobResponse::build_from_http_response(self.rest.get(context, &rest).await?)
    }

    async fn list_jobs(&self, context: &mut RestContext, request: &ListJobsRequest) -> Result<ListJobsResponse, Error> {
        let rest = job::list::build(request)?;
        ListJobsResponse::build_from_http_response(self.rest.get(context, &rest).await?)
    }

    async fn insert_job(
        &self,
        context: &mut RestContext,
        request: &InsertJobRequest,
    ) -> Result<InsertJobResponse, Error> {
        let (rest, body) = job::insert::build(request)?;
        InsertJobResponse::build_from_http_response(self.rest.post(context, &rest, &body).await?)
    }

    async fn cancel_job(
        &self,
        context: &mut RestContext,
        request: &CancelJobRequest,
    ) -> Result<CancelJobResponse, Error> {
        let rest = job::cancel::build(request)?;
        CancelJobResponse::build_from_http_response(self.rest.post(context, &rest, &serde_json::Value::Null).await?)
    }

    async fn query(&self, context: &mut RestContext, request: &PostQueryRequest) -> Result<QueryResponse, Error> {
        let (rest, body) = job::query::build(request)?;
        QueryResponse::build_from_http_response(self.rest.post(context, &rest, &body).await?)
    }

    async fn get_query_results(
        &self,
        context: &mut RestContext,
        request: &GetQueryResultsRequest,
    ) -> Result<GetQueryResultsResponse, Error> {
        let rest = job::get_query_results::build(request)?;
        GetQueryResultsResponse::build_from_http_response(self.rest.get(context, &rest).await?)
    }
}
