use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use bigquery_minimal_gax::retry::{invoke, Idempotency};

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

/// Repeats failed calls according to the retry setting and idempotency policy of the call.
///
/// Every attempt starts from a fresh copy of the caller's context.
#[derive(Debug)]
pub struct RetryStub<S> {
    inner: Arc<S>,
}

impl<S> RetryStub<S> {
    pub fn new(inner: Arc<S>) -> Self {
        Self { inner }
    }
}

async fn with_retry<T, F, Fut>(context: &RestContext, idempotency: Idempotency, mut call: F) -> Result<T, Error>
where
    F: FnMut(RestContext) -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    let setting = context.options().retry.clone();
    invoke(Some(setting), idempotency, || call(context.clone())).await
}

#[async_trait]
impl<S: DatasetStub> DatasetStub for RetryStub<S> {
    async fn get_dataset(
        &self,
        context: &mut RestContext,
        request: &GetDatasetRequest,
    ) -> Result<GetDatasetResponse, Error> {
        let idempotency = context.options().idempotency_policy.get_dataset(request);
        with_retry(context, idempotency, |mut ctx| async move {
            self.inner.get_dataset(&mut ctx, request).await
        })
        .await
    }

    async fn list_datasets(
        &self,
        context: &mut RestContext,
        request: &ListDatasetsRequest,
    ) -> Result<ListDatasetsResponse, Error> {
        let idempotency = context.options().idempotency_policy.list_datasets(request);
        with_retry(context, idempotency, |mut ctx| async move {
            self.inner.list_datasets(&mut ctx, request).await
        })
        .await
    }
}

#[async_trait]
impl<S: TableStub> TableStub for RetryStub<S> {
    async fn get_table(&self, context: &mut RestContext, request: &GetTableRequest) -> Result<GetTableResponse, Error> {
        let idempotency = context.options().idempotency_policy.get_table(request);
        with_retry(context, idempotency, |mut ctx| async move {
            self.inner.get_table(&mut ctx, request).await
        })
        .await
    }

    async fn list_tables(
        &self,
        context: &mut RestContext,
        request: &ListTablesRequest,
    ) -> Result<ListTablesResponse, Error> {
        let idempotency = context.options().idempotency_policy.list_tables(request);
        with_retry(context, idempotency, |mut ctx| async move {
            self.inner.list_tables(&mut ctx, request).await
        })
        .await
    }
}

#[async_trait]
impl<S: JobStub> JobStub for RetryStub<S> {
    async fn get_job(&self, context: &mut RestContext, request: &GetJobRequest) -> Result<GetJobResponse, Error> {
        let idempotency = context.options().idempotency_policy.get_job(request);
        with_retry(context, idempotency, |mut ctx| async move {
            self.inner.get_job(&mut ctx, request).await
        })
        .await
    }

    async fn list_jobs(&self, context: &mut RestContext, request: &ListJobsRequest) -> Result<ListJobsResponse, Error> {
        let idempotency = context.options().idempotency_policy.list_jobs(request);
        with_retry(context, idempotency, |mut ctx| async move {
            self.inner.list_jobs(&mut ctx, request).await
        })
        .await
    }

    async fn insert_job(
        &self,
        context: &mut RestContext,
        request: &InsertJobRequest,
    ) -> Result<InsertJobResponse, Error> {
        let idempotency = context.options().idempotency_policy.insert_job(request);
        with_retry(context, idempotency, |mut ctx| async move {
            self.inner.insert_job(&mut ctx, request).await
        })
        .await
    }

    async fn cancel_job(
        &self,
        context: &mut RestContext,
        request: &CancelJobRequest,
    ) -> Result<CancelJobResponse, Error> {
        let idempotency = context.options().idempotency_policy.cancel_job(request);
        with_retry(context, idempotency, |mut ctx| async move {
            self.inner.cancel_job(&mut ctx, request).await
        })
        .await
    }

    async fn query(&self, context: &mut RestContext, request: &PostQueryRequest) -> Result<QueryResponse, Error> {
        let idempotency = context.options().idempotency_policy.query(request);
        with_retry(context, idempotency, |mut ctx| async move {
            self.inner.query(&mut ctx, request).await
        })
        .await
    }

    async fn get_query_results(
        &self,
        context: &mut RestContext,
        request: &GetQueryResultsRequest,
    ) -> Result<GetQueryResultsResponse, Error> {
        let idempotency = context.options().idempotency_policy.get_query_results(request);
        with_retry(context, idempotency, |mut ctx| async move {
            self.inner.get_query_results(&mut ctx, request).await
        })
        .await
    }
}
