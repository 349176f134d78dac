use std::fmt::Debug;
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
use crate::log::{debug_string, Direction, LogRecord, LogSink};
use crate::options::TracingOptions;
use crate::stub::{DatasetStub, JobStub, TableStub};

/// Writes every request and its outcome to a [`LogSink`] when the `rpc` logging component is
/// enabled for the call. Results are passed through untouched.
#[derive(Debug)]
pub struct LoggingStub<S> {
    inner: Arc<S>,
    sink: Arc<dyn LogSink>,
}

impl<S> LoggingStub<S> {
    pub fn new(inner: Arc<S>, sink: Arc<dyn LogSink>) -> Self {
        Self { inner, sink }
    }

    /// Writes the request record and returns the rendering options for the response, or `None`
    /// when logging is disabled for the call.
    fn log_request<Req: Debug + ?Sized>(
        &self,
        rpc: &'static str,
        context: &RestContext,
        request: &Req,
    ) -> Option<TracingOptions> {
        if !context.options().rpc_logging_enabled() {
            return None;
        }
        let tracing_options = context.options().tracing_options.clone();
        self.sink.write(LogRecord {
            rpc,
            direction: Direction::Request,
            headers: context.headers().clone(),
            message: debug_string(request, &tracing_options),
        });
        Some(tracing_options)
    }

    /// Writes the response record with the headers the inner layers sent.
    fn log_response<Res: Debug>(
        &self,
        rpc: &'static str,
        tracing_options: Option<TracingOptions>,
        context: &RestContext,
        result: &Result<Res, Error>,
    ) {
        let Some(tracing_options) = tracing_options else {
            return;
        };
        let message = match result {
            Ok(response) => debug_string(response, &tracing_options),
            Err(e) => debug_string(e, &tracing_options),
        };
        self.sink.write(LogRecord {
            rpc,
            direction: Direction::Response,
            headers: context.headers().clone(),
            message,
        });
    }
}

#[async_trait]
impl<S: DatasetStub> DatasetStub for LoggingStub<S> {
    async fn get_dataset(
        &self,
        context: &mut RestContext,
        request: &GetDatasetRequest,
    ) -> Result<GetDatasetResponse, Error> {
        let logging = self.log_request("GetDataset", context, request);
        let result = self.inner.get_dataset(context, request).await;
        self.log_response("GetDataset", logging, context, &result);
        result
    }

    async fn list_datasets(
        &self,
        context: &mut RestContext,
        request: &ListDatasetsRequest,
    ) -> Result<ListDatasetsResponse, Error> {
        let logging = self.log_request("ListDatasets", context, request);
        let result = self.inner.list_datasets(context, request).await;
        self.log_response("ListDatasets", logging, context, &result);
        result
    }
}

#[async_trait]
impl<S: TableStub> TableStub for LoggingStub<S> {
    async fn get_table(&self, context: &mut RestContext, request: &GetTableRequest) -> Result<GetTableResponse, Error> {
        let logging = self.log_request("GetTable", context, request);
        let result = self.inner.get_table(context, request).await;
        self.log_response("GetTable", logging, context, &result);
        result
    }

    async fn list_tables(
        &self,
        context: &mut RestContext,
        request: &ListTablesRequest,
    ) -> Result<ListTablesResponse, Error> {
        let logging = self.log_request("ListTables", context, request);
        let result = self.inner.list_tables(context, request).await;
        self.log_response("ListTables", logging, context, &result);
        result
    }
}

#[async_trait]
impl<S: JobStub> JobStub for LoggingStub<S> {
    async fn get_job(&self, context: &mut RestContext, request: &GetJobRequest) -> Result<GetJobResponse, Error> {
        let logging = self.log_request("GetJob", context, request);
        let result = self.inner.get_job(context, request).await;
        self.log_response("GetJob", logging, context, &result);
        result
    }

    async fn list_jobs(&self, context: &mut RestContext, request: &ListJobsRequest) -> Result<ListJobsResponse, Error> {
        let logging = self.log_request("ListJobs", context, request);
        let result = self.inner.list_jobs(context, request).await;
        self.log_response("ListJobs", logging, context, &result);
        result
    }

    async fn insert_job(
        &self,
        context: &mut RestContext,
        request: &InsertJobRequest,
    ) -> Result<InsertJobResponse, Error> {
        let logging = self.log_request("InsertJob", context, request);
        let result = self.inner.insert_job(context, request).await;
        self.log_response("InsertJob", logging, context, &result);
        result
    }

    async fn cancel_job(
        &self,
        context: &mut RestContext,
        request: &CancelJobRequest,
    ) -> Result<CancelJobResponse, Error> {
        let logging = self.log_request("CancelJob", context, request);
        let result = self.inner.cancel_job(context, request).await;
        self.log_response("CancelJob", logging, context, &result);
        result
    }

    async fn query(&self, context: &mut RestContext, request: &PostQueryRequest) -> Result<QueryResponse, Error> {
        let logging = self.log_request("Query", context, request);
        let result = self.inner.query(context, request).await;
        self.log_response("Query", logging, context, &result);
        result
    }

    async fn get_query_results(
        &self,
        context: &mut RestContext,
        request: &GetQueryResultsRequest,
    ) -> Result<GetQueryResultsResponse, Error> {
        let logging = self.log_request("GetQueryResults", context, request);
        let result = self.inner.get_query_results(context, request).await;
        self.log_response("GetQueryResults", logging, context, &result);
        result
    }
}
