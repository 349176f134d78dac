use std::sync::Arc;

use futures_util::stream::BoxStream;

use crate::http::dataset::get::{GetDatasetRequest, GetDatasetResponse};
use crate::http::dataset::list::{DatasetOverview, ListDatasetsRequest};
use crate::http::error::Error;
use crate::http::job::cancel::{CancelJobRequest, CancelJobResponse};
use crate::http::job::get::{GetJobRequest, GetJobResponse};
use crate::http::job::get_query_results::{GetQueryResultsRequest, GetQueryResultsResponse};
use crate::http::job::insert::{InsertJobRequest, InsertJobResponse};
use crate::http::job::list::{JobOverview, ListJobsRequest};
use crate::http::job::query::{PostQueryRequest, QueryResponse};
use crate::http::rest::{RestClient, RestContext};
use crate::http::table::get::{GetTableRequest, GetTableResponse};
use crate::http::table::list::{ListTablesRequest, TableOverview};
use crate::iterator::paginate;
use crate::log::LogSink;
use crate::options::{CallOptions, Options};
use crate::stub::default::DefaultStub;
use crate::stub::logging::LoggingStub;
use crate::stub::metadata::MetadataStub;
use crate::stub::retry::RetryStub;
use crate::stub::{DatasetStub, JobStub, TableStub};

type Stack = RetryStub<LoggingStub<MetadataStub<DefaultStub>>>;

fn make_stack(rest: Arc<dyn RestClient>, sink: Arc<dyn LogSink>) -> Arc<Stack> {
    let default = Arc::new(DefaultStub::new(rest));
    let metadata = Arc::new(MetadataStub::new(default));
    let logging = Arc::new(LoggingStub::new(metadata, sink));
    Arc::new(RetryStub::new(logging))
}

/// Dataset calls over a stub, with the options every call starts from.
#[derive(Debug, Clone)]
pub struct DatasetConnection {
    stub: Arc<dyn DatasetStub>,
    options: Options,
}

impl DatasetConnection {
    pub fn new(stub: Arc<dyn DatasetStub>, options: Options) -> Self {
        Self { stub, options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub async fn get_dataset(
        &self,
        request: &GetDatasetRequest,
        call: &CallOptions,
    ) -> Result<GetDatasetResponse, Error> {
        let mut context = RestContext::new(self.options.merge(call));
        self.stub.get_dataset(&mut context, request).await
    }

    pub fn list_datasets(
        &self,
        request: ListDatasetsRequest,
        call: &CallOptions,
    ) -> BoxStream<'static, Result<DatasetOverview, Error>> {
        let stub = self.stub.clone();
        let options = self.options.merge(call);
        paginate(request, move |request: ListDatasetsRequest| {
            let stub = stub.clone();
            let mut context = RestContext::new(options.clone());
            async move { stub.list_datasets(&mut context, &request).await }
        })
    }
}

/// Table calls over a stub, with the options every call starts from.
#[derive(Debug, Clone)]
pub struct TableConnection {
    stub: Arc<dyn TableStub>,
    options: Options,
}

impl TableConnection {
    pub fn new(stub: Arc<dyn TableStub>, options: Options) -> Self {
        Self { stub, options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub async fn get_table(&self, request: &GetTableRequest, call: &CallOptions) -> Result<GetTableResponse, Error> {
        let mut context = RestContext::new(self.options.merge(call));
        self.stub.get_table(&mut context, request).await
    }

    pub fn list_tables(
        &self,
        request: ListTablesRequest,
        call: &CallOptions,
    ) -> BoxStream<'static, Result<TableOverview, Error>> {
        let stub = self.stub.clone();
        let options = self.options.merge(call);
        paginate(request, move |request: ListTablesRequest| {
            let stub = stub.clone();
            let mut context = RestContext::new(options.clone());
            async move { stub.list_tables(&mut context, &request).await }
        })
    }
}

/// Job and query calls over a stub, with the options every call starts from.
#[derive(Debug, Clone)]
pub struct JobConnection {
    stub: Arc<dyn JobStub>,
    options: Options,
}

impl JobConnection {
    pub fn new(stub: Arc<dyn JobStub>, options: Options) -> Self {
        Self { stub, options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    fn context(&self, call: &CallOptions) -> RestContext {
        RestContext::new(self.options.merge(call))
    }

    pub async fn get_job(&self, request: &GetJobRequest, call: &CallOptions) -> Result<GetJobResponse, Error> {
        self.stub.get_job(&mut self.context(call), request).await
    }

    pub fn list_jobs(&self, request: ListJobsRequest, call: &CallOptions) -> BoxStream<'static, Result<JobOverview, Error>> {
        let stub = self.stub.clone();
        let options = self.options.merge(call);
        paginate(request, move |request: ListJobsRequest| {
            let stub = stub.clone();
            let mut context = RestContext::new(options.clone());
            async move { stub.list_jobs(&mut context, &request).await }
        })
    }

    pub async fn insert_job(&self, request: &InsertJobRequest, call: &CallOptions) -> Result<InsertJobResponse, Error> {
        self.stub.insert_job(&mut self.context(call), request).await
    }

    pub async fn cancel_job(&self, request: &CancelJobRequest, call: &CallOptions) -> Result<CancelJobResponse, Error> {
        self.stub.cancel_job(&mut self.context(call), request).await
    }

    pub async fn query(&self, request: &PostQueryRequest, call: &CallOptions) -> Result<QueryResponse, Error> {
        self.stub.query(&mut self.context(call), request).await
    }

    pub async fn get_query_results(
        &self,
        request: &GetQueryResultsRequest,
        call: &CallOptions,
    ) -> Result<GetQueryResultsResponse, Error> {
        self.stub.get_query_results(&mut self.context(call), request).await
    }
}

/// Builds a dataset connection sending its calls through retry, logging and metadata to `rest`.
pub fn make_dataset_connection(options: Options, rest: Arc<dyn RestClient>, sink: Arc<dyn LogSink>) -> DatasetConnection {
    DatasetConnection::new(make_stack(rest, sink), options)
}

/// Builds a table connection sending its calls through retry, logging and metadata to `rest`.
pub fn make_table_connection(options: Options, rest: Arc<dyn RestClient>, sink: Arc<dyn LogSink>) -> TableConnection {
    TableConnection::new(make_stack(rest, sink), options)
}

/// Builds a job connection sending its calls through retry, logging and metadata to `rest`.
pub fn make_job_connection(options: Options, rest: Arc<dyn RestClient>, sink: Arc<dyn LogSink>) -> JobConnection {
    JobConnection::new(make_stack(rest, sink), options)
}
