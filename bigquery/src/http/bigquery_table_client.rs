use std::sync::Arc;

use futures_util::stream::BoxStream;

use crate::connection::TableConnection;
use crate::http::error::Error;
use crate::http::table::get::{GetTableRequest, GetTableResponse};
use crate::http::table::list::{ListTablesRequest, TableOverview};
use crate::options::CallOptions;

#[derive(Debug, Clone)]
pub struct BigqueryTableClient {
    inner: Arc<TableConnection>,
}

impl BigqueryTableClient {
    pub fn new(inner: Arc<TableConnection>) -> Self {
        Self { inner }
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get(&self, request: &GetTableRequest, options: &CallOptions) -> Result<GetTableResponse, Error> {
        self.inner.get_table(request, options).await
    }

    pub fn list(
        &self,
        request: ListTablesRequest,
        options: &CallOptions,
    ) -> BoxStream<'static, Result<TableOverview, Error>> {
        self.inner.list_tables(request, options)
    }
}
