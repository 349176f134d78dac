use std::sync::Arc;

use futures_util::stream::BoxStream;

use crate::connection::DatasetConnection;
use crate::http::dataset::get::{GetDatasetRequest, GetDatasetResponse};
use crate::http::dataset::list::{DatasetOverview, ListDatasetsRequest};
use crate::http::error::Error;
use crate::options::CallOptions;

#[derive(Debug, Clone)]
pub struct BigqueryDatasetClient {
    inner: Arc<DatasetConnection>,
}

impl BigqueryDatasetClient {
    pub fn new(inner: Arc<DatasetConnection>) -> Self {
        Self { inner }
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get(&self, request: &GetDatasetRequest, options: &CallOptions) -> Result<GetDatasetResponse, Error> {
        self.inner.get_dataset(request, options).await
    }

    /// Lists the datasets of a project, fetching one page per request as the stream is polled.
    pub fn list(
        &self,
        request: ListDatasetsRequest,
        options: &CallOptions,
    ) -> BoxStream<'static, Result<DatasetOverview, Error>> {
        self.inner.list_datasets(request, options)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures_util::StreamExt;

    use crate::connection::make_dataset_connection;
    use crate::http::bigquery_dataset_client::BigqueryDatasetClient;
    use crate::http::dataset::get::GetDatasetRequest;
    use crate::http::dataset::list::ListDatasetsRequest;
    use crate::log::TracingLogSink;
    use crate::options::{CallOptions, Options};
    use crate::stub::default::tests::FakeRestClient;

    #[ctor::ctor]
    fn init() {
        let _ = tracing_subscriber::fmt::try_init();
    }

    #[tokio::test]
    async fn test_get_and_list() {
        let rest = Arc::new(FakeRestClient::new(vec![
            (
                200,
                r#"{"kind": "bigquery#dataset", "etag": "e", "id": "p:d", "location": "US",
                    "datasetReference": {"projectId": "p", "datasetId": "d"}}"#,
            ),
            (200, r#"{"kind": "bigquery#datasetList", "etag": "e"}"#),
        ]));
        let connection = make_dataset_connection(Options::default(), rest, Arc::new(TracingLogSink));
        let client = BigqueryDatasetClient::new(Arc::new(connection));

        let response = client
            .get(&GetDatasetRequest::new("p", "d"), &CallOptions::default())
            .await
            .unwrap();
        assert_eq!(response.dataset.dataset_reference.dataset_id, "d");
        assert_eq!(response.http_response.status_code, 200);

        let datasets: Vec<_> = client
            .list(ListDatasetsRequest::new("p"), &CallOptions::default())
            .collect()
            .await;
        assert!(datasets.is_empty());
    }
}
