use std::collections::HashMap;
use std::time::Duration;

use crate::http::dataset::DatasetReference;
use crate::http::error::Error;
use crate::http::job::{DmlStats, JobReference, SessionInfo, Tuple};
use crate::http::response::{check_required_keys, decode, parse_json, BuildFromHttpResponse};
use crate::http::rest::{required_param, HttpResponse, RestRequest};
use crate::http::table::TableSchema;
use crate::http::types::{ConnectionProperty, DataFormatOptions, ErrorProto, QueryParameter};

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryRequest {
    /// The resource type of the request.
    pub kind: String,
    /// Required. A query string to execute, using Google Standard SQL or legacy SQL syntax.
    /// Example: "SELECT COUNT(f1) FROM myProjectId.myDatasetId.myTableId".
    pub query: String,
    /// Optional. The maximum number of rows of data to return per page of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i64>,
    /// Optional. Specifies the default datasetId and projectId to assume for any unqualified table names in the query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_dataset: Option<DatasetReference>,
    /// Optional. How long to wait for the query to complete. The service defaults to 10 seconds.
    /// If the query has not completed when this expires, `job_complete` is false in the response.
    #[serde(
        rename = "timeoutMs",
        with = "crate::http::duration_ms",
        skip_serializing_if = "Duration::is_zero"
    )]
    pub timeout: Duration,
    /// Optional. If set to true, BigQuery doesn't run the job.
    pub dry_run: bool,
    /// Optional. Whether to look for the result in the query cache. The default value is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_query_cache: Option<bool>,
    /// Specifies whether to use BigQuery's legacy SQL dialect for this query.
    pub use_legacy_sql: bool,
    /// GoogleSQL only. Set to POSITIONAL to use positional (?) query parameters or
    /// to NAMED to use named (@myparam) query parameters in this query.
    pub parameter_mode: String,
    /// Query parameters for GoogleSQL queries.
    pub query_parameters: Vec<QueryParameter>,
    /// The geographic location where the job should run.
    pub location: String,
    /// Optional. Output format adjustments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_options: Option<DataFormatOptions>,
    /// Optional. Connection properties which can modify the query behavior.
    pub connection_properties: Vec<ConnectionProperty>,
    /// Optional. The labels associated with this query.
    pub labels: HashMap<String, String>,
    /// Optional. Limits the bytes billed for this query.
    #[serde(deserialize_with = "crate::http::from_str_option", skip_serializing_if = "Option::is_none")]
    pub maximum_bytes_billed: Option<i64>,
    /// Optional. A unique user provided identifier to ensure idempotent behavior for queries.
    /// It is case-sensitive and limited to 36 ASCII characters. A UUID is recommended.
    /// A request is a duplicate of another only when they share this id and are actually duplicates.
    /// Its lifetime is limited to 15 minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Optional. If true, creates a new session using a randomly generated sessionId.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_session: Option<bool>,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct PostQueryRequest {
    /// Required. Project ID of the query request.
    pub project_id: String,
    pub query_request: QueryRequest,
}

impl PostQueryRequest {
    pub fn new(project_id: impl Into<String>, query_request: QueryRequest) -> Self {
        Self {
            project_id: project_id.into(),
            query_request,
        }
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryResponse {
    /// The resource type.
    pub kind: String,
    /// The schema of the results. Present only when the query completes successfully.
    pub schema: Option<TableSchema>,
    /// Reference to the Job that was created to run the query.
    /// This field will be present even if the original request timed out,
    /// in which case GetQueryResults can be used to read the results once the query has completed.
    pub job_reference: JobReference,
    /// The total number of rows in the complete query result set,
    /// which can be more than the number of rows in this single page of results.
    #[serde(deserialize_with = "crate::http::from_str_option")]
    pub total_rows: Option<u64>,
    /// A token used for paging results. Empty when there are no more results.
    pub page_token: String,
    /// The first page of rows.
    pub rows: Vec<Tuple>,
    /// The total number of bytes processed for this query.
    #[serde(deserialize_with = "crate::http::from_str_option")]
    pub total_bytes_processed: Option<i64>,
    /// Whether the query has completed or not.
    pub job_complete: bool,
    /// Output only. The first errors or warnings encountered during the running of the job.
    pub errors: Vec<ErrorProto>,
    /// Whether the query result was fetched from the query cache.
    pub cache_hit: bool,
    /// Output only. The number of rows affected by a DML statement.
    #[serde(deserialize_with = "crate::http::from_str_option")]
    pub num_dml_affected_rows: Option<i64>,
    /// Output only. Information of the session if this job is part of one.
    pub session_info: Option<SessionInfo>,
    /// Output only. Detailed statistics for DML statements INSERT, UPDATE, DELETE, MERGE or TRUNCATE.
    pub dml_stats: Option<DmlStats>,
    #[serde(skip)]
    pub http_response: HttpResponse,
}

impl BuildFromHttpResponse for QueryResponse {
    fn build_from_http_response(http_response: HttpResponse) -> Result<Self, Error> {
        let json = parse_json(&http_response)?;
        check_required_keys(&json, &["kind", "jobReference"], "query response")?;
        let mut response: Self = decode(json, "query response")?;
        response.http_response = http_response;
        Ok(response)
    }
}

pub fn build(request: &PostQueryRequest) -> Result<(RestRequest, serde_json::Value), Error> {
    let project_id = required_param(&request.project_id, "project_id")?;
    let body = serde_json::to_value(&request.query_request).map_err(|e| Error::InvalidRequest(e.to_string()))?;
    Ok((RestRequest::new(format!("/projects/{project_id}/queries")), body))
}
