use std::time::Duration;

use crate::http::error::Error;
use crate::http::job::{JobReference, Tuple};
use crate::http::response::{check_required_keys, decode, parse_json, BuildFromHttpResponse};
use crate::http::rest::{required_param, HttpResponse, RestRequest};
use crate::http::table::TableSchema;
use crate::http::types::ErrorProto;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct GetQueryResultsRequest {
    /// Required. Project ID of the query job.
    pub project_id: String,
    /// Required. Job ID of the query job.
    pub job_id: String,
    /// Page token, returned by a previous call, to request the next page of results.
    pub page_token: String,
    /// Zero-based index of the starting row.
    pub start_index: Option<u64>,
    /// Maximum number of results to read.
    pub max_results: Option<i64>,
    /// How long to wait for the query to complete. `job_complete` is false in the response when
    /// the query is still running after this.
    pub timeout: Option<Duration>,
    /// The geographic location of the job. Required for jobs outside the US and EU multi-regions.
    pub location: String,
}

impl GetQueryResultsRequest {
    pub fn new(project_id: impl Into<String>, job_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            job_id: job_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct GetQueryResultsResponse {
    /// The resource type.
    pub kind: String,
    /// A hash of this response.
    pub etag: String,
    /// The schema of the results. Present only when the query completes successfully.
    pub schema: Option<TableSchema>,
    /// Reference to the Job that was created to run the query.
    pub job_reference: JobReference,
    /// The total number of rows in the complete query result set.
    #[serde(deserialize_with = "crate::http::from_str_option")]
    pub total_rows: Option<u64>,
    /// A token used for paging results. Empty when there are no more results.
    pub page_token: String,
    /// As many rows as fit in the maximum permitted reply size.
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
    #[serde(skip)]
    pub http_response: HttpResponse,
}

impl BuildFromHttpResponse for GetQueryResultsResponse {
    fn build_from_http_response(http_response: HttpResponse) -> Result<Self, Error> {
        let json = parse_json(&http_response)?;
        check_required_keys(&json, &["kind", "etag", "jobReference"], "query results")?;
        let mut response: Self = decode(json, "query results")?;
        response.http_response = http_response;
        Ok(response)
    }
}

pub fn build(request: &GetQueryResultsRequest) -> Result<RestRequest, Error> {
    let project_id = required_param(&request.project_id, "project_id")?;
    let job_id = required_param(&request.job_id, "job_id")?;
    let mut rest = RestRequest::new(format!("/projects/{project_id}/queries/{job_id}"));
    if !request.page_token.is_empty() {
        rest.add_query_parameter("pageToken", request.page_token.as_str());
    }
    if let Some(start_index) = request.start_index {
        rest.add_query_parameter("startIndex", start_index.to_string());
    }
    if let Some(max_results) = request.max_results {
        rest.add_query_parameter("maxResults", max_results.to_string());
    }
    if let Some(timeout) = request.timeout {
        rest.add_query_parameter("timeoutMs", timeout.as_millis().to_string());
    }
    if !request.location.is_empty() {
        rest.add_query_parameter("location", request.location.as_str());
    }
    Ok(rest)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::http::error::Error;
    use crate::http::job::get_query_results::{build, GetQueryResultsRequest, GetQueryResultsResponse};
    use crate::http::response::BuildFromHttpResponse;
    use crate::http::rest::HttpResponse;

    #[test]
    fn test_build() {
        let request = GetQueryResultsRequest {
            page_token: "t".to_string(),
            start_index: Some(10),
            max_results: Some(500),
            timeout: Some(Duration::from_millis(1500)),
            location: "US".to_string(),
            ..GetQueryResultsRequest::new("p", "j")
        };
        let rest = build(&request).unwrap();
        assert_eq!(rest.path(), "/projects/p/queries/j");
        assert_eq!(rest.query_parameter("pageToken"), Some("t"));
        assert_eq!(rest.query_parameter("startIndex"), Some("10"));
        assert_eq!(rest.query_parameter("maxResults"), Some("500"));
        assert_eq!(rest.query_parameter("timeoutMs"), Some("1500"));
        assert_eq!(rest.query_parameter("location"), Some("US"));
        assert!(matches!(
            build(&GetQueryResultsRequest::new("p", "")),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_response() {
        let response = GetQueryResultsResponse::build_from_http_response(HttpResponse {
            status_code: 200,
            payload: r#"{"kind": "bigquery#getQueryResultsResponse", "etag": "e",
                "jobReference": {"projectId": "p", "jobId": "j"}, "totalRows": 2, "pageToken": "next",
                "rows": [{"f": [{"v": "a"}]}, {"f": [{"v": "b"}]}], "jobComplete": true}"#
                .to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(response.total_rows, Some(2));
        assert_eq!(response.rows.len(), 2);
        assert_eq!(response.page_token, "next");

        let result = GetQueryResultsResponse::build_from_http_response(HttpResponse {
            status_code: 200,
            payload: r#"{"kind": "bigquery#getQueryResultsResponse", "jobReference": {}}"#.to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::InvalidShape(_))));
    }
}
