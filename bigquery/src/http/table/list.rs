use std::collections::HashMap;

use crate::http::error::Error;
use crate::http::response::{check_list_elements, check_required_keys, decode, parse_json, BuildFromHttpResponse};
use crate::http::rest::{required_param, HttpResponse, RestRequest};
use crate::http::table::{Clustering, TableReference, TimePartitioning};
use crate::iterator::{Page, PageRequest};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ListTablesRequest {
    /// Required. Project ID of the tables to list.
    pub project_id: String,
    /// Required. Dataset ID of the tables to list.
    pub dataset_id: String,
    /// The maximum number of results to return in a single response page.
    pub max_results: Option<i64>,
    /// Page token, returned by a previous call, to request the next page of results.
    pub page_token: String,
}

impl ListTablesRequest {
    pub fn new(project_id: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            ..Default::default()
        }
    }
}

impl PageRequest for ListTablesRequest {
    fn set_page_token(&mut self, page_token: String) {
        self.page_token = page_token;
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct View {
    /// True if view is defined in legacy SQL dialect, false if in GoogleSQL.
    pub use_legacy_sql: bool,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TableOverview {
    /// The resource type.
    pub kind: String,
    /// An opaque ID of the table.
    pub id: String,
    /// A reference uniquely identifying table.
    pub table_reference: TableReference,
    /// The user-friendly name for this table.
    pub friendly_name: String,
    /// The labels associated with this table.
    pub labels: HashMap<String, String>,
    /// The time-based partitioning for this table.
    pub time_partitioning: Option<TimePartitioning>,
    /// Clustering specification for this table, if configured.
    pub clustering: Option<Clustering>,
    /// The time when this table was created, in milliseconds since the epoch.
    #[serde(with = "crate::http::timestamp_ms", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<time::OffsetDateTime>,
    /// The time when this table expires. If not present, the table will persist indefinitely.
    #[serde(with = "crate::http::timestamp_ms", skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<time::OffsetDateTime>,
    /// The type of table.
    #[serde(rename = "type")]
    pub table_type: String,
    /// Additional details for a view.
    pub view: Option<View>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ListTablesResponse {
    /// The type of list.
    pub kind: String,
    /// A hash of this page of results.
    pub etag: String,
    /// A token to request the next page of results. Empty on the final page.
    pub next_page_token: String,
    /// Tables in the requested dataset.
    pub tables: Vec<TableOverview>,
    /// The total number of tables in the dataset.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub total_items: i64,
    #[serde(skip)]
    pub http_response: HttpResponse,
}

impl BuildFromHttpResponse for ListTablesResponse {
    fn build_from_http_response(http_response: HttpResponse) -> Result<Self, Error> {
        let json = parse_json(&http_response)?;
        check_required_keys(&json, &["kind", "etag"], "table list")?;
        check_list_elements(&json, "tables", &["kind", "id", "tableReference"], "tables")?;
        let mut response: Self = decode(json, "table list")?;
        response.http_response = http_response;
        Ok(response)
    }
}

impl Page for ListTablesResponse {
    type Item = TableOverview;

    fn into_parts(self) -> (Vec<TableOverview>, String) {
        (self.tables, self.next_page_token)
    }
}

pub fn build(request: &ListTablesRequest) -> Result<RestRequest, Error> {
    let project_id = required_param(&request.project_id, "project_id")?;
    let dataset_id = required_param(&request.dataset_id, "dataset_id")?;
    let mut rest = RestRequest::new(format!("/projects/{project_id}/datasets/{dataset_id}/tables"));
    if let Some(max_results) = request.max_results {
        rest.add_query_parameter("maxResults", max_results.to_string());
    }
    if !request.page_token.is_empty() {
        rest.add_query_parameter("pageToken", request.page_token.as_str());
    }
    Ok(rest)
}
