use std::collections::HashMap;

use crate::http::dataset::DatasetReference;
use crate::http::error::Error;
use crate::http::response::{check_list_elements, check_required_keys, decode, parse_json, BuildFromHttpResponse};
use crate::http::rest::{required_param, HttpResponse, RestRequest};
use crate::iterator::{Page, PageRequest};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ListDatasetsRequest {
    /// Required. Project ID of the datasets to be listed.
    pub project_id: String,
    /// Whether to list all datasets, including hidden ones.
    pub all: bool,
    /// The maximum number of results to return in a single response page.
    pub max_results: Option<i32>,
    /// Page token, returned by a previous call, to request the next page of results.
    pub page_token: String,
    /// An expression for filtering the results of the request by label.
    /// The syntax is "labels.<name>[:<value>]".
    pub filter: String,
}

impl ListDatasetsRequest {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

impl PageRequest for ListDatasetsRequest {
    fn set_page_token(&mut self, page_token: String) {
        self.page_token = page_token;
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct DatasetOverview {
    /// The resource type. This property always returns the value "bigquery#dataset"
    pub kind: String,
    /// The fully-qualified, unique, opaque ID of the dataset.
    pub id: String,
    /// The dataset reference.
    pub dataset_reference: DatasetReference,
    /// The labels associated with this dataset.
    pub labels: HashMap<String, String>,
    /// An alternate name for the dataset.
    pub friendly_name: String,
    /// The geographic location where the dataset resides.
    pub location: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ListDatasetsResponse {
    /// Output only. The resource type. This property always returns the value "bigquery#datasetList"
    pub kind: String,
    /// Output only. A hash value of the results page.
    pub etag: String,
    /// A token that can be used to request the next results page. Empty on the final page.
    pub next_page_token: String,
    /// The datasets of this page. Omitted by the service when there are none.
    pub datasets: Vec<DatasetOverview>,
    #[serde(skip)]
    pub http_response: HttpResponse,
}

impl BuildFromHttpResponse for ListDatasetsResponse {
    fn build_from_http_response(http_response: HttpResponse) -> Result<Self, Error> {
        let json = parse_json(&http_response)?;
        check_required_keys(&json, &["kind", "etag"], "dataset list")?;
        check_list_elements(&json, "datasets", &["kind", "id", "datasetReference"], "datasets")?;
        let mut response: Self = decode(json, "dataset list")?;
        response.http_response = http_response;
        Ok(response)
    }
}

impl Page for ListDatasetsResponse {
    type Item = DatasetOverview;

    fn into_parts(self) -> (Vec<DatasetOverview>, String) {
        (self.datasets, self.next_page_token)
    }
}

pub fn build(request: &ListDatasetsRequest) -> Result<RestRequest, Error> {
    let project_id = required_param(&request.project_id, "project_id")?;
    let mut rest = RestRequest::new(format!("/projects/{}/datasets", project_id));
    if request.all {
        rest.add_query_parameter("all", "true");
    }
    if let Some(max_results) = request.max_results {
        rest.add_query_parameter("maxResults", max_results.to_string());
    }
    if !request.page_token.is_empty() {
        rest.add_query_parameter("pageToken", request.page_token.as_str());
    }
    if !request.filter.is_empty() {
        rest.add_query_parameter("filter", request.filter.as_str());
    }
    Ok(rest)
}
