use crate::http::error::Error;
use crate::http::response::{check_required_keys, decode, parse_json, BuildFromHttpResponse};
use crate::http::rest::{required_param, HttpResponse, RestRequest};
use crate::http::table::Table;

/// How much of the table metadata the service returns.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TableMetadataView {
    /// Includes basic table information including schema and partitioning specification.
    Basic,
    /// Includes all information in the BASIC view as well as storage statistics.
    StorageStats,
    /// Includes all table information.
    Full,
}

impl TableMetadataView {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableMetadataView::Basic => "BASIC",
            TableMetadataView::StorageStats => "STORAGE_STATS",
            TableMetadataView::Full => "FULL",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct GetTableRequest {
    /// Required. Project ID of the requested table.
    pub project_id: String,
    /// Required. Dataset ID of the requested table.
    pub dataset_id: String,
    /// Required. Table ID of the requested table.
    pub table_id: String,
    /// List of table schema fields to return. Empty returns all fields.
    pub selected_fields: Vec<String>,
    pub view: Option<TableMetadataView>,
}

impl GetTableRequest {
    pub fn new(project_id: impl Into<String>, dataset_id: impl Into<String>, table_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            table_id: table_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct GetTableResponse {
    pub table: Table,
    pub http_response: HttpResponse,
}

impl BuildFromHttpResponse for GetTableResponse {
    fn build_from_http_response(http_response: HttpResponse) -> Result<Self, Error> {
        let json = parse_json(&http_response)?;
        check_required_keys(&json, &["kind", "etag", "id", "tableReference"], "table")?;
        Ok(Self {
            table: decode(json, "table")?,
            http_response,
        })
    }
}

pub fn build(request: &GetTableRequest) -> Result<RestRequest, Error> {
    let project_id = required_param(&request.project_id, "project_id")?;
    let dataset_id = required_param(&request.dataset_id, "dataset_id")?;
    let table_id = required_param(&request.table_id, "table_id")?;
    let mut rest = RestRequest::new(format!(
        "/projects/{project_id}/datasets/{dataset_id}/tables/{table_id}"
    ));
    if !request.selected_fields.is_empty() {
        rest.add_query_parameter("selectedFields", request.selected_fields.join(","));
    }
    if let Some(view) = request.view {
        rest.add_query_parameter("view", view.as_str());
    }
    Ok(rest)
}

#[cfg(test)]
mod tests {
    use crate::http::error::Error;
    use crate::http::response::BuildFromHttpResponse;
    use crate::http::rest::HttpResponse;
    use crate::http::table::get::{build, GetTableRequest, GetTableResponse, TableMetadataView};

    #[test]
    fn test_build() {
        let mut request = GetTableRequest::new("p", "d", "t");
        let rest = build(&request).unwrap();
        assert_eq!(rest.path(), "/projects/p/datasets/d/tables/t");
        assert!(rest.query().is_empty());

        request.selected_fields = vec!["a".to_string(), "b.c".to_string()];
        request.view = Some(TableMetadataView::StorageStats);
        let rest = build(&request).unwrap();
        assert_eq!(rest.query_parameter("selectedFields"), Some("a,b.c"));
        assert_eq!(rest.query_parameter("view"), Some("STORAGE_STATS"));

        request.table_id.clear();
        assert!(matches!(build(&request), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_response() {
        let response = GetTableResponse::build_from_http_response(HttpResponse {
            status_code: 200,
            payload: r#"{"kind": "bigquery#table", "etag": "e", "id": "p:d.t",
                "tableReference": {"projectId": "p", "datasetId": "d", "tableId": "t"}}"#
                .to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(response.table.table_reference.table_id, "t");

        let result = GetTableResponse::build_from_http_response(HttpResponse {
            status_code: 200,
            payload: r#"{"kind": "bigquery#table", "etag": "e", "id": "p:d.t"}"#.to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::InvalidShape(_))));
    }
}
