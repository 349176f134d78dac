use crate::http::dataset::Dataset;
use crate::http::error::Error;
use crate::http::response::{check_required_keys, decode, parse_json, BuildFromHttpResponse};
use crate::http::rest::{required_param, HttpResponse, RestRequest};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct GetDatasetRequest {
    /// Required. Project ID of the requested dataset.
    pub project_id: String,
    /// Required. Dataset ID of the requested dataset.
    pub dataset_id: String,
}

impl GetDatasetRequest {
    pub fn new(project_id: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct GetDatasetResponse {
    pub dataset: Dataset,
    pub http_response: HttpResponse,
}

impl BuildFromHttpResponse for GetDatasetResponse {
    fn build_from_http_response(http_response: HttpResponse) -> Result<Self, Error> {
        let json = parse_json(&http_response)?;
        check_required_keys(&json, &["kind", "etag", "id", "datasetReference"], "dataset")?;
        Ok(Self {
            dataset: decode(json, "dataset")?,
            http_response,
        })
    }
}

pub fn build(request: &GetDatasetRequest) -> Result<RestRequest, Error> {
    let project_id = required_param(&request.project_id, "project_id")?;
    let dataset_id = required_param(&request.dataset_id, "dataset_id")?;
    Ok(RestRequest::new(format!("/projects/{}/datasets/{}", project_id, dataset_id)))
}

#[cfg(test)]
mod tests {
    use crate::http::dataset::get::{build, GetDatasetRequest, GetDatasetResponse};
    use crate::http::error::Error;
    use crate::http::response::BuildFromHttpResponse;
    use crate::http::rest::HttpResponse;

    #[test]
    fn test_build() {
        let request = build(&GetDatasetRequest::new("p", "d")).unwrap();
        assert_eq!(request.path(), "/projects/p/datasets/d");
        assert!(request.query().is_empty());
        assert!(matches!(
            build(&GetDatasetRequest::new("", "d")),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_response() {
        let http_response = HttpResponse {
            status_code: 200,
            payload: r#"{"kind": "bigquery#dataset", "etag": "e", "id": "p:d",
                "datasetReference": {"projectId": "p", "datasetId": "d"}}"#
                .to_string(),
            ..Default::default()
        };
        let response = GetDatasetResponse::build_from_http_response(http_response.clone()).unwrap();
        assert_eq!(response.dataset.id, "p:d");
        assert_eq!(response.dataset.friendly_name, "");
        assert_eq!(response.http_response, http_response);

        let missing = HttpResponse {
            status_code: 200,
            payload: r#"{"kind": "bigquery#dataset", "etag": "e", "id": "p:d"}"#.to_string(),
            ..Default::default()
        };
        assert!(matches!(
            GetDatasetResponse::build_from_http_response(missing),
            Err(Error::InvalidShape(_))
        ));
    }
}
