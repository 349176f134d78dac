use crate::http::error::Error;
use crate::http::job::{Job, JOB_REQUIRED_KEYS};
use crate::http::response::{check_required_keys, decode, parse_json, BuildFromHttpResponse};
use crate::http::rest::{required_param, HttpResponse, RestRequest};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CancelJobRequest {
    /// Required. Project ID of the job to cancel.
    pub project_id: String,
    /// Required. Job ID of the job to cancel.
    pub job_id: String,
    /// The geographic location of the job. Required for jobs outside the US and EU multi-regions.
    pub location: String,
}

impl CancelJobRequest {
    pub fn new(project_id: impl Into<String>, job_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            job_id: job_id.into(),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

#[derive(Clone, PartialEq, serde::Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CancelJobResponse {
    /// The resource type of the response.
    pub kind: String,
    /// The final state of the job.
    pub job: Job,
    #[serde(skip)]
    pub http_response: HttpResponse,
}

impl BuildFromHttpResponse for CancelJobResponse {
    fn build_from_http_response(http_response: HttpResponse) -> Result<Self, Error> {
        let json = parse_json(&http_response)?;
        check_required_keys(&json, &["kind", "job"], "cancel job response")?;
        check_required_keys(&json["job"], JOB_REQUIRED_KEYS, "cancel job response.job")?;
        let mut response: Self = decode(json, "cancel job response")?;
        response.http_response = http_response;
        Ok(response)
    }
}

/// The cancel call carries no body.
pub fn build(request: &CancelJobRequest) -> Result<RestRequest, Error> {
    let project_id = required_param(&request.project_id, "project_id")?;
    let job_id = required_param(&request.job_id, "job_id")?;
    let mut rest = RestRequest::new(format!("/projects/{project_id}/jobs/{job_id}/cancel"));
    if !request.location.is_empty() {
        rest.add_query_parameter("location", request.location.as_str());
    }
    Ok(rest)
}

#[cfg(test)]
mod tests {
    use crate::http::error::Error;
    use crate::http::job::cancel::{build, CancelJobRequest, CancelJobResponse};
    use crate::http::job::JobState;
    use crate::http::response::BuildFromHttpResponse;
    use crate::http::rest::HttpResponse;

    fn ok(payload: &str) -> HttpResponse {
        HttpResponse {
            status_code: 200,
            payload: payload.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build() {
        let rest = build(&CancelJobRequest::new("p", "j").with_location("EU")).unwrap();
        assert_eq!(rest.path(), "/projects/p/jobs/j/cancel");
        assert_eq!(rest.query_parameter("location"), Some("EU"));
        assert!(matches!(build(&CancelJobRequest::new("", "j")), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_response() {
        let response = CancelJobResponse::build_from_http_response(ok(r#"{"kind": "bigquery#jobCancelResponse",
            "job": {"kind": "bigquery#job", "etag": "e", "id": "p:j", "status": {"state": "DONE"},
                    "jobReference": {"projectId": "p", "jobId": "j"}, "configuration": {}}}"#))
        .unwrap();
        assert_eq!(response.kind, "bigquery#jobCancelResponse");
        assert_eq!(response.job.status.state, JobState::Done);

        let result = CancelJobResponse::build_from_http_response(ok(r#"{"kind": "bigquery#jobCancelResponse",
            "job": {"kind": "bigquery#job", "id": "p:j"}}"#));
        assert!(matches!(result, Err(Error::InvalidShape(_))));

        let result = CancelJobResponse::build_from_http_response(ok(r#"{"kind": "bigquery#jobCancelResponse"}"#));
        assert!(matches!(result, Err(Error::InvalidShape(_))));
    }
}
