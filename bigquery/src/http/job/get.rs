use crate::http::error::Error;
use crate::http::job::{Job, JOB_REQUIRED_KEYS};
use crate::http::response::{check_required_keys, decode, parse_json, BuildFromHttpResponse};
use crate::http::rest::{required_param, HttpResponse, RestRequest};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct GetJobRequest {
    /// Required. Project ID of the requested job.
    pub project_id: String,
    /// Required. Job ID of the requested job.
    pub job_id: String,
    /// The geographic location of the job. Required for jobs outside the US and EU multi-regions.
    pub location: String,
}

impl GetJobRequest {
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

#[derive(Clone, PartialEq, Debug, Default)]
pub struct GetJobResponse {
    pub job: Job,
    pub http_response: HttpResponse,
}

impl BuildFromHttpResponse for GetJobResponse {
    fn build_from_http_response(http_response: HttpResponse) -> Result<Self, Error> {
        let json = parse_json(&http_response)?;
        check_required_keys(&json, JOB_REQUIRED_KEYS, "job")?;
        Ok(Self {
            job: decode(json, "job")?,
            http_response,
        })
    }
}

pub fn build(request: &GetJobRequest) -> Result<RestRequest, Error> {
    let project_id = required_param(&request.project_id, "project_id")?;
    let job_id = required_param(&request.job_id, "job_id")?;
    let mut rest = RestRequest::new(format!("/projects/{project_id}/jobs/{job_id}"));
    if !request.location.is_empty() {
        rest.add_query_parameter("location", request.location.as_str());
    }
    Ok(rest)
}
