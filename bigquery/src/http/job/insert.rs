use crate::http::error::Error;
use crate::http::job::{Job, JOB_REQUIRED_KEYS};
use crate::http::response::{check_required_keys, decode, parse_json, BuildFromHttpResponse};
use crate::http::rest::{required_param, HttpResponse, RestRequest};

#[derive(Clone, PartialEq, Debug, Default)]
pub struct InsertJobRequest {
    /// Required. Project ID of project that will be billed for the job.
    pub project_id: String,
    /// The job to start. A non empty `job_reference.job_id` lets the service detect duplicates,
    /// which makes the call safe to retry.
    pub job: Job,
}

impl InsertJobRequest {
    pub fn new(project_id: impl Into<String>, job: Job) -> Self {
        Self {
            project_id: project_id.into(),
            job,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct InsertJobResponse {
    pub job: Job,
    pub http_response: HttpResponse,
}

impl BuildFromHttpResponse for InsertJobResponse {
    fn build_from_http_response(http_response: HttpResponse) -> Result<Self, Error> {
        let json = parse_json(&http_response)?;
        check_required_keys(&json, JOB_REQUIRED_KEYS, "job")?;
        Ok(Self {
            job: decode(json, "job")?,
            http_response,
        })
    }
}

pub fn build(request: &InsertJobRequest) -> Result<(RestRequest, serde_json::Value), Error> {
    let project_id = required_param(&request.project_id, "project_id")?;
    let body = serde_json::to_value(&request.job).map_err(|e| Error::InvalidRequest(e.to_string()))?;
    Ok((RestRequest::new(format!("/projects/{project_id}/jobs")), body))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::http::error::Error;
    use crate::http::job::insert::{build, InsertJobRequest, InsertJobResponse};
    use crate::http::job::{Job, JobConfiguration, JobConfigurationQuery, JobReference};
    use crate::http::response::BuildFromHttpResponse;
    use crate::http::rest::HttpResponse;

    fn query_job() -> Job {
        Job {
            job_reference: JobReference {
                project_id: "p".to_string(),
                job_id: "j".to_string(),
                location: Some("US".to_string()),
            },
            configuration: JobConfiguration {
                query: Some(JobConfigurationQuery {
                    query: "SELECT 1".to_string(),
                    use_legacy_sql: Some(false),
                    ..Default::default()
                }),
                job_timeout: Duration::from_secs(30),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_build() {
        let (rest, body) = build(&InsertJobRequest::new("p", query_job())).unwrap();
        assert_eq!(rest.path(), "/projects/p/jobs");
        assert_eq!(body["jobReference"]["jobId"], "j");
        assert_eq!(body["configuration"]["query"]["query"], "SELECT 1");
        assert_eq!(body["configuration"]["query"]["useLegacySql"], false);
        assert_eq!(body["configuration"]["jobTimeoutMs"], 30000);
        assert!(body["statistics"].get("creationTime").is_none());
        assert!(matches!(
            build(&InsertJobRequest::new("", query_job())),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_response() {
        let response = InsertJobResponse::build_from_http_response(HttpResponse {
            status_code: 200,
            payload: r#"{"kind": "bigquery#job", "etag": "e", "id": "p:US.j", "status": {"state": "PENDING"},
                "jobReference": {"projectId": "p", "jobId": "j", "location": "US"},
                "configuration": {"jobType": "QUERY", "query": {"query": "SELECT 1"}}}"#
                .to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(response.job.job_reference.location.as_deref(), Some("US"));
        assert_eq!(response.job.configuration.job_type, "QUERY");
    }
}
