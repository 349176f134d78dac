use time::OffsetDateTime;

use crate::http::error::Error;
use crate::http::job::{JobConfiguration, JobReference, JobState, JobStatistics, JobStatus};
use crate::http::response::{check_list_elements, check_required_keys, decode, parse_json, BuildFromHttpResponse};
use crate::http::rest::{required_param, HttpResponse, RestRequest};
use crate::http::types::ErrorProto;
use crate::iterator::{Page, PageRequest};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Projection {
    /// Does not include the job configuration.
    #[default]
    Minimal,
    /// Includes all job data.
    Full,
}

impl Projection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Projection::Minimal => "minimal",
            Projection::Full => "full",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ListJobsRequest {
    /// Required. Project ID of the jobs to list.
    pub project_id: String,
    /// Whether to display jobs owned by all users in the project.
    pub all_users: bool,
    /// The maximum number of results to return in a single response page.
    pub max_results: Option<i64>,
    /// If set, only jobs created after or at this timestamp are returned.
    pub min_creation_time: Option<OffsetDateTime>,
    /// If set, only jobs created before or at this timestamp are returned.
    pub max_creation_time: Option<OffsetDateTime>,
    /// Page token, returned by a previous call, to request the next page of results.
    pub page_token: String,
    /// Restrict information returned to a set of selected fields.
    pub projection: Option<Projection>,
    /// Filter for job state.
    pub state_filter: Vec<JobState>,
    /// If set, show only child jobs of the specified parent. Otherwise, show all top-level jobs.
    pub parent_job_id: String,
}

impl ListJobsRequest {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

impl PageRequest for ListJobsRequest {
    fn set_page_token(&mut self, page_token: String) {
        self.page_token = page_token;
    }
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct JobOverview {
    /// Unique opaque ID of the job.
    pub id: String,
    /// The resource type.
    pub kind: String,
    /// Unique opaque ID of the job.
    pub job_reference: JobReference,
    /// Running state of the job. When the state is DONE,
    /// errorResult can be checked to determine whether the job succeeded or failed.
    pub state: JobState,
    /// A result object that will be present only if the job has failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_result: Option<ErrorProto>,
    /// Output only. Information about the job, including starting time and ending time of the job.
    pub statistics: JobStatistics,
    /// Required. Describes the job configuration.
    pub configuration: JobConfiguration,
    /// [Full-projection-only] Describes the status of this job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    /// [Full-projection-only] Email address of the user who ran the job.
    pub user_email: String,
    /// [Full-projection-only] String representation of identity of requesting party.
    pub principal_subject: String,
}

#[derive(Clone, PartialEq, serde::Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ListJobsResponse {
    /// A hash of this page of results.
    pub etag: String,
    /// The resource type of the response.
    pub kind: String,
    /// A token to request the next page of results. Empty on the final page.
    pub next_page_token: String,
    /// List of jobs that were requested.
    pub jobs: Vec<JobOverview>,
    /// A list of skipped locations that were unreachable.
    pub unreachable: Vec<String>,
    #[serde(skip)]
    pub http_response: HttpResponse,
}

impl BuildFromHttpResponse for ListJobsResponse {
    fn build_from_http_response(http_response: HttpResponse) -> Result<Self, Error> {
        let json = parse_json(&http_response)?;
        check_required_keys(&json, &["kind", "etag"], "job list")?;
        check_list_elements(&json, "jobs", &["kind", "id", "jobReference", "state"], "jobs")?;
        let mut response: Self = decode(json, "job list")?;
        response.http_response = http_response;
        Ok(response)
    }
}

impl Page for ListJobsResponse {
    type Item = JobOverview;

    fn into_parts(self) -> (Vec<JobOverview>, String) {
        (self.jobs, self.next_page_token)
    }
}

fn epoch_millis(value: &OffsetDateTime) -> String {
    (value.unix_timestamp_nanos() / 1_000_000).to_string()
}

pub fn build(request: &ListJobsRequest) -> Result<RestRequest, Error> {
    let project_id = required_param(&request.project_id, "project_id")?;
    let mut rest = RestRequest::new(format!("/projects/{project_id}/jobs"));
    if request.all_users {
        rest.add_query_parameter("allUsers", "true");
    }
    if let Some(max_results) = request.max_results {
        rest.add_query_parameter("maxResults", max_results.to_string());
    }
    if let Some(min) = &request.min_creation_time {
        rest.add_query_parameter("minCreationTime", epoch_millis(min));
    }
    if let Some(max) = &request.max_creation_time {
        rest.add_query_parameter("maxCreationTime", epoch_millis(max));
    }
    if !request.page_token.is_empty() {
        rest.add_query_parameter("pageToken", request.page_token.as_str());
    }
    if let Some(projection) = request.projection {
        rest.add_query_parameter("projection", projection.as_str());
    }
    for state in &request.state_filter {
        rest.add_query_parameter("stateFilter", state.as_str());
    }
    if !request.parent_job_id.is_empty() {
        rest.add_query_parameter("parentJobId", request.parent_job_id.as_str());
    }
    Ok(rest)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::http::error::Error;
    use crate::http::job::list::{build, ListJobsRequest, ListJobsResponse, Projection};
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
        let request = ListJobsRequest {
            all_users: true,
            max_results: Some(100),
            min_creation_time: Some(datetime!(2023-04-14 11:49:04.123 UTC)),
            projection: Some(Projection::Full),
            state_filter: vec![JobState::Running, JobState::Done],
            parent_job_id: "parent".to_string(),
            ..ListJobsRequest::new("p")
        };
        let rest = build(&request).unwrap();
        assert_eq!(rest.path(), "/projects/p/jobs");
        assert_eq!(
            rest.query(),
            &[
                ("allUsers".to_string(), "true".to_string()),
                ("maxResults".to_string(), "100".to_string()),
                ("minCreationTime".to_string(), "1681472944123".to_string()),
                ("projection".to_string(), "full".to_string()),
                ("stateFilter".to_string(), "running".to_string()),
                ("stateFilter".to_string(), "done".to_string()),
                ("parentJobId".to_string(), "parent".to_string()),
            ]
        );
        assert!(matches!(build(&ListJobsRequest::default()), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_response() {
        let response = ListJobsResponse::build_from_http_response(ok(r#"{
            "kind": "bigquery#jobList", "etag": "e", "nextPageToken": "n",
            "jobs": [{"kind": "bigquery#job", "id": "p:j", "jobReference": {"projectId": "p", "jobId": "j"},
                      "state": "DONE", "errorResult": {"reason": "invalidQuery", "message": "bad"}}]
        }"#))
        .unwrap();
        assert_eq!(response.next_page_token, "n");
        assert_eq!(response.jobs[0].state, JobState::Done);
        assert_eq!(response.jobs[0].error_result.as_ref().unwrap().reason, "invalidQuery");

        let result = ListJobsResponse::build_from_http_response(ok(r#"{
            "kind": "bigquery#jobList", "etag": "e",
            "jobs": [{"kind": "bigquery#job", "id": "p:j", "jobReference": {"jobId": "j"}}]
        }"#));
        assert!(matches!(result, Err(Error::InvalidShape(_))));
    }
}
