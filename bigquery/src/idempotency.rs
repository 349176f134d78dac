use std::fmt::Debug;

use bigquery_minimal_gax::retry::Idempotency;

use crate::http::dataset::get::GetDatasetRequest;
use crate::http::dataset::list::ListDatasetsRequest;
use crate::http::job::cancel::CancelJobRequest;
use crate::http::job::get::GetJobRequest;
use crate::http::job::get_query_results::GetQueryResultsRequest;
use crate::http::job::insert::InsertJobRequest;
use crate::http::job::list::ListJobsRequest;
use crate::http::job::query::PostQueryRequest;
use crate::http::table::get::GetTableRequest;
use crate::http::table::list::ListTablesRequest;

/// Decides per request whether a failed call may be sent again.
///
/// Every method defaults to [`Idempotency::Idempotent`], so an implementation only overrides
/// the calls it wants to treat differently.
pub trait IdempotencyPolicy: Send + Sync + Debug {
    fn get_dataset(&self, _request: &GetDatasetRequest) -> Idempotency {
        Idempotency::Idempotent
    }

    fn list_datasets(&self, _request: &ListDatasetsRequest) -> Idempotency {
        Idempotency::Idempotent
    }

    fn get_table(&self, _request: &GetTableRequest) -> Idempotency {
        Idempotency::Idempotent
    }

    fn list_tables(&self, _request: &ListTablesRequest) -> Idempotency {
        Idempotency::Idempotent
    }

    fn get_job(&self, _request: &GetJobRequest) -> Idempotency {
        Idempotency::Idempotent
    }

    fn list_jobs(&self, _request: &ListJobsRequest) -> Idempotency {
        Idempotency::Idempotent
    }

    fn insert_job(&self, _request: &InsertJobRequest) -> Idempotency {
        Idempotency::Idempotent
    }

    fn cancel_job(&self, _request: &CancelJobRequest) -> Idempotency {
        Idempotency::Idempotent
    }

    fn query(&self, _request: &PostQueryRequest) -> Idempotency {
        Idempotency::Idempotent
    }

    fn get_query_results(&self, _request: &GetQueryResultsRequest) -> Idempotency {
        Idempotency::Idempotent
    }
}

/// Reads are always retried. Job creation and queries are retried only when the caller supplied
/// a token the service uses to detect duplicates: the job id for `InsertJob` and the request id
/// for `Query`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultIdempotencyPolicy;

impl IdempotencyPolicy for DefaultIdempotencyPolicy {
    fn insert_job(&self, request: &InsertJobRequest) -> Idempotency {
        if request.job.job_reference.job_id.is_empty() {
            Idempotency::NonIdempotent
        } else {
            Idempotency::Idempotent
        }
    }

    fn query(&self, request: &PostQueryRequest) -> Idempotency {
        match request.query_request.request_id.as_deref() {
            Some(id) if !id.is_empty() => Idempotency::Idempotent,
            _ => Idempotency::NonIdempotent,
        }
    }
}

/// Treats every call as safe to retry.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysRetryPolicy;

impl IdempotencyPolicy for AlwaysRetryPolicy {}
