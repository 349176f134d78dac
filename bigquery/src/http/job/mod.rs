use std::collections::HashMap;
use std::time::Duration;

use time::OffsetDateTime;

use crate::http::dataset::DatasetReference;
use crate::http::table::{Clustering, TableReference, TableSchema, TimePartitioning};
use crate::http::types::{ConnectionProperty, EncryptionConfiguration, ErrorProto, QueryParameter, RoutineReference};
use crate::http::value::Struct;

pub mod cancel;
pub mod get;
pub mod get_query_results;
pub mod insert;
pub mod list;
pub mod query;

pub(crate) const JOB_REQUIRED_KEYS: &[&str] = &["kind", "etag", "id", "status", "jobReference", "configuration"];

#[derive(Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    #[default]
    Pending,
    Running,
    Done,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Pending => "pending",
            JobState::Running => "running",
            JobState::Done => "done",
        }
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreateDisposition {
    /// If the table does not exist, BigQuery creates the table.
    #[default]
    CreateIfNeeded,
    /// The table must already exist. If it does not, a 'notFound' error is returned in the job result.
    CreateNever,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WriteDisposition {
    /// If the table already exists, BigQuery overwrites the table data and uses the schema from the query result.
    WriteTruncate,
    /// If the table already exists, BigQuery appends the data to the table.
    WriteAppend,
    /// If the table already exists and contains data, a 'duplicate' error is returned in the job result.
    #[default]
    WriteEmpty,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    #[default]
    Interactive,
    Batch,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ScriptOptions {
    /// Timeout period for each statement in a script.
    #[serde(rename = "statementTimeoutMs", with = "crate::http::duration_ms")]
    pub statement_timeout: Duration,
    /// Limit on the number of bytes billed per statement. Exceeding this budget results in an error.
    #[serde(deserialize_with = "crate::http::from_str_option", skip_serializing_if = "Option::is_none")]
    pub statement_byte_budget: Option<i64>,
    /// `LAST` or `FIRST_SELECT`. Default is LAST.
    pub key_result_statement: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct JobConfigurationQuery {
    /// Required. SQL query text to execute.
    pub query: String,
    /// Optional. Describes the table where the query results should be stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_table: Option<TableReference>,
    /// Optional. Specifies whether the job is allowed to create new tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_disposition: Option<CreateDisposition>,
    /// Optional. Specifies the action that occurs if the destination table already exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_disposition: Option<WriteDisposition>,
    /// Optional. Specifies the default dataset to use for unqualified table names in the query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_dataset: Option<DatasetReference>,
    /// Optional. Specifies a priority for the query. The default value is INTERACTIVE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Optional. Whether to look for the result in the query cache. The default value is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_query_cache: Option<bool>,
    /// Optional. Specifies whether to use BigQuery's legacy SQL dialect for this query.
    /// The service defaults to true when this is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_legacy_sql: Option<bool>,
    /// GoogleSQL only. `POSITIONAL` or `NAMED`.
    pub parameter_mode: String,
    /// Query parameters for GoogleSQL queries.
    pub query_parameters: Vec<QueryParameter>,
    /// Limits the bytes billed for this job.
    #[serde(deserialize_with = "crate::http::from_str_option", skip_serializing_if = "Option::is_none")]
    pub maximum_bytes_billed: Option<i64>,
    /// Time-based partitioning specification for the destination table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_partitioning: Option<TimePartitioning>,
    /// Clustering specification for the destination table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clustering: Option<Clustering>,
    /// Custom encryption configuration (e.g., Cloud KMS keys)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_encryption_configuration: Option<EncryptionConfiguration>,
    /// Options controlling the execution of scripts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_options: Option<ScriptOptions>,
    /// Connection properties which can modify the query behavior.
    pub connection_properties: Vec<ConnectionProperty>,
    /// If true, the job creates a new session using a randomly generated sessionId.
    pub create_session: bool,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct JobConfiguration {
    /// Output only. The type of the job. Can be QUERY, LOAD, EXTRACT, COPY or UNKNOWN.
    pub job_type: String,
    /// Configures a query job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<JobConfigurationQuery>,
    /// Optional. If set, don't actually run this job.
    pub dry_run: bool,
    /// Optional. If this time limit is exceeded, BigQuery might attempt to stop the job.
    #[serde(
        rename = "jobTimeoutMs",
        with = "crate::http::duration_ms",
        skip_serializing_if = "Duration::is_zero"
    )]
    pub job_timeout: Duration,
    /// The labels associated with this job.
    pub labels: HashMap<String, String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct JobReference {
    /// Required. The ID of the project containing this job.
    pub project_id: String,
    /// Required. The ID of the job. The ID must contain only letters (a-z, A-Z), numbers (0-9),
    /// underscores (_), or dashes (-). The maximum length is 1,024 characters.
    pub job_id: String,
    /// Optional. The geographic location of the job. The default value is US.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct JobStatus {
    /// Output only. Final error result of the job. If present, indicates that the job has completed and was unsuccessful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_result: Option<ErrorProto>,
    /// Output only. The first errors encountered during the running of the job.
    pub errors: Vec<ErrorProto>,
    /// Output only. Running state of the job. Valid states include 'PENDING', 'RUNNING', and 'DONE'.
    pub state: JobState,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct DmlStats {
    /// Output only. Number of inserted Rows. Populated by DML INSERT and MERGE statements
    #[serde(deserialize_with = "crate::http::from_str")]
    pub inserted_row_count: i64,
    /// Output only. Number of deleted Rows. populated by DML DELETE, MERGE and TRUNCATE statements.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub deleted_row_count: i64,
    /// Output only. Number of updated Rows. Populated by DML UPDATE and MERGE statements.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub updated_row_count: i64,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionInfo {
    /// Output only. The id of the session.
    pub session_id: String,
}

/// Query optimization information for a query job.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryInfo {
    /// Output only. Information about query optimizations.
    pub optimization_details: Struct,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct JobStatisticsQuery {
    /// Output only. The original estimate of bytes processed for the job.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub estimated_bytes_processed: i64,
    /// Output only. Total number of partitions processed from all partitioned tables referenced in the job.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub total_partitions_processed: i64,
    /// Output only. Total bytes processed for the job.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub total_bytes_processed: i64,
    /// Output only. For dry-run jobs, the accuracy of `total_bytes_processed`.
    pub total_bytes_processed_accuracy: String,
    /// Output only. If the project is configured to use on-demand pricing,
    /// then this field contains the total bytes billed for the job.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub total_bytes_billed: i64,
    /// Output only. Billing tier for the job.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub billing_tier: i32,
    /// Output only. Slot-milliseconds for the job.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub total_slot_ms: i64,
    /// Output only. Whether the query result was fetched from the query cache.
    pub cache_hit: bool,
    /// Output only. Referenced tables for the job. Queries that reference more than 50 tables will not have a complete list.
    pub referenced_tables: Vec<TableReference>,
    /// Output only. The schema of the results. Present only for successful dry run of non-legacy SQL queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<TableSchema>,
    /// Output only. The number of rows affected by a DML statement.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub num_dml_affected_rows: i64,
    /// Output only. Detailed statistics for DML statements INSERT, UPDATE, DELETE, MERGE or TRUNCATE
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dml_stats: Option<DmlStats>,
    /// Output only. GoogleSQL only: list of undeclared query parameters detected during a dry run validation
    pub undeclared_query_parameters: Vec<QueryParameter>,
    /// Output only. The type of query statement, if valid, e.g. `SELECT` or `CREATE_TABLE_AS_SELECT`.
    pub statement_type: String,
    /// Output only. The DDL operation performed, possibly dependent on the pre-existence of the DDL target.
    pub ddl_operation_performed: String,
    /// Output only. The DDL target table. Present only for CREATE/DROP TABLE/VIEW and DROP ALL ROW ACCESS POLICIES queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ddl_target_table: Option<TableReference>,
    /// Output only. The DDL target routine. Present only for CREATE/DROP FUNCTION/PROCEDURE queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ddl_target_routine: Option<RoutineReference>,
    /// Output only. Query optimization information for a QUERY job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_info: Option<QueryInfo>,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct JobStatistics {
    /// Output only. Creation time of this job. This field will be present on all jobs.
    #[serde(with = "crate::http::timestamp_ms", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<OffsetDateTime>,
    /// Output only. Start time of this job.
    /// This field will be present when the job transitions from the PENDING state to either RUNNING or DONE.
    #[serde(with = "crate::http::timestamp_ms", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<OffsetDateTime>,
    /// Output only. End time of this job. This field will be present whenever a job is in the DONE state.
    #[serde(with = "crate::http::timestamp_ms", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<OffsetDateTime>,
    /// Output only. Total bytes processed for the job.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub total_bytes_processed: i64,
    /// Output only. Job progress (0.0 -> 1.0) for LOAD and EXTRACT jobs.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub completion_ratio: f64,
    /// Output only. Quotas which delayed this job's start time.
    pub quota_deferments: Vec<String>,
    /// Output only. Statistics for a query job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<JobStatisticsQuery>,
    /// Output only. Slot-milliseconds for the job.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub total_slot_ms: i64,
    /// Output only. Name of the primary reservation assigned to this job.
    pub reservation_id: String,
    /// Output only. Number of child jobs executed.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub num_child_jobs: i64,
    /// Output only. If this is a child job, specifies the job ID of the parent.
    pub parent_job_id: String,
    /// Output only. Information of the session if this job is part of one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_info: Option<SessionInfo>,
    /// Output only. The duration of the execution of the final attempt of this job,
    /// as BigQuery may internally re-attempt to execute the job.
    #[serde(rename = "finalExecutionDurationMs", with = "crate::http::duration_ms")]
    pub final_execution_duration: Duration,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Job {
    /// Output only. The resource type.
    pub kind: String,
    /// Output only. A hash of the resource.
    pub etag: String,
    /// Output only. Opaque ID field of the job.
    pub id: String,
    /// Output only. A URL that can be used to access the resource again.
    pub self_link: String,
    /// Output only. Email address of the user who ran the job.
    pub user_email: String,
    /// Required. Describes the job configuration.
    pub configuration: JobConfiguration,
    /// Optional. Reference describing the unique-per-user name of the job.
    pub job_reference: JobReference,
    /// Output only. Information about the job, including starting time and ending time of the job.
    pub statistics: JobStatistics,
    /// Output only. The status of this job. Examine this value when polling an asynchronous job to see if the job is complete.
    pub status: JobStatus,
    /// Output only. String representation of identity of requesting party.
    pub principal_subject: String,
}

/// One cell of a result row. Repeated columns hold an array of cells and `RECORD` columns a nested row.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    String(String),
    Array(Vec<Cell>),
    Struct(Tuple),
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default)]
pub struct Cell {
    pub v: CellValue,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default)]
pub struct Tuple {
    pub f: Vec<Cell>,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use time::macros::datetime;

    use crate::http::job::{CellValue, Job, JobConfiguration, JobState, JobStatisticsQuery, Tuple};
    use crate::http::value::ValueKind;

    #[test]
    fn test_sparse_job() {
        let job: Job = serde_json::from_value(json!({
            "kind": "bigquery#job",
            "etag": "e",
            "id": "p:US.j",
            "jobReference": {"projectId": "p", "jobId": "j", "location": "US"},
            "status": {"state": "DONE"},
            "configuration": {"jobType": "QUERY", "query": {"query": "SELECT 1"}, "jobTimeoutMs": "60000"},
            "statistics": {
                "creationTime": "1681472944123",
                "startTime": 1681472944200_i64,
                "totalBytesProcessed": "1024",
                "finalExecutionDurationMs": "15",
                "query": {"totalBytesBilled": "10485760", "cacheHit": true, "billingTier": 1,
                          "dmlStats": {"insertedRowCount": "3"}}
            }
        }))
        .unwrap();
        assert_eq!(job.status.state, JobState::Done);
        assert!(job.status.error_result.is_none());
        assert_eq!(job.configuration.job_timeout, Duration::from_secs(60));
        assert_eq!(job.configuration.query.as_ref().unwrap().use_legacy_sql, None);
        assert_eq!(
            job.statistics.creation_time,
            Some(datetime!(2023-04-14 11:49:04.123 UTC))
        );
        assert!(job.statistics.end_time.is_none());
        assert_eq!(job.statistics.total_bytes_processed, 1024);
        assert_eq!(job.statistics.final_execution_duration, Duration::from_millis(15));
        let query = job.statistics.query.unwrap();
        assert_eq!(query.total_bytes_billed, 10485760);
        assert!(query.cache_hit);
        assert_eq!(query.dml_stats.unwrap().inserted_row_count, 3);
        assert_eq!(job.user_email, "");
    }

    #[test]
    fn test_configuration_serialization() {
        let config = JobConfiguration {
            job_type: "QUERY".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("jobTimeoutMs").is_none());
        assert!(json.get("query").is_none());

        let config = JobConfiguration {
            job_timeout: Duration::from_millis(2500),
            ..config
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["jobTimeoutMs"], json!(2500));
    }

    #[test]
    fn test_rows() {
        let row: Tuple = serde_json::from_value(json!({
            "f": [
                {"v": "1"},
                {"v": null},
                {"v": [{"v": "a"}, {"v": "b"}]},
                {"v": {"f": [{"v": "nested"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(row.f[0].v, CellValue::String("1".to_string()));
        assert_eq!(row.f[1].v, CellValue::Null);
        match &row.f[2].v {
            CellValue::Array(cells) => assert_eq!(cells.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
        match &row.f[3].v {
            CellValue::Struct(tuple) => assert_eq!(tuple.f[0].v, CellValue::String("nested".to_string())),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_query_info() {
        let query: JobStatisticsQuery = serde_json::from_value(json!({
            "statementType": "CREATE_FUNCTION",
            "ddlTargetRoutine": {"projectId": "p", "datasetId": "d", "routineId": "r"},
            "queryInfo": {"optimizationDetails": {"fields": {
                "applied": {"kindIndex": 3, "boolValue": true},
                "future": {"kindIndex": 9, "somethingNew": 1}
            }}}
        }))
        .unwrap();
        assert_eq!(query.ddl_target_routine.unwrap().routine_id, "r");
        let details = query.query_info.unwrap().optimization_details;
        assert_eq!(details.fields["applied"].kind, Some(ValueKind::BoolValue(true)));
        assert!(details.fields["future"].is_unset());
    }
}
