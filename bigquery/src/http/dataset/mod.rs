use std::collections::HashMap;
use std::time::Duration;

use time::OffsetDateTime;

use crate::http::table::TableReference;
use crate::http::types::{EncryptionConfiguration, RoutineReference};

pub mod get;
pub mod list;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct DatasetReference {
    /// Required. A unique ID for this dataset, without the project name.
    /// The ID must contain only letters (a-z, A-Z), numbers (0-9), or underscores (_).
    /// The maximum length is 1,024 characters.
    pub dataset_id: String,
    /// Optional. The ID of the project containing this dataset.
    pub project_id: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct GcpTag {
    /// Required. The namespaced friendly name of the tag key, e.g. "12345/environment" where 12345 is org id.
    pub tag_key: String,
    /// Required. The friendly short name of the tag value, e.g. "production"
    pub tag_value: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct DatasetAccessEntry {
    /// The dataset this entry applies to
    pub dataset: DatasetReference,
    /// Which resources in the dataset this entry applies to, e.g. `VIEWS`.
    pub target_types: Vec<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Access {
    /// An IAM role ID that should be granted to the user, group, or domain specified in this access entry.
    pub role: String,
    /// [Pick one] An email address of a user to grant access to.
    pub user_by_email: Option<String>,
    /// [Pick one] An email address of a Google Group to grant access to.
    pub group_by_email: Option<String>,
    /// [Pick one] A domain to grant access to.
    pub domain: Option<String>,
    /// [Pick one] A special group to grant access to, e.g. `projectOwners` or `allAuthenticatedUsers`.
    pub special_group: Option<String>,
    /// [Pick one] Some other type of member that appears in the IAM Policy.
    pub iam_member: Option<String>,
    /// [Pick one] A view from a different dataset to grant access to.
    pub view: Option<TableReference>,
    /// [Pick one] A routine from a different dataset to grant access to.
    pub routine: Option<RoutineReference>,
    /// [Pick one] A grant authorizing all resources of a particular type in a particular dataset.
    pub dataset: Option<DatasetAccessEntry>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Dataset {
    /// Output only. The resource type.
    pub kind: String,
    /// Output only. A hash of the resource.
    pub etag: String,
    /// Output only. The fully-qualified unique name of the dataset in the format projectId:datasetId.
    pub id: String,
    /// Output only. A URL that can be used to access the resource again.
    pub self_link: String,
    /// Required. A reference that identifies the dataset.
    pub dataset_reference: DatasetReference,
    /// Optional. A descriptive name for the dataset.
    pub friendly_name: String,
    /// Optional. A user-friendly description of the dataset.
    pub description: String,
    /// Optional. The default lifetime of all tables in the dataset.
    #[serde(rename = "defaultTableExpirationMs", with = "crate::http::duration_ms")]
    pub default_table_expiration: Duration,
    /// The default partition expiration of partitioned tables created in the dataset.
    #[serde(rename = "defaultPartitionExpirationMs", with = "crate::http::duration_ms")]
    pub default_partition_expiration: Duration,
    /// The labels associated with this dataset.
    pub labels: HashMap<String, String>,
    /// Optional. An array of objects that define dataset access for one or more entities.
    pub access: Vec<Access>,
    /// Output only. The time when this dataset was created.
    #[serde(with = "crate::http::timestamp_ms", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<OffsetDateTime>,
    /// Output only. The date when this dataset was last modified.
    #[serde(with = "crate::http::timestamp_ms", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<OffsetDateTime>,
    /// The geographic location where the dataset should reside.
    pub location: String,
    /// The default encryption key for all tables in the dataset.
    pub default_encryption_configuration: Option<EncryptionConfiguration>,
    /// Output only. Reserved for future use.
    pub satisfies_pzs: bool,
    /// Optional. TRUE if the dataset and its table names are case-insensitive, otherwise FALSE.
    pub is_case_insensitive: bool,
    /// Optional. Defines the default collation specification of future tables created in the dataset.
    pub default_collation: String,
    /// Optional. Defines the time travel window in hours.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub max_time_travel_hours: i64,
    /// Output only. Tags for the Dataset.
    pub tags: Vec<GcpTag>,
    /// Optional. Updates storageBillingModel for the dataset, `LOGICAL` or `PHYSICAL`.
    pub storage_billing_model: String,
    /// Output only. Same as type in ListFormatDataset: `DEFAULT`, `LINKED` or `EXTERNAL`.
    #[serde(rename = "type")]
    pub dataset_type: String,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use time::macros::datetime;

    use crate::http::dataset::{Access, Dataset, DatasetReference};

    #[test]
    fn test_sparse_dataset() {
        let dataset: Dataset = serde_json::from_value(json!({
            "kind": "bigquery#dataset",
            "etag": "tag",
            "id": "p:d",
            "datasetReference": {"projectId": "p", "datasetId": "d"},
            "defaultTableExpirationMs": "3600000",
            "creationTime": "1681472944123",
            "maxTimeTravelHours": "168"
        }))
        .unwrap();
        assert_eq!(dataset.dataset_reference.dataset_id, "d");
        assert_eq!(dataset.default_table_expiration, Duration::from_secs(3600));
        assert_eq!(dataset.default_partition_expiration, Duration::ZERO);
        assert_eq!(dataset.creation_time, Some(datetime!(2023-04-14 11:49:04.123 UTC)));
        assert!(dataset.last_modified_time.is_none());
        assert_eq!(dataset.max_time_travel_hours, 168);
        assert!(dataset.access.is_empty());
        assert!(dataset.labels.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let mut expected = Dataset {
            kind: "bigquery#dataset".to_string(),
            etag: "tag".to_string(),
            id: "p:d".to_string(),
            dataset_reference: DatasetReference {
                dataset_id: "d".to_string(),
                project_id: "p".to_string(),
            },
            default_table_expiration: Duration::from_millis(7200000),
            access: vec![Access {
                role: "READER".to_string(),
                special_group: Some("projectReaders".to_string()),
                ..Default::default()
            }],
            creation_time: Some(datetime!(2023-01-01 00:00:00.5 UTC)),
            location: "US".to_string(),
            dataset_type: "DEFAULT".to_string(),
            ..Default::default()
        };
        expected.labels.insert("env".to_string(), "test".to_string());
        let json = serde_json::to_value(&expected).unwrap();
        assert_eq!(json["type"], "DEFAULT");
        assert_eq!(json["defaultTableExpirationMs"], 7200000);
        let actual: Dataset = serde_json::from_value(json).unwrap();
        assert_eq!(actual, expected);
    }
}
