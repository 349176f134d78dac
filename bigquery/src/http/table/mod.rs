use std::collections::HashMap;
use std::time::Duration;

use time::OffsetDateTime;

use crate::http::types::EncryptionConfiguration;

pub mod get;
pub mod list;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TableReference {
    /// Required. The ID of the project containing this table.
    pub project_id: String,
    /// Required. The ID of the dataset containing this table.
    pub dataset_id: String,
    /// Required. The ID of the table.
    /// The ID can contain Unicode characters in category L (letter), M (mark), N (number), Pc (connector, including underscore), Pd (dash), and Zs (space).
    /// The maximum length is 1,024 characters. Certain operations allow suffixing of the table ID with a partition decorator, such as sample_table$20190123.
    pub table_id: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicyTag {
    /// A list of policy tag resource names.
    pub names: Vec<String>,
}

/// A column of a table schema. `RECORD` columns nest their sub fields in `fields`.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TableFieldSchema {
    /// Required. The field name.
    pub name: String,
    /// Required. The field data type, e.g. `STRING`, `INTEGER` or `RECORD`.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Optional. `NULLABLE`, `REQUIRED` or `REPEATED`. The default value is `NULLABLE`.
    pub mode: String,
    /// Optional. Describes the nested schema fields if the type property is set to RECORD.
    pub fields: Vec<TableFieldSchema>,
    /// Optional. The field description.
    pub description: String,
    /// Optional. The policy tags attached to this field, used for field-level access control.
    pub policy_tags: Option<PolicyTag>,
    /// Optional. Maximum length of values of this field for STRINGS or BYTES.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub max_length: i64,
    /// Optional. Precision (maximum number of total digits in base 10) for NUMERIC or BIGNUMERIC.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub precision: i64,
    /// Optional. Scale (maximum number of digits in the fractional part in base 10) for NUMERIC or BIGNUMERIC.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub scale: i64,
    /// Optional. Field collation can be set only when the type of field is STRING.
    pub collation: String,
    /// Optional. A SQL expression to specify the default value for this field.
    pub default_value_expression: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TableSchema {
    /// Describes the fields in a table.
    pub fields: Vec<TableFieldSchema>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct TimePartitioning {
    /// Required. `DAY`, `HOUR`, `MONTH` or `YEAR`.
    #[serde(rename = "type")]
    pub partition_type: String,
    /// Optional. Storage lifetime of a partition.
    #[serde(rename = "expirationMs", with = "crate::http::duration_ms")]
    pub expiration: Duration,
    /// Optional. If not set, the table is partitioned by pseudo column '_PARTITIONTIME'.
    pub field: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Clustering {
    /// One or more fields on which data should be clustered.
    pub fields: Vec<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewDefinition {
    /// Required. A query that BigQuery executes when the view is referenced.
    pub query: String,
    /// True if view is defined in legacy SQL dialect, false if in GoogleSQL.
    pub use_legacy_sql: bool,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Table {
    /// The type of resource ID.
    pub kind: String,
    /// Output only. A hash of this resource.
    pub etag: String,
    /// Output only. An opaque ID uniquely identifying the table.
    pub id: String,
    /// Output only. A URL that can be used to access this resource again.
    pub self_link: String,
    /// Required. Reference describing the ID of this table.
    pub table_reference: TableReference,
    /// Optional. A descriptive name for this table.
    pub friendly_name: String,
    /// Optional. A user-friendly description of this table.
    pub description: String,
    /// The labels associated with this table.
    pub labels: HashMap<String, String>,
    /// Optional. Describes the schema of this table.
    pub schema: TableSchema,
    /// If specified, configures time-based partitioning for this table.
    pub time_partitioning: Option<TimePartitioning>,
    /// Clustering specification for the table.
    pub clustering: Option<Clustering>,
    /// Optional. If set to true, queries over this table require a partition filter.
    pub require_partition_filter: bool,
    /// Output only. The size of this table in logical bytes, excluding any data in the streaming buffer.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub num_bytes: i64,
    /// Output only. The number of rows of data in this table, excluding any data in the streaming buffer.
    #[serde(deserialize_with = "crate::http::from_str")]
    pub num_rows: u64,
    /// Output only. The time when this table was created.
    #[serde(with = "crate::http::timestamp_ms", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<OffsetDateTime>,
    /// Optional. The time when this table expires. If not present, the table will persist indefinitely.
    #[serde(with = "crate::http::timestamp_ms", skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<OffsetDateTime>,
    /// Output only. The time when this table was last modified.
    #[serde(with = "crate::http::timestamp_ms", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<OffsetDateTime>,
    /// Output only. `TABLE`, `VIEW`, `SNAPSHOT`, `MATERIALIZED_VIEW` or `EXTERNAL`.
    #[serde(rename = "type")]
    pub table_type: String,
    /// Optional. The view definition.
    pub view: Option<ViewDefinition>,
    /// Output only. The geographic location where the table resides.
    pub location: String,
    /// Custom encryption configuration (e.g., Cloud KMS keys).
    pub encryption_configuration: Option<EncryptionConfiguration>,
    /// Optional. Defines the default collation specification of new STRING fields in the table.
    pub default_collation: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use crate::http::table::{Table, TableFieldSchema, TableReference, TableSchema, ViewDefinition};

    #[test]
    fn test_sparse_table() {
        let table: Table = serde_json::from_value(json!({
            "kind": "bigquery#table",
            "etag": "e",
            "id": "p:d.t",
            "tableReference": {"projectId": "p", "datasetId": "d", "tableId": "t"},
            "numRows": "42",
            "numBytes": 1024,
            "type": "TABLE",
            "lastModifiedTime": "1681472944123",
            "schema": {"fields": [{"name": "s", "type": "RECORD", "fields": [{"name": "x", "type": "INTEGER"}]}]}
        }))
        .unwrap();
        assert_eq!(table.num_rows, 42);
        assert_eq!(table.num_bytes, 1024);
        assert_eq!(table.table_type, "TABLE");
        assert_eq!(table.last_modified_time, Some(datetime!(2023-04-14 11:49:04.123 UTC)));
        assert!(table.creation_time.is_none());
        assert_eq!(table.schema.fields[0].fields[0].field_type, "INTEGER");
        assert_eq!(table.schema.fields[0].mode, "");
        assert!(table.view.is_none());
    }

    #[test]
    fn test_round_trip() {
        let expected = Table {
            kind: "bigquery#table".to_string(),
            id: "p:d.v".to_string(),
            table_reference: TableReference {
                project_id: "p".to_string(),
                dataset_id: "d".to_string(),
                table_id: "v".to_string(),
            },
            schema: TableSchema {
                fields: vec![TableFieldSchema {
                    name: "col".to_string(),
                    field_type: "STRING".to_string(),
                    mode: "REPEATED".to_string(),
                    max_length: 32,
                    ..Default::default()
                }],
            },
            table_type: "VIEW".to_string(),
            view: Some(ViewDefinition {
                query: "SELECT 1".to_string(),
                use_legacy_sql: false,
            }),
            creation_time: Some(datetime!(2024-02-29 12:00:00 UTC)),
            ..Default::default()
        };
        let json = serde_json::to_string(&expected).unwrap();
        let actual: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(actual, expected);
    }
}
