use std::collections::HashMap;

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct EncryptionConfiguration {
    /// Optional. Describes the Cloud KMS encryption key that will be used to protect destination BigQuery table.
    /// The BigQuery Service Account associated with your project requires access to this encryption key.
    pub kms_key_name: Option<String>,
}

/// Error details returned by the service inside resources (job status, query responses).
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorProto {
    /// A short error code that summarizes the error.
    pub reason: String,
    /// Specifies where the error occurred, if present.
    pub location: String,
    /// Debugging information. This property is internal to Google and should not be used.
    pub debug_info: String,
    /// A human-readable description of the error.
    pub message: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutineReference {
    /// Required. The ID of the project containing this routine.
    pub project_id: String,
    /// Required. The ID of the dataset containing this routine.
    pub dataset_id: String,
    /// Required. The ID of the routine.
    pub routine_id: String,
}

/// A connection-level property to customize query behavior, e.g. `time_zone` or `session_id`.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionProperty {
    pub key: String,
    pub value: String,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct DataFormatOptions {
    /// Optional. Output timestamp as usec int64. Default is false.
    pub use_int64_timestamp: bool,
}

/// The type of a query parameter.
///
/// Exactly one of `parameter_type` alone (scalars), `array_type` or `struct_types` describes the
/// parameter. `type` and `structTypes` are always written; `arrayType` only when present.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryParameterType {
    /// Required. The top level type of this field, e.g. `INT64`, `ARRAY` or `STRUCT`.
    #[serde(rename = "type")]
    pub parameter_type: String,
    /// Optional. The type of the array's elements, if this is an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_type: Option<Box<QueryParameterType>>,
    /// Optional. The types of the fields of this struct, in order, if this is a struct.
    pub struct_types: Vec<QueryParameterStructType>,
}

impl QueryParameterType {
    pub fn scalar(parameter_type: impl Into<String>) -> Self {
        Self {
            parameter_type: parameter_type.into(),
            ..Default::default()
        }
    }

    pub fn array(element: QueryParameterType) -> Self {
        Self {
            parameter_type: "ARRAY".to_string(),
            array_type: Some(Box::new(element)),
            struct_types: vec![],
        }
    }

    pub fn structure(fields: Vec<QueryParameterStructType>) -> Self {
        Self {
            parameter_type: "STRUCT".to_string(),
            array_type: None,
            struct_types: fields,
        }
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryParameterStructType {
    /// Optional. The name of this field.
    pub name: String,
    /// Required. The type of this field.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<Box<QueryParameterType>>,
    /// Optional. Human-oriented description of the field.
    pub description: String,
}

/// The value of a query parameter. Nesting goes through the collections, so no boxing is needed.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryParameterValue {
    /// Optional. The value of this value, if a simple scalar type.
    pub value: String,
    /// Optional. The array values, if this is an array type.
    pub array_values: Vec<QueryParameterValue>,
    /// The struct field values.
    pub struct_values: HashMap<String, QueryParameterValue>,
}

impl QueryParameterValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryParameter {
    /// Optional. If unset, this is a positional parameter. Otherwise, should be unique within a query.
    pub name: String,
    /// Required. The type of this parameter.
    pub parameter_type: QueryParameterType,
    /// Required. The value of this parameter.
    pub parameter_value: QueryParameterValue,
}
