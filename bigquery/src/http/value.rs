use std::collections::HashMap;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A dynamically typed value: a number, a string, a boolean, a struct or a list of values.
///
/// Encoded as an object holding `kindIndex` plus the payload of the active kind. The decoder picks
/// the kind from `kindIndex` only; an unknown or missing index yields an unset value.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Value {
    pub kind: Option<ValueKind>,
}

#[derive(Clone, PartialEq, Debug)]
pub enum ValueKind {
    NumberValue(f64),
    StringValue(String),
    BoolValue(bool),
    StructValue(Struct),
    ListValue(Vec<Value>),
}

impl ValueKind {
    const NUMBER: i64 = 1;
    const STRING: i64 = 2;
    const BOOL: i64 = 3;
    const STRUCT: i64 = 4;
    const LIST: i64 = 5;

    pub fn index(&self) -> i64 {
        match self {
            ValueKind::NumberValue(_) => Self::NUMBER,
            ValueKind::StringValue(_) => Self::STRING,
            ValueKind::BoolValue(_) => Self::BOOL,
            ValueKind::StructValue(_) => Self::STRUCT,
            ValueKind::ListValue(_) => Self::LIST,
        }
    }
}

/// A map of named values.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default)]
pub struct Struct {
    pub fields: HashMap<String, Value>,
}

impl Value {
    pub fn kind_index(&self) -> i64 {
        self.kind.as_ref().map(ValueKind::index).unwrap_or_default()
    }

    pub fn is_unset(&self) -> bool {
        self.kind.is_none()
    }
}

impl From<ValueKind> for Value {
    fn from(kind: ValueKind) -> Self {
        Value { kind: Some(kind) }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        ValueKind::NumberValue(v).into()
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        ValueKind::StringValue(v.to_string()).into()
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        ValueKind::StringValue(v).into()
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        ValueKind::BoolValue(v).into()
    }
}

impl From<Struct> for Value {
    fn from(v: Struct) -> Self {
        ValueKind::StructValue(v).into()
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        ValueKind::ListValue(v).into()
    }
}

// JSON has no literal for non finite numbers, they are written as strings.
fn number_to_json(v: f64) -> serde_json::Value {
    if v.is_nan() {
        "NaN".into()
    } else if v == f64::INFINITY {
        "Infinity".into()
    } else if v == f64::NEG_INFINITY {
        "-Infinity".into()
    } else {
        v.into()
    }
}

fn number_from_json(v: serde_json::Value) -> Result<f64, String> {
    match v {
        serde_json::Value::Number(n) => n.as_f64().ok_or_else(|| format!("invalid number {n}")),
        serde_json::Value::String(s) => match s.as_str() {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            _ => s.parse::<f64>().map_err(|e| e.to_string()),
        },
        other => Err(format!("invalid number {other}")),
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kindIndex", &self.kind_index())?;
        match &self.kind {
            None => {}
            Some(ValueKind::NumberValue(v)) => map.serialize_entry("numberValue", &number_to_json(*v))?,
            Some(ValueKind::StringValue(v)) => map.serialize_entry("stringValue", v)?,
            Some(ValueKind::BoolValue(v)) => map.serialize_entry("boolValue", v)?,
            Some(ValueKind::StructValue(v)) => map.serialize_entry("structValue", v)?,
            Some(ValueKind::ListValue(v)) => map.serialize_entry("listValue", v)?,
        }
        map.end()
    }
}

#[derive(serde::Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct WireValue {
    #[serde(alias = "kind_index", deserialize_with = "crate::http::from_str_option")]
    kind_index: Option<i64>,
    #[serde(alias = "number_value")]
    number_value: Option<serde_json::Value>,
    #[serde(alias = "string_value")]
    string_value: Option<serde_json::Value>,
    #[serde(alias = "bool_value")]
    bool_value: Option<serde_json::Value>,
    #[serde(alias = "struct_value")]
    struct_value: Option<serde_json::Value>,
    #[serde(alias = "list_value")]
    list_value: Option<serde_json::Value>,
    #[serde(alias = "value_kind")]
    value_kind: Option<serde_json::Value>,
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireValue::deserialize(deserializer)?;
        let index = wire.kind_index.unwrap_or_default();
        let kind = match index {
            ValueKind::NUMBER => wire
                .number_value
                .or(wire.value_kind)
                .map(number_from_json)
                .transpose()
                .map_err(D::Error::custom)?
                .map(ValueKind::NumberValue),
            ValueKind::STRING => wire
                .string_value
                .or(wire.value_kind)
                .map(serde_json::from_value::<String>)
                .transpose()
                .map_err(D::Error::custom)?
                .map(ValueKind::StringValue),
            ValueKind::BOOL => wire
                .bool_value
                .or(wire.value_kind)
                .map(serde_json::from_value::<bool>)
                .transpose()
                .map_err(D::Error::custom)?
                .map(ValueKind::BoolValue),
            ValueKind::STRUCT => wire
                .struct_value
                .or(wire.value_kind)
                .map(serde_json::from_value::<Struct>)
                .transpose()
                .map_err(D::Error::custom)?
                .map(ValueKind::StructValue),
            ValueKind::LIST => wire
                .list_value
                .or(wire.value_kind)
                .map(serde_json::from_value::<Vec<Value>>)
                .transpose()
                .map_err(D::Error::custom)?
                .map(ValueKind::ListValue),
            _ => None,
        };
        Ok(Value { kind })
    }
}
