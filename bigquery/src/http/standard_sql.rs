use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// The top level kind of a [`StandardSqlDataType`], e.g. `INT64` or `ARRAY`.
///
/// Kept as an open set of names: values added by the service round trip unchanged.
#[derive(Clone, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(transparent)]
pub struct TypeKind(String);

impl TypeKind {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn type_kind_unspecified() -> Self {
        Self::new("TYPE_KIND_UNSPECIFIED")
    }
    pub fn int64() -> Self {
        Self::new("INT64")
    }
    pub fn bool() -> Self {
        Self::new("BOOL")
    }
    pub fn float64() -> Self {
        Self::new("FLOAT64")
    }
    pub fn string() -> Self {
        Self::new("STRING")
    }
    pub fn bytes() -> Self {
        Self::new("BYTES")
    }
    pub fn timestamp() -> Self {
        Self::new("TIMESTAMP")
    }
    pub fn date() -> Self {
        Self::new("DATE")
    }
    pub fn time() -> Self {
        Self::new("TIME")
    }
    pub fn datetime() -> Self {
        Self::new("DATETIME")
    }
    pub fn interval() -> Self {
        Self::new("INTERVAL")
    }
    pub fn geography() -> Self {
        Self::new("GEOGRAPHY")
    }
    pub fn numeric() -> Self {
        Self::new("NUMERIC")
    }
    pub fn bignumeric() -> Self {
        Self::new("BIGNUMERIC")
    }
    pub fn json() -> Self {
        Self::new("JSON")
    }
    pub fn array() -> Self {
        Self::new("ARRAY")
    }
    pub fn structure() -> Self {
        Self::new("STRUCT")
    }
    pub fn range() -> Self {
        Self::new("RANGE")
    }
}

/// The refinement of an `ARRAY` or `STRUCT` [`StandardSqlDataType`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum StandardSqlSubType {
    /// The type of the array's elements.
    ArrayElementType(Box<StandardSqlDataType>),
    /// The fields of this struct, in order.
    StructType(StandardSqlStructType),
}

impl StandardSqlSubType {
    const ARRAY_ELEMENT_TYPE: i64 = 1;
    const STRUCT_TYPE: i64 = 2;

    /// Discriminator written next to the payload. `0` is reserved for "no sub type".
    pub fn index(&self) -> i64 {
        match self {
            StandardSqlSubType::ArrayElementType(_) => Self::ARRAY_ELEMENT_TYPE,
            StandardSqlSubType::StructType(_) => Self::STRUCT_TYPE,
        }
    }
}

/// The data type of a variable such as a function argument.
///
/// On the wire the active sub type is written under `arrayElementType` or `structType` together
/// with `subTypeIndex`. Decoding selects the variant by `subTypeIndex`, then reads the payload from
/// the current key or from the legacy `subType` key. Unknown indexes decode as no sub type.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct StandardSqlDataType {
    pub type_kind: TypeKind,
    pub sub_type: Option<StandardSqlSubType>,
}

impl StandardSqlDataType {
    pub fn new(type_kind: TypeKind) -> Self {
        Self {
            type_kind,
            sub_type: None,
        }
    }

    pub fn array_of(element: StandardSqlDataType) -> Self {
        Self {
            type_kind: TypeKind::array(),
            sub_type: Some(StandardSqlSubType::ArrayElementType(Box::new(element))),
        }
    }

    pub fn struct_of(fields: Vec<StandardSqlField>) -> Self {
        Self {
            type_kind: TypeKind::structure(),
            sub_type: Some(StandardSqlSubType::StructType(StandardSqlStructType { fields })),
        }
    }

    pub fn sub_type_index(&self) -> i64 {
        self.sub_type.as_ref().map(StandardSqlSubType::index).unwrap_or_default()
    }

    pub fn array_element_type(&self) -> Option<&StandardSqlDataType> {
        match &self.sub_type {
            Some(StandardSqlSubType::ArrayElementType(v)) => Some(v),
            _ => None,
        }
    }

    pub fn struct_type(&self) -> Option<&StandardSqlStructType> {
        match &self.sub_type {
            Some(StandardSqlSubType::StructType(v)) => Some(v),
            _ => None,
        }
    }
}

impl Serialize for StandardSqlDataType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("typeKind", &self.type_kind)?;
        if let Some(sub_type) = &self.sub_type {
            map.serialize_entry("subTypeIndex", &sub_type.index())?;
            match sub_type {
                StandardSqlSubType::ArrayElementType(v) => map.serialize_entry("arrayElementType", v)?,
                StandardSqlSubType::StructType(v) => map.serialize_entry("structType", v)?,
            }
        }
        map.end()
    }
}

#[derive(serde::Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct WireStandardSqlDataType {
    #[serde(alias = "type_kind")]
    type_kind: TypeKind,
    #[serde(alias = "sub_type_index", deserialize_with = "crate::http::from_str_option")]
    sub_type_index: Option<i64>,
    #[serde(alias = "array_element_type")]
    array_element_type: Option<Value>,
    #[serde(alias = "struct_type")]
    struct_type: Option<Value>,
    #[serde(alias = "sub_type")]
    sub_type: Option<Value>,
}

impl<'de> Deserialize<'de> for StandardSqlDataType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireStandardSqlDataType::deserialize(deserializer)?;
        // Payloads produced by the service itself carry no index; the type kind is the discriminator there.
        let index = wire.sub_type_index.unwrap_or_else(|| match wire.type_kind.as_str() {
            "ARRAY" => StandardSqlSubType::ARRAY_ELEMENT_TYPE,
            "STRUCT" => StandardSqlSubType::STRUCT_TYPE,
            _ => 0,
        });
        let sub_type = match index {
            StandardSqlSubType::ARRAY_ELEMENT_TYPE => wire
                .array_element_type
                .or(wire.sub_type)
                .map(serde_json::from_value::<StandardSqlDataType>)
                .transpose()
                .map_err(D::Error::custom)?
                .map(|v| StandardSqlSubType::ArrayElementType(Box::new(v))),
            StandardSqlSubType::STRUCT_TYPE => wire
                .struct_type
                .or(wire.sub_type)
                .map(serde_json::from_value::<StandardSqlStructType>)
                .transpose()
                .map_err(D::Error::custom)?
                .map(StandardSqlSubType::StructType),
            _ => None,
        };
        Ok(Self {
            type_kind: wire.type_kind,
            sub_type,
        })
    }
}

/// A field or a column.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct StandardSqlField {
    /// Optional. The name of this field. Can be absent for struct fields.
    pub name: String,
    /// Optional. The type of this parameter. Absent if not explicitly specified.
    #[serde(rename = "type")]
    pub field_type: StandardSqlDataType,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct StandardSqlStructType {
    /// Fields within the struct.
    pub fields: Vec<StandardSqlField>,
}

/// A table type, e.g. the return type of a table valued function.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct StandardSqlTableType {
    /// The columns in this table type.
    pub columns: Vec<StandardSqlField>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::http::standard_sql::{
        StandardSqlDataType, StandardSqlField, StandardSqlStructType, StandardSqlSubType, StandardSqlTableType,
        TypeKind,
    };

    fn field(name: &str, field_type: StandardSqlDataType) -> StandardSqlField {
        StandardSqlField {
            name: name.to_string(),
            field_type,
        }
    }

    #[test]
    fn test_encode_without_sub_type() {
        let json = serde_json::to_value(StandardSqlDataType::new(TypeKind::int64())).unwrap();
        assert_eq!(json, json!({"typeKind": "INT64"}));
    }

    #[test]
    fn test_encode_array() {
        let value = StandardSqlDataType::array_of(StandardSqlDataType::new(TypeKind::string()));
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(
            json,
            json!({"typeKind": "ARRAY", "subTypeIndex": 1, "arrayElementType": {"typeKind": "STRING"}})
        );
        assert_eq!(value.sub_type_index(), 1);
    }

    #[test]
    fn test_encode_struct() {
        let value = StandardSqlDataType::struct_of(vec![field("f1", StandardSqlDataType::new(TypeKind::bool()))]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(
            json,
            json!({
                "typeKind": "STRUCT",
                "subTypeIndex": 2,
                "structType": {"fields": [{"name": "f1", "type": {"typeKind": "BOOL"}}]}
            })
        );
        assert!(json.get("arrayElementType").is_none());
    }

    #[test]
    fn test_round_trip() {
        // ARRAY<STRUCT<id INT64, tags ARRAY<STRING>>>
        let expected = StandardSqlDataType::array_of(StandardSqlDataType::struct_of(vec![
            field("id", StandardSqlDataType::new(TypeKind::int64())),
            field(
                "tags",
                StandardSqlDataType::array_of(StandardSqlDataType::new(TypeKind::string())),
            ),
        ]));
        let json = serde_json::to_string(&expected).unwrap();
        let actual: StandardSqlDataType = serde_json::from_str(&json).unwrap();
        assert_eq!(actual, expected);

        let table = StandardSqlTableType {
            columns: vec![field("c", expected)],
        };
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(serde_json::from_str::<StandardSqlTableType>(&json).unwrap(), table);

        let empty: StandardSqlDataType = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, StandardSqlDataType::default());
    }

    #[test]
    fn test_decode_legacy_sub_type_key() {
        let actual: StandardSqlDataType = serde_json::from_value(json!({
            "type_kind": "ARRAY",
            "sub_type_index": 1,
            "sub_type": {"type_kind": "DATE"}
        }))
        .unwrap();
        assert_eq!(
            actual,
            StandardSqlDataType::array_of(StandardSqlDataType::new(TypeKind::date()))
        );

        let actual: StandardSqlDataType = serde_json::from_value(json!({
            "typeKind": "STRUCT",
            "subTypeIndex": 2,
            "subType": {"fields": [{"name": "x", "type": {"typeKind": "JSON"}}]}
        }))
        .unwrap();
        let expected = StandardSqlStructType {
            fields: vec![field("x", StandardSqlDataType::new(TypeKind::json()))],
        };
        assert_eq!(actual.struct_type(), Some(&expected));
    }

    #[test]
    fn test_decode_follows_index_not_keys() {
        let actual: StandardSqlDataType = serde_json::from_value(json!({
            "typeKind": "STRUCT",
            "subTypeIndex": 2,
            "arrayElementType": {"typeKind": "STRING"}
        }))
        .unwrap();
        assert!(actual.sub_type.is_none());

        let actual: StandardSqlDataType = serde_json::from_value(json!({
            "typeKind": "ARRAY",
            "subTypeIndex": 99,
            "arrayElementType": {"typeKind": "STRING"}
        }))
        .unwrap();
        assert_eq!(actual.type_kind, TypeKind::array());
        assert!(actual.sub_type.is_none());
    }

    #[test]
    fn test_decode_service_payload_without_index() {
        let actual: StandardSqlDataType = serde_json::from_value(json!({
            "typeKind": "ARRAY",
            "arrayElementType": {"typeKind": "INT64"}
        }))
        .unwrap();
        match actual.sub_type {
            Some(StandardSqlSubType::ArrayElementType(v)) => assert_eq!(v.type_kind, TypeKind::int64()),
            other => panic!("unexpected {other:?}"),
        }

        let actual: StandardSqlDataType = serde_json::from_value(json!({
            "typeKind": "INT64",
            "arrayElementType": {"typeKind": "INT64"}
        }))
        .unwrap();
        assert!(actual.sub_type.is_none());
    }
}
