use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

pub mod bigquery_client;
pub mod bigquery_dataset_client;
pub mod bigquery_job_client;
pub mod bigquery_table_client;
pub mod dataset;
pub mod error;
pub mod job;
pub mod response;
pub mod rest;
pub mod standard_sql;
pub mod table;
pub mod types;
pub mod value;

fn parse_number<T, E>(v: Value) -> Result<Option<T>, E>
where
    T: FromStr,
    T::Err: Display,
    E: de::Error,
{
    match v {
        Value::String(s) => T::from_str(&s).map_err(E::custom).map(Some),
        Value::Number(num) => T::from_str(&num.to_string()).map_err(E::custom).map(Some),
        Value::Null => Ok(None),
        _ => Err(E::custom("Incorrect type")),
    }
}

/// Accepts a number encoded either as a JSON string or as a JSON number.
pub(crate) fn from_str_option<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    parse_number(Value::deserialize(deserializer)?)
}

/// Same as [`from_str_option`] but falls back to the default value on `null`.
pub(crate) fn from_str<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr + Default,
    T::Err: Display,
    D: Deserializer<'de>,
{
    parse_number(Value::deserialize(deserializer)?).map(Option::unwrap_or_default)
}

/// Durations travel as a count of milliseconds, either as a number or a numeric string.
pub(crate) mod duration_ms {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = super::parse_number::<f64, D::Error>(Value::deserialize(deserializer)?)?.unwrap_or_default();
        if millis < 0.0 || !millis.is_finite() {
            return Err(de::Error::custom(format!("invalid duration {millis}")));
        }
        Ok(Duration::from_millis(millis as u64))
    }
}

/// Timestamps arrive as epoch milliseconds (number or numeric string) or as RFC3339 strings.
/// They are always written back as epoch milliseconds.
pub(crate) mod timestamp_ms {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use time::format_description::well_known::Rfc3339;
    use time::OffsetDateTime;

    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_i64((v.unix_timestamp_nanos() / 1_000_000) as i64),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = match Value::deserialize(deserializer)? {
            Value::Null => return Ok(None),
            Value::Number(n) => n.as_i64().ok_or_else(|| de::Error::custom(format!("invalid timestamp {n}")))?,
            Value::String(s) => match s.parse::<i64>() {
                Ok(millis) => millis,
                Err(_) => return OffsetDateTime::parse(&s, &Rfc3339).map(Some).map_err(de::Error::custom),
            },
            _ => return Err(de::Error::custom("Incorrect type")),
        };
        OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
            .map(Some)
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use time::macros::datetime;
    use time::OffsetDateTime;

    #[derive(serde::Deserialize, serde::Serialize, Debug, Default, PartialEq)]
    #[serde(default, rename_all = "camelCase")]
    struct Sample {
        #[serde(deserialize_with = "crate::http::from_str")]
        total_bytes: i64,
        #[serde(deserialize_with = "crate::http::from_str_option")]
        num_rows: Option<u64>,
        #[serde(with = "crate::http::duration_ms")]
        timeout_ms: Duration,
        #[serde(with = "crate::http::timestamp_ms", skip_serializing_if = "Option::is_none")]
        creation_time: Option<OffsetDateTime>,
    }

    #[test]
    fn test_numeric_coercion() {
        let a: Sample = serde_json::from_str(r#"{"totalBytes": "1024", "numRows": 7}"#).unwrap();
        let b: Sample = serde_json::from_str(r#"{"totalBytes": 1024, "numRows": "7"}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.total_bytes, 1024);
        assert_eq!(a.num_rows, Some(7));

        let c: Sample = serde_json::from_str(r#"{"totalBytes": null, "numRows": null}"#).unwrap();
        assert_eq!(c, Sample::default());
        assert!(serde_json::from_str::<Sample>(r#"{"totalBytes": "abc"}"#).is_err());
    }

    #[test]
    fn test_duration() {
        let a: Sample = serde_json::from_str(r#"{"timeoutMs": 1500}"#).unwrap();
        assert_eq!(a.timeout_ms, Duration::from_millis(1500));
        let b: Sample = serde_json::from_str(r#"{"timeoutMs": "1500"}"#).unwrap();
        assert_eq!(a, b);
        let empty: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.timeout_ms, Duration::ZERO);

        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["timeoutMs"], 1500);
        assert!(json.get("creationTime").is_none());
    }

    #[test]
    fn test_timestamp() {
        let expected = datetime!(2023-04-14 11:49:04.123 UTC);
        let from_number: Sample = serde_json::from_str(r#"{"creationTime": 1681472944123}"#).unwrap();
        let from_string: Sample = serde_json::from_str(r#"{"creationTime": "1681472944123"}"#).unwrap();
        let from_rfc3339: Sample = serde_json::from_str(r#"{"creationTime": "2023-04-14T11:49:04.123Z"}"#).unwrap();
        assert_eq!(from_number.creation_time, Some(expected));
        assert_eq!(from_string.creation_time, Some(expected));
        assert_eq!(from_rfc3339.creation_time, Some(expected));

        let json = serde_json::to_value(&from_rfc3339).unwrap();
        assert_eq!(json["creationTime"], 1681472944123i64);
        let back: Sample = serde_json::from_value(json).unwrap();
        assert_eq!(back, from_number);
    }
}
