use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::error::Error;
use crate::http::rest::HttpResponse;

/// Conversion of a raw HTTP response into a typed response.
///
/// Non successful statuses become the mapped service error, empty or non JSON payloads become
/// [`Error::MalformedPayload`] and payloads lacking required keys become [`Error::InvalidShape`].
pub trait BuildFromHttpResponse: Sized {
    fn build_from_http_response(response: HttpResponse) -> Result<Self, Error>;
}

/// Parses the payload of a successful response.
pub(crate) fn parse_json(response: &HttpResponse) -> Result<Value, Error> {
    if !response.is_success() {
        return Err(Error::from_http_response(response));
    }
    if response.payload.trim().is_empty() {
        return Err(Error::MalformedPayload("empty payload".to_string()));
    }
    serde_json::from_str(&response.payload).map_err(|e| Error::MalformedPayload(e.to_string()))
}

pub(crate) fn check_required_keys(json: &Value, keys: &[&str], resource: &str) -> Result<(), Error> {
    let missing: Vec<&str> = keys.iter().filter(|key| json.get(**key).is_none()).copied().collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidShape(format!(
            "{resource} is missing required keys: {}",
            missing.join(", ")
        )))
    }
}

/// Validates every element of the optional list under `list_key`. One bad element fails the page.
pub(crate) fn check_list_elements(json: &Value, list_key: &str, keys: &[&str], resource: &str) -> Result<(), Error> {
    let elements = match json.get(list_key) {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(elements)) => elements,
        Some(_) => return Err(Error::InvalidShape(format!("{list_key} is not a list"))),
    };
    for (i, element) in elements.iter().enumerate() {
        check_required_keys(element, keys, &format!("{resource}[{i}]"))?;
    }
    Ok(())
}

pub(crate) fn decode<T: DeserializeOwned>(json: Value, resource: &str) -> Result<T, Error> {
    serde_json::from_value(json).map_err(|e| Error::InvalidShape(format!("{resource}: {e}")))
}

#[cfg(test)]
mod tests {
    use bigquery_minimal_gax::status::{Code, ToCode};
    use serde_json::json;

    use crate::http::error::Error;
    use crate::http::response::{check_list_elements, check_required_keys, parse_json};
    use crate::http::rest::HttpResponse;

    fn ok(payload: &str) -> HttpResponse {
        HttpResponse {
            status_code: 200,
            payload: payload.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_json() {
        assert!(matches!(parse_json(&ok("")), Err(Error::MalformedPayload(_))));
        assert!(matches!(parse_json(&ok("  \n")), Err(Error::MalformedPayload(_))));
        assert!(matches!(parse_json(&ok("{not json")), Err(Error::MalformedPayload(_))));
        assert_eq!(parse_json(&ok(r#"{"kind": "x"}"#)).unwrap(), json!({"kind": "x"}));

        let error = parse_json(&HttpResponse {
            status_code: 429,
            payload: "{}".to_string(),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(error.to_code(), Code::ResourceExhausted);
    }

    #[test]
    fn test_required_keys() {
        let json = json!({"kind": "k", "etag": "e"});
        assert!(check_required_keys(&json, &["kind", "etag"], "dataset").is_ok());
        match check_required_keys(&json, &["kind", "id", "etag", "datasetReference"], "dataset") {
            Err(Error::InvalidShape(message)) => assert!(message.contains("id, datasetReference")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(check_required_keys(&json!([1, 2]), &["kind"], "dataset").is_err());
    }

    #[test]
    fn test_list_elements() {
        let page = json!({"items": [{"id": "1"}, {"id": "2"}]});
        assert!(check_list_elements(&page, "items", &["id"], "item").is_ok());
        assert!(check_list_elements(&json!({}), "items", &["id"], "item").is_ok());

        let page = json!({"items": [{"id": "1"}, {"name": "2"}]});
        match check_list_elements(&page, "items", &["id"], "item") {
            Err(Error::InvalidShape(message)) => assert!(message.contains("item[1]")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(check_list_elements(&json!({"items": 1}), "items", &["id"], "item").is_err());
    }
}
