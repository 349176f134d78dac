use std::fmt;

use bigquery_minimal_gax::status::{Code, ToCode};

use crate::http::rest::HttpResponse;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The response body was empty or not valid JSON.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The response body was valid JSON but lacked keys required for the resource.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// The request was rejected before being sent, e.g. a required path parameter is empty.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An error returned from the BigQuery service.
    #[error(transparent)]
    Response(#[from] ErrorResponse),

    /// A non successful HTTP status whose body could not be parsed as an error.
    #[error("http status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// An error from the HTTP client.
    #[error(transparent)]
    HttpClient(#[from] reqwest::Error),

    /// An error from the HTTP middleware stack.
    #[error(transparent)]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// An error from a token source.
    #[error("token source failed: {0}")]
    TokenSource(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Builds the error for a non successful HTTP response.
    pub(crate) fn from_http_response(response: &HttpResponse) -> Error {
        match serde_json::from_str::<ErrorWrapper>(&response.payload) {
            Ok(mut wrapper) => {
                wrapper.error.code = response.status_code;
                Error::Response(wrapper.error)
            }
            Err(_) => Error::HttpStatus {
                status: response.status_code,
                body: response.payload.clone(),
            },
        }
    }
}

impl ToCode for Error {
    fn to_code(&self) -> Code {
        match self {
            Error::MalformedPayload(_) | Error::InvalidShape(_) => Code::Internal,
            Error::InvalidRequest(_) => Code::InvalidArgument,
            Error::Response(e) => e.to_code(),
            Error::HttpStatus { status, .. } => Code::from_http_status(*status),
            Error::HttpClient(e) => transport_code(e),
            Error::HttpMiddleware(reqwest_middleware::Error::Reqwest(e)) => transport_code(e),
            Error::HttpMiddleware(_) => Code::Unavailable,
            Error::TokenSource(_) => Code::Unauthenticated,
        }
    }
}

/// Requests that could not be built, e.g. for lack of an absolute URL, never reach the network.
fn transport_code(e: &reqwest::Error) -> Code {
    if e.is_builder() {
        Code::InvalidArgument
    } else if e.is_timeout() {
        Code::DeadlineExceeded
    } else {
        Code::Unavailable
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorResponse {
    /// An HTTP status value, without the textual description.
    ///
    /// Example values include: `400` (Bad Request), `401` (Unauthorized), and `404` (Not Found).
    pub code: u16,

    /// Description of the error.
    pub message: String,

    /// Canonical status name, e.g. `PERMISSION_DENIED`.
    pub status: String,

    /// Details of the individual errors.
    pub errors: Vec<ErrorItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorItem {
    pub domain: String,
    pub reason: String,
    pub message: String,
    pub location: String,
    pub location_type: String,
}

impl ToCode for ErrorResponse {
    fn to_code(&self) -> Code {
        Code::from_name(&self.status).unwrap_or_else(|| Code::from_http_status(self.code))
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.message.fmt(f)
    }
}

impl std::error::Error for ErrorResponse {}

#[derive(serde::Deserialize)]
pub(crate) struct ErrorWrapper {
    pub(crate) error: ErrorResponse,
}

#[cfg(test)]
mod tests {
    use bigquery_minimal_gax::status::{Code, ToCode};

    use crate::http::error::Error;
    use crate::http::rest::HttpResponse;

    fn response(status_code: u16, payload: &str) -> HttpResponse {
        HttpResponse {
            status_code,
            payload: payload.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_error_body() {
        let error = Error::from_http_response(&response(
            403,
            r#"{"error": {"code": 403, "message": "Access Denied", "status": "PERMISSION_DENIED",
                "errors": [{"domain": "global", "reason": "accessDenied", "message": "Access Denied"}]}}"#,
        ));
        assert_eq!(error.to_code(), Code::PermissionDenied);
        assert_eq!(error.to_string(), "Access Denied");
        match error {
            Error::Response(e) => assert_eq!(e.errors[0].reason, "accessDenied"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_status_name_wins() {
        let error = Error::from_http_response(&response(
            400,
            r#"{"error": {"message": "quota", "status": "RESOURCE_EXHAUSTED"}}"#,
        ));
        assert_eq!(error.to_code(), Code::ResourceExhausted);
    }

    #[test]
    fn test_unparseable_body() {
        let error = Error::from_http_response(&response(503, "<html>unavailable</html>"));
        assert_eq!(error.to_code(), Code::Unavailable);
        let error = Error::from_http_response(&response(404, ""));
        assert_eq!(error.to_code(), Code::NotFound);
    }

    #[test]
    fn test_local_errors() {
        assert_eq!(Error::MalformedPayload("x".into()).to_code(), Code::Internal);
        assert_eq!(Error::InvalidShape("x".into()).to_code(), Code::Internal);
        assert_eq!(Error::InvalidRequest("x".into()).to_code(), Code::InvalidArgument);
        assert_eq!(Error::TokenSource("x".into()).to_code(), Code::Unauthenticated);
    }
}
