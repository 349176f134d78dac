use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::options::TracingOptions;

const TRUNCATED: &str = "...<truncated>...";

/// Which side of an RPC a record describes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Request,
    Response,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LogRecord {
    /// The RPC name, e.g. `GetJob`.
    pub rpc: &'static str,
    pub direction: Direction,
    /// Headers in effect for the call. Request records hold the caller supplied headers, response
    /// records the ones that were sent.
    pub headers: BTreeMap<String, String>,
    /// Debug rendering of the request, the response or the error.
    pub message: String,
}

/// Destination of RPC log records. Implementations must not fail.
pub trait LogSink: Send + Sync + Debug {
    fn write(&self, record: LogRecord);
}

/// Forwards records to `tracing` at debug level under the `bigquery_minimal::rpc` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn write(&self, record: LogRecord) {
        match record.direction {
            Direction::Request => tracing::debug!(
                target: "bigquery_minimal::rpc",
                rpc = record.rpc,
                headers = ?record.headers,
                "request: {}",
                record.message
            ),
            Direction::Response => tracing::debug!(
                target: "bigquery_minimal::rpc",
                rpc = record.rpc,
                "response: {}",
                record.message
            ),
        }
    }
}

/// Renders `value` with `{:?}` or `{:#?}` and truncates long string literals.
pub fn debug_string<T: Debug + ?Sized>(value: &T, options: &TracingOptions) -> String {
    let rendered = if options.single_line_mode {
        format!("{value:?}")
    } else {
        format!("{value:#?}")
    };
    truncate_strings(&rendered, options.truncate_string_field_longer_than)
}

/// Shortens every quoted string literal of `rendered` holding more than `limit` characters.
fn truncate_strings(rendered: &str, limit: usize) -> String {
    let mut out = String::with_capacity(rendered.len());
    let mut chars = rendered.chars();
    while let Some(c) = chars.next() {
        out.push(c);
        if c != '"' {
            continue;
        }
        let mut count = 0;
        let mut truncated = false;
        while let Some(c) = chars.next() {
            if c == '"' {
                if truncated {
                    out.push_str(TRUNCATED);
                }
                out.push('"');
                break;
            }
            count += 1;
            if count <= limit {
                out.push(c);
            } else {
                truncated = true;
            }
            if c == '\\' {
                // keep escape sequences whole so an escaped quote never ends the literal
                if let Some(escaped) = chars.next() {
                    if count <= limit {
                        out.push(escaped);
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use crate::log::{debug_string, LogRecord, LogSink};
    use crate::options::TracingOptions;

    /// Collects records for assertions.
    #[derive(Debug, Default)]
    pub(crate) struct CapturingLogSink {
        pub(crate) records: Mutex<Vec<LogRecord>>,
    }

    impl LogSink for CapturingLogSink {
        fn write(&self, record: LogRecord) {
            self.records.lock().unwrap().push(record);
        }
    }

    #[derive(Debug)]
    #[allow(dead_code)]
    struct Sample {
        name: String,
        nested: Vec<String>,
    }

    #[test]
    fn test_single_line() {
        let sample = Sample {
            name: "short".to_string(),
            nested: vec!["abcdefghij".to_string()],
        };
        let options = TracingOptions {
            single_line_mode: true,
            truncate_string_field_longer_than: 5,
        };
        assert_eq!(
            debug_string(&sample, &options),
            r#"Sample { name: "short", nested: ["abcde...<truncated>..."] }"#
        );
    }

    #[test]
    fn test_multi_line() {
        let sample = Sample {
            name: "n".to_string(),
            nested: vec![],
        };
        let options = TracingOptions {
            single_line_mode: false,
            ..Default::default()
        };
        assert_eq!(
            debug_string(&sample, &options),
            "Sample {\n    name: \"n\",\n    nested: [],\n}"
        );
    }

    #[test]
    fn test_escaped_quote() {
        let options = TracingOptions {
            single_line_mode: true,
            truncate_string_field_longer_than: 3,
        };
        assert_eq!(debug_string("a\"b", &options), r#""a\"b""#);
        assert_eq!(debug_string("a\"bcd", &options), r#""a\"b...<truncated>...""#);
    }
}
