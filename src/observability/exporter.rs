//! Span exporter writing one JSON object per finished span.
//!
//! ```json
//! {"traceId":"4bf9…","spanId":"00f0…","parentSpanId":"","name":"fetch_completed",
//!  "service":"Mortydex","startUnixNano":"1718…","durationUs":412,
//!  "attributes":{"request_id":3,"page":2},"status":"unset"}
//! ```

use super::rotation::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::time::UNIX_EPOCH;

/// Flattened form of a finished span, one line in the trace file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpanRecord {
    trace_id: String,
    span_id: String,
    parent_span_id: String,
    name: String,
    service: String,
    start_unix_nano: String,
    duration_us: u128,
    attributes: Map<String, JsonValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    events: Vec<EventRecord>,
    status: String,
}

#[derive(Debug, Serialize)]
struct EventRecord {
    name: String,
    attributes: Map<String, JsonValue>,
}

impl SpanRecord {
    fn from_span(span: &SpanData, service: &str) -> Self {
        let start = span.start_time.duration_since(UNIX_EPOCH).unwrap_or_default();
        let duration = span.end_time.duration_since(span.start_time).unwrap_or_default();

        Self {
            trace_id: span.span_context.trace_id().to_string(),
            span_id: span.span_context.span_id().to_string(),
            parent_span_id: if span.parent_span_id == SpanId::INVALID {
                String::new()
            } else {
                span.parent_span_id.to_string()
            },
            name: span.name.to_string(),
            service: service.to_string(),
            start_unix_nano: start.as_nanos().to_string(),
            duration_us: duration.as_micros(),
            attributes: attributes_to_json(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| EventRecord {
                    name: event.name.to_string(),
                    attributes: attributes_to_json(&event.attributes),
                })
                .collect(),
            status: match &span.status {
                Status::Unset => "unset".to_string(),
                Status::Ok => "ok".to_string(),
                Status::Error { description } => format!("error: {description}"),
            },
        }
    }
}

fn attributes_to_json(attributes: &[KeyValue]) -> Map<String, JsonValue> {
    attributes
        .iter()
        .map(|kv| (kv.key.to_string(), value_to_json(&kv.value)))
        .collect()
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::from(*b),
        Value::I64(i) => JsonValue::from(*i),
        Value::F64(f) => JsonValue::from(*f),
        Value::String(s) => JsonValue::from(s.as_str()),
        Value::Array(_) => JsonValue::from(value.to_string()),
    }
}

/// Writes finished spans to a [`RotatingFile`].
#[derive(Debug)]
pub struct SpanFileExporter {
    file: RotatingFile,
    service: String,
    is_shutdown: bool,
}

impl SpanFileExporter {
    pub fn new(file: RotatingFile, resource: &Resource) -> Self {
        Self {
            file,
            service: service_name(resource),
            is_shutdown: false,
        }
    }

    fn write_batch(&mut self, batch: &[SpanData]) -> Result<(), TraceError> {
        for span in batch {
            let record = SpanRecord::from_span(span, &self.service);
            let line = serde_json::to_string(&record).map_err(|e| TraceError::from(e.to_string()))?;
            self.file
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))?;
        }
        Ok(())
    }
}

impl SpanExporter for SpanFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown {
            Err(TraceError::from("exporter is shut down"))
        } else {
            self.write_batch(&batch)
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.service = service_name(resource);
    }
}

fn service_name(resource: &Resource) -> String {
    resource
        .get(opentelemetry::Key::from_static_str("service.name"))
        .map(|v| v.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_keep_their_json_types() {
        assert_eq!(value_to_json(&Value::Bool(true)), JsonValue::Bool(true));
        assert_eq!(value_to_json(&Value::I64(42)), serde_json::json!(42));
        assert_eq!(value_to_json(&Value::from("rick")), serde_json::json!("rick"));
    }

    #[test]
    fn attributes_become_an_object() {
        let attrs = vec![KeyValue::new("page", 2_i64), KeyValue::new("name", "morty")];
        assert_eq!(
            JsonValue::Object(attributes_to_json(&attrs)),
            serde_json::json!({ "page": 2, "name": "morty" })
        );
    }

    #[test]
    fn service_name_comes_from_resource() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "Mortydex")]);
        assert_eq!(service_name(&resource), "Mortydex");
    }
}
