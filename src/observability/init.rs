//! Tracing subscriber setup.

use super::exporter::SpanFileExporter;
use super::rotation::{RotatingFile, MAX_BACKUPS, MAX_FILE_BYTES};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "Mortydex";
const TRACE_FILE: &str = "mortydex-otlp.json";

/// Installs the global subscriber exporting spans to the trace file.
///
/// Tracing is optional: if the data directory cannot be created the plugin runs
/// without a subscriber. Only the first call has any effect.
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let file = RotatingFile::new(data_dir.join(TRACE_FILE), MAX_FILE_BYTES, MAX_BACKUPS);
    let exporter = SpanFileExporter::new(file, &resource);

    let provider = TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build();

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
        .try_init();
}
