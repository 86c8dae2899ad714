//! OpenTelemetry tracing exported to a rotating JSON-lines file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer provider → SpanFileExporter → file
//! ```
//!
//! Traces land in `~/.local/share/zellij/mortydex/mortydex-otlp.json`, one span
//! per line. The file rotates at 5 MiB and keeps two numbered backups.
//!
//! The level comes from the `trace_level` plugin option (default `info`) and
//! accepts any `EnvFilter` directive, e.g. `mortydex=debug`.
//!
//! - `init`: subscriber setup
//! - `exporter`: span serialization and the `SpanExporter` implementation
//! - `rotation`: size-based file rotation

mod exporter;
mod init;
mod rotation;

pub use init::init_tracing;
