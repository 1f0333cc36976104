//! Tracing subscriber setup.
//!
//! Logs go to stdout for the one-shot commands. The browser owns the
//! terminal, so its logs go to a file in the config directory instead.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initializes the global subscriber.
///
/// With `log_file` set, output is appended to that file through a
/// non-blocking writer; the returned guard flushes it on drop and must be
/// held until the program exits.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created.
pub fn init_logging(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, guard) = match log_file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let file_name = path
                .file_name()
                .map_or_else(|| String::from("cinesearch.log"), |n| n.to_string_lossy().into_owned());
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(log_file.is_none())
        .with_writer(writer);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    // OTLP span export, enabled when `OTEL_EXPORTER_OTLP_ENDPOINT` is set
    #[cfg(feature = "otel")]
    let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .ok()
        .and_then(|_| {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_http()
                .build()
                .ok()?;

            let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                .with_simple_exporter(exporter)
                .build();

            let tracer = opentelemetry::trace::TracerProvider::tracer(
                &tracer_provider,
                env!("CARGO_PKG_NAME"),
            );
            opentelemetry::global::set_tracer_provider(tracer_provider);

            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        });
    #[cfg(feature = "otel")]
    let registry = registry.with(otel_layer);

    registry.init();
    Ok(guard)
}
