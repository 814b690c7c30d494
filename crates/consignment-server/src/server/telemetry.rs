//! # Logging and Telemetry
//!
//! Structured logs are always emitted through `tracing` and printed by a
//! `tracing_subscriber::fmt` layer, filtered by `RUST_LOG` (default `info`).
//! On top of that, the crate supports optional OpenTelemetry export of spans
//! and metrics to either Honeycomb or stdout.
//!
//! ## Feature matrix
//!
//! - `tracing`: Exports `tracing` spans through OpenTelemetry.
//! - `metrics`: Enables OpenTelemetry metrics (via counters, histograms, etc.).
//! - `honeycomb`: Enables the Honeycomb OTLP exporter.
//! - `stdout`: Enables the stdout OTLP exporter.
//!
//! ## Feature constraints
//!
//! - Exporters require using at least one of: `tracing` or `metrics`.
//! - Both `honeycomb` and `stdout` exporters can be enabled at the same time.
//!
//! ## Span behavior
//!
//! - Spans created via `tracing::info_span!` are exported to any enabled
//!   telemetry backend
//! - Events (`tracing::info!`, etc.) inside a span become span events in
//!   telemetry backends
//! - Events outside of a span are only shown in log output (via
//!   `fmt::layer()`), not exported
//!
//! ## Metrics behavior
//!
//! - Metrics (create/list request counts, create errors, stored consignments,
//!   listing size, request duration) are exported if `metrics` is enabled
//! - Each exporter (Honeycomb, stdout) gets its own reader
//!
//! ## Example usage
//!
//! Enable tracing and export to Honeycomb:
//!
//! ```bash
//! cargo run --features tracing,honeycomb
//! ```
//!
//! Enable metrics and export to Honeycomb:
//!
//! ```bash
//! cargo run --features metrics,honeycomb
//! ```
//!
//! Enable tracing and metrics, exported to both Honeycomb and stdout:
//!
//! ```bash
//! cargo run --features tracing,metrics,honeycomb,stdout
//! ```
//!
//! Enable only local stdout export (no remote backend):
//!
//! ```bash
//! cargo run --features tracing,stdout
//! ```

// Disallow using `honeycomb` without `tracing` or `metrics`
#[cfg(all(
    feature = "honeycomb",
    not(any(feature = "tracing", feature = "metrics"))
))]
compile_error!(
    "The 'honeycomb' feature requires at least one of 'tracing' or 'metrics' to be enabled."
);

// Disallow using `stdout` without `tracing` or `metrics`
#[cfg(all(feature = "stdout", not(any(feature = "tracing", feature = "metrics"))))]
compile_error!(
    "The 'stdout' feature requires at least one of 'tracing' or 'metrics' to be enabled."
);

// Core imports - always needed
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// Honeycomb-specific imports
#[cfg(all(feature = "honeycomb", any(feature = "metrics", feature = "tracing")))]
use opentelemetry_otlp::{Compression, Protocol, WithExportConfig, WithTonicConfig};
#[cfg(all(feature = "honeycomb", feature = "metrics"))]
use opentelemetry_sdk::metrics::Temporality;
#[cfg(feature = "honeycomb")]
use tonic::metadata::MetadataMap;
#[cfg(all(feature = "honeycomb", any(feature = "metrics", feature = "tracing")))]
use tonic::transport::ClientTlsConfig;

// Metrics-specific imports
#[cfg(feature = "metrics")]
use opentelemetry::metrics::{Counter, Histogram, Meter};
#[cfg(feature = "metrics")]
use opentelemetry_sdk::metrics as sdkmetrics;
#[cfg(feature = "metrics")]
use std::sync::OnceLock;

// Either
#[cfg(any(feature = "metrics", feature = "tracing"))]
use opentelemetry::{InstrumentationScope, KeyValue};
#[cfg(any(feature = "metrics", feature = "tracing"))]
use opentelemetry_sdk::Resource;
#[cfg(any(feature = "metrics", feature = "tracing"))]
use opentelemetry_semantic_conventions as semvcns;

// Tracing-specific imports
#[cfg(feature = "tracing")]
use opentelemetry::trace::TracerProvider;
#[cfg(feature = "tracing")]
use opentelemetry_sdk::propagation::TraceContextPropagator;
#[cfg(feature = "tracing")]
use opentelemetry_sdk::trace as sdktrace;

#[cfg(any(
    all(feature = "metrics", feature = "stdout"),
    all(feature = "tracing", any(feature = "stdout", feature = "honeycomb"))
))]
const EXPORT_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5);
#[cfg(feature = "honeycomb")]
const EXPORT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Exporter handles kept alive for the lifetime of the process.
pub struct TelemetryProviders {
    #[cfg(feature = "tracing")]
    pub tracer_provider: sdktrace::SdkTracerProvider,
    #[cfg(feature = "metrics")]
    pub meter_provider: sdkmetrics::SdkMeterProvider,
}

/// Installs the global `tracing` subscriber and any enabled OpenTelemetry
/// exporters.
///
/// # Errors
///
/// Fails if an exporter cannot be built or a global subscriber is already set.
pub fn init_telemetry() -> anyhow::Result<TelemetryProviders> {
    #[cfg(feature = "tracing")]
    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

    #[cfg(feature = "tracing")]
    let tracer_provider = init_tracer()?;

    #[cfg(feature = "metrics")]
    let meter_provider = init_metrics()?;

    #[cfg(any(feature = "metrics", feature = "tracing"))]
    let scope = InstrumentationScope::builder("consignment")
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_schema_url(semvcns::SCHEMA_URL)
        .build();

    // Always subscribe to standard tracing logs printed to the console via
    // `tracing_subscriber::fmt`. This is unrelated to the `opentelemetry_stdout`
    // exporter - it logs spans/events as human-readable output.
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true)
                .pretty(),
        );

    #[cfg(feature = "tracing")]
    let registry = {
        opentelemetry::global::set_tracer_provider(tracer_provider.clone());
        registry.with(
            tracing_opentelemetry::layer()
                .with_tracer(tracer_provider.tracer_with_scope(scope.clone()))
                .with_error_records_to_exceptions(true),
        )
    };

    #[cfg(feature = "metrics")]
    let registry = {
        opentelemetry::global::set_meter_provider(meter_provider.clone());
        let meter = opentelemetry::global::meter_with_scope(scope);
        init_metric_handles(meter);

        registry.with(tracing_opentelemetry::MetricsLayer::new(
            meter_provider.clone(),
        ))
    };

    registry.try_init()?;

    Ok(TelemetryProviders {
        #[cfg(feature = "tracing")]
        tracer_provider,
        #[cfg(feature = "metrics")]
        meter_provider,
    })
}

/// Connection settings for the Honeycomb OTLP endpoint, read from the
/// environment each time an exporter is built.
#[cfg(feature = "honeycomb")]
struct HoneycombSettings {
    metadata: MetadataMap,
    endpoint: String,
    compression: Compression,
}

#[cfg(feature = "honeycomb")]
impl HoneycombSettings {
    fn from_env() -> anyhow::Result<Self> {
        use anyhow::Context;
        use std::str::FromStr;

        let api_key = std::env::var("HONEYCOMB_API_KEY").context("missing `HONEYCOMB_API_KEY`")?;
        let dataset = std::env::var("HONEYCOMB_DATASET").context("missing `HONEYCOMB_DATASET`")?;
        let endpoint =
            std::env::var("HONEYCOMB_ENDPOINT").context("missing `HONEYCOMB_ENDPOINT`")?;
        let compression = std::env::var("HONEYCOMB_COMPRESSION")
            .context("missing `HONEYCOMB_COMPRESSION`")?
            .to_ascii_lowercase();

        let mut metadata = MetadataMap::new();
        metadata.insert(
            "x-honeycomb-team",
            api_key.parse().context("invalid API key")?,
        );
        metadata.insert(
            "x-honeycomb-dataset",
            dataset.parse().context("invalid dataset")?,
        );

        Ok(Self {
            metadata,
            endpoint,
            compression: Compression::from_str(&compression)?,
        })
    }
}

#[cfg(any(feature = "metrics", feature = "tracing"))]
fn resource() -> Resource {
    Resource::builder()
        .with_service_name("consignment-service")
        .with_schema_url(
            [KeyValue::new(
                semvcns::resource::SERVICE_VERSION,
                env!("CARGO_PKG_VERSION"),
            )],
            semvcns::SCHEMA_URL,
        )
        .build()
}

#[cfg(feature = "metrics")]
fn init_metrics() -> anyhow::Result<sdkmetrics::SdkMeterProvider> {
    let builder = sdkmetrics::SdkMeterProvider::builder().with_resource(resource());

    #[cfg(feature = "stdout")]
    let builder = {
        let reader =
            sdkmetrics::PeriodicReader::builder(opentelemetry_stdout::MetricExporter::default())
                .with_interval(EXPORT_INTERVAL)
                .build();
        builder.with_reader(reader)
    };

    #[cfg(feature = "honeycomb")]
    let builder = {
        use anyhow::Context;

        let settings = HoneycombSettings::from_env()?;
        let exporter = opentelemetry_otlp::MetricExporter::builder()
            .with_tonic()
            .with_tls_config(ClientTlsConfig::new().with_native_roots())
            .with_metadata(settings.metadata)
            .with_timeout(EXPORT_TIMEOUT)
            .with_compression(settings.compression)
            .with_endpoint(settings.endpoint)
            .with_protocol(Protocol::Grpc)
            .with_temporality(Temporality::Delta)
            .build()
            .context("failed to build metrics exporter")?;

        builder.with_periodic_exporter(exporter)
    };

    Ok(builder.build())
}

#[cfg(all(feature = "tracing", any(feature = "stdout", feature = "honeycomb")))]
fn batch_processor<E>(exporter: E) -> sdktrace::BatchSpanProcessor
where
    E: sdktrace::SpanExporter + 'static,
{
    sdktrace::BatchSpanProcessor::builder(exporter)
        .with_batch_config(
            sdktrace::BatchConfigBuilder::default()
                .with_scheduled_delay(EXPORT_INTERVAL)
                .with_max_queue_size(2048)
                .build(),
        )
        .build()
}

#[cfg(feature = "tracing")]
fn init_tracer() -> anyhow::Result<sdktrace::SdkTracerProvider> {
    let builder = sdktrace::SdkTracerProvider::builder().with_resource(resource());

    #[cfg(feature = "stdout")]
    let builder =
        builder.with_span_processor(batch_processor(opentelemetry_stdout::SpanExporter::default()));

    #[cfg(feature = "honeycomb")]
    let builder = {
        use anyhow::Context;

        let settings = HoneycombSettings::from_env()?;
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_tls_config(ClientTlsConfig::new().with_native_roots())
            .with_metadata(settings.metadata)
            .with_timeout(EXPORT_TIMEOUT)
            .with_compression(settings.compression)
            .with_endpoint(settings.endpoint)
            .with_protocol(Protocol::Grpc)
            .build()
            .context("failed to build tracer exporter")?;

        builder.with_span_processor(batch_processor(exporter))
    };

    Ok(builder.build())
}

/// Flushes and shuts down every exporter created by [`init_telemetry`].
///
/// Called once after the server has stopped accepting requests. Failures are
/// printed to stderr since the subscriber may already be gone.
pub fn shutdown_telemetry(_providers: TelemetryProviders) {
    #[cfg(feature = "tracing")]
    {
        if let Err(err) = _providers.tracer_provider.force_flush() {
            eprintln!("Error flushing traces: {:#?}", err);
        }
        if let Err(err) = _providers.tracer_provider.shutdown() {
            eprintln!("Error shutting down tracer: {:#?}", err);
        }
    }

    #[cfg(feature = "metrics")]
    {
        if let Err(err) = _providers.meter_provider.force_flush() {
            eprintln!("Error flushing metrics: {:#?}", err);
        }
        if let Err(err) = _providers.meter_provider.shutdown() {
            eprintln!("Error shutting down meter: {:#?}", err);
        }
    }
}

// Metric handles - only compiled when metrics feature is enabled
#[cfg(feature = "metrics")]
static CREATE_REQUESTS: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static LIST_REQUESTS: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static CREATE_ERRORS: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static CONSIGNMENTS_CREATED: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static LIST_SIZE: OnceLock<Histogram<f64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static REQUEST_DURATION_MS: OnceLock<Histogram<f64>> = OnceLock::new();

#[cfg(feature = "metrics")]
fn init_metric_handles(meter: Meter) {
    let _ = CREATE_REQUESTS.set(
        meter
            .u64_counter("create_requests")
            .with_description("Total CreateConsignment calls")
            .build(),
    );

    let _ = LIST_REQUESTS.set(
        meter
            .u64_counter("list_requests")
            .with_description("Total GetConsignments calls")
            .build(),
    );

    let _ = CREATE_ERRORS.set(
        meter
            .u64_counter("create_errors")
            .with_description("CreateConsignment calls rejected by the repository")
            .build(),
    );

    let _ = CONSIGNMENTS_CREATED.set(
        meter
            .u64_counter("consignments_created")
            .with_description("Consignments stored since process start")
            .build(),
    );

    let _ = LIST_SIZE.set(
        meter
            .f64_histogram("consignments_per_list")
            .with_description("Consignments returned per GetConsignments call")
            .build(),
    );

    let _ = REQUEST_DURATION_MS.set(
        meter
            .f64_histogram("request_duration")
            .with_unit("ms")
            .with_description("Handler duration per call")
            .build(),
    );
}

// Convenience functions that compile to no-ops when metrics are disabled
#[cfg(feature = "metrics")]
pub fn increment_create_requests() {
    if let Some(counter) = CREATE_REQUESTS.get() {
        counter.add(1, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_create_requests() {}

#[cfg(feature = "metrics")]
pub fn increment_list_requests() {
    if let Some(counter) = LIST_REQUESTS.get() {
        counter.add(1, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_list_requests() {}

#[cfg(feature = "metrics")]
pub fn increment_create_errors() {
    if let Some(counter) = CREATE_ERRORS.get() {
        counter.add(1, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_create_errors() {}

#[cfg(feature = "metrics")]
pub fn increment_consignments_created() {
    if let Some(counter) = CONSIGNMENTS_CREATED.get() {
        counter.add(1, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_consignments_created() {}

#[cfg(feature = "metrics")]
pub fn record_list_size(count: f64) {
    if let Some(histogram) = LIST_SIZE.get() {
        histogram.record(count, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn record_list_size(_count: f64) {}

#[cfg(feature = "metrics")]
pub fn record_request_duration(method: &'static str, duration_ms: f64) {
    if let Some(histogram) = REQUEST_DURATION_MS.get() {
        histogram.record(duration_ms, &[KeyValue::new("method", method)]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn record_request_duration(_method: &'static str, _duration_ms: f64) {}
