//! # Telemetry
//!
//! Console logging is always on: a `tracing_subscriber` registry with an
//! [`EnvFilter`] (default `info`, override with `RUST_LOG`) and a pretty `fmt`
//! layer.
//!
//! OpenTelemetry export is opt-in through cargo features:
//!
//! - `traces`: export spans (handler spans, `tower-http` request spans).
//! - `metrics`: export request counters and computation histograms.
//! - `honeycomb`: OTLP/gRPC exporter to Honeycomb. Reads
//!   `HONEYCOMB_API_KEY`, `HONEYCOMB_DATASET`, `HONEYCOMB_ENDPOINT` and
//!   `HONEYCOMB_COMPRESSION`.
//! - `stdout`: print exported spans and metrics to stdout.
//!
//! Exporters require at least one of `traces` or `metrics`. Both exporters can
//! be enabled at the same time.
//!
//! ```bash
//! cargo run -p pidigits-server --features traces,metrics,honeycomb
//! cargo run -p pidigits-server --features traces,stdout
//! ```
//!
//! Events emitted outside of a span only reach the console, never an exporter.

#[cfg(all(feature = "honeycomb", not(any(feature = "traces", feature = "metrics"))))]
compile_error!(
    "The 'honeycomb' feature requires at least one of 'traces' or 'metrics' to be enabled."
);

#[cfg(all(feature = "stdout", not(any(feature = "traces", feature = "metrics"))))]
compile_error!("The 'stdout' feature requires at least one of 'traces' or 'metrics' to be enabled.");

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(all(feature = "honeycomb", any(feature = "metrics", feature = "traces")))]
use opentelemetry_otlp::{Compression, Protocol, WithExportConfig, WithTonicConfig};
#[cfg(all(feature = "honeycomb", feature = "metrics"))]
use opentelemetry_sdk::metrics::Temporality;
#[cfg(feature = "honeycomb")]
use tonic::metadata::MetadataMap;
#[cfg(all(feature = "honeycomb", any(feature = "metrics", feature = "traces")))]
use tonic::transport::ClientTlsConfig;

#[cfg(feature = "metrics")]
use opentelemetry::metrics::{Counter, Histogram, Meter};
#[cfg(feature = "metrics")]
use opentelemetry_sdk::metrics as sdkmetrics;
#[cfg(feature = "metrics")]
use std::sync::OnceLock;

#[cfg(any(feature = "metrics", feature = "traces"))]
use opentelemetry::{InstrumentationScope, KeyValue};
#[cfg(any(feature = "metrics", feature = "traces"))]
use opentelemetry_sdk::Resource;
#[cfg(any(feature = "metrics", feature = "traces"))]
use opentelemetry_semantic_conventions as semvcns;

#[cfg(feature = "traces")]
use opentelemetry::trace::TracerProvider;
#[cfg(feature = "traces")]
use opentelemetry_sdk::propagation::TraceContextPropagator;
#[cfg(feature = "traces")]
use opentelemetry_sdk::trace as sdktrace;

#[cfg(any(feature = "metrics", feature = "traces"))]
const SERVICE_NAME: &str = "pidigits";

/// Handles to the OpenTelemetry providers installed by [`init_telemetry`].
///
/// Empty unless `traces` or `metrics` is enabled.
pub struct TelemetryProviders {
    #[cfg(feature = "traces")]
    pub tracer_provider: sdktrace::SdkTracerProvider,
    #[cfg(feature = "metrics")]
    pub meter_provider: sdkmetrics::SdkMeterProvider,
}

impl TelemetryProviders {
    /// Flushes and shuts down every installed provider. Failures are printed
    /// to stderr since the subscriber may already be unusable.
    pub fn shutdown(self) {
        #[cfg(feature = "traces")]
        {
            if let Err(err) = self.tracer_provider.force_flush() {
                eprintln!("Error flushing traces: {err:#?}");
            }
            if let Err(err) = self.tracer_provider.shutdown() {
                eprintln!("Error shutting down tracer: {err:#?}");
            }
        }

        #[cfg(feature = "metrics")]
        {
            if let Err(err) = self.meter_provider.force_flush() {
                eprintln!("Error flushing metrics: {err:#?}");
            }
            if let Err(err) = self.meter_provider.shutdown() {
                eprintln!("Error shutting down meter: {err:#?}");
            }
        }
    }
}

pub fn init_telemetry() -> anyhow::Result<TelemetryProviders> {
    #[cfg(feature = "traces")]
    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

    #[cfg(feature = "traces")]
    let tracer_provider = init_tracer()?;

    #[cfg(feature = "metrics")]
    let meter_provider = init_metrics()?;

    #[cfg(any(feature = "metrics", feature = "traces"))]
    let scope = InstrumentationScope::builder(SERVICE_NAME)
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_schema_url(semvcns::SCHEMA_URL)
        .build();

    // Human-readable console output, independent of `opentelemetry_stdout`.
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

    #[cfg(feature = "traces")]
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
        #[cfg(feature = "traces")]
        tracer_provider,
        #[cfg(feature = "metrics")]
        meter_provider,
    })
}

/// Connection settings shared by the Honeycomb span and metric exporters.
#[cfg(all(feature = "honeycomb", any(feature = "metrics", feature = "traces")))]
struct Honeycomb {
    metadata: MetadataMap,
    endpoint: String,
    compression: Compression,
}

#[cfg(all(feature = "honeycomb", any(feature = "metrics", feature = "traces")))]
impl Honeycomb {
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

    fn tls() -> ClientTlsConfig {
        ClientTlsConfig::new().with_native_roots()
    }
}

#[cfg(any(feature = "metrics", feature = "traces"))]
fn resource() -> Resource {
    Resource::builder()
        .with_service_name(SERVICE_NAME)
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
        let reader = sdkmetrics::PeriodicReader::builder(
            opentelemetry_stdout::MetricExporter::default(),
        )
        .with_interval(std::time::Duration::from_secs(5))
        .build();
        builder.with_reader(reader)
    };

    #[cfg(feature = "honeycomb")]
    let builder = {
        use anyhow::Context;

        let honeycomb = Honeycomb::from_env()?;
        let exporter = opentelemetry_otlp::MetricExporter::builder()
            .with_tonic()
            .with_tls_config(Honeycomb::tls())
            .with_metadata(honeycomb.metadata)
            .with_timeout(std::time::Duration::from_secs(10))
            .with_compression(honeycomb.compression)
            .with_endpoint(honeycomb.endpoint)
            .with_protocol(Protocol::Grpc)
            .with_temporality(Temporality::Delta)
            .build()
            .context("failed to build metrics exporter")?;

        builder.with_periodic_exporter(exporter)
    };

    Ok(builder.build())
}

#[cfg(feature = "traces")]
fn batch_config() -> sdktrace::BatchConfig {
    sdktrace::BatchConfigBuilder::default()
        .with_scheduled_delay(std::time::Duration::from_secs(5))
        .with_max_queue_size(2048)
        .build()
}

#[cfg(feature = "traces")]
fn init_tracer() -> anyhow::Result<sdktrace::SdkTracerProvider> {
    let builder = sdktrace::SdkTracerProvider::builder().with_resource(resource());

    #[cfg(feature = "stdout")]
    let builder = {
        let batch =
            sdktrace::BatchSpanProcessor::builder(opentelemetry_stdout::SpanExporter::default())
                .with_batch_config(batch_config())
                .build();
        builder.with_span_processor(batch)
    };

    #[cfg(feature = "honeycomb")]
    let builder = {
        use anyhow::Context;

        let honeycomb = Honeycomb::from_env()?;
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_tls_config(Honeycomb::tls())
            .with_metadata(honeycomb.metadata)
            .with_timeout(std::time::Duration::from_secs(10))
            .with_compression(honeycomb.compression)
            .with_endpoint(honeycomb.endpoint)
            .with_protocol(Protocol::Grpc)
            .build()
            .context("failed to build tracer exporter")?;

        let batch = sdktrace::BatchSpanProcessor::builder(exporter)
            .with_batch_config(batch_config())
            .build();
        builder.with_span_processor(batch)
    };

    Ok(builder.build())
}

#[cfg(feature = "metrics")]
static REQUESTS: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static REQUEST_ERRORS: OnceLock<Counter<u64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static DIGITS_REQUESTED: OnceLock<Histogram<f64>> = OnceLock::new();
#[cfg(feature = "metrics")]
static COMPUTE_DURATION_MS: OnceLock<Histogram<f64>> = OnceLock::new();

#[cfg(feature = "metrics")]
fn init_metric_handles(meter: Meter) {
    let _ = REQUESTS.set(
        meter
            .u64_counter("requests")
            .with_description("Total pidigits requests")
            .build(),
    );

    let _ = REQUEST_ERRORS.set(
        meter
            .u64_counter("request_errors")
            .with_description("Rejected or failed pidigits requests, by status")
            .build(),
    );

    let _ = DIGITS_REQUESTED.set(
        meter
            .f64_histogram("digits_requested")
            .with_description("Precision requested per computation")
            .build(),
    );

    let _ = COMPUTE_DURATION_MS.set(
        meter
            .f64_histogram("compute_duration")
            .with_unit("ms")
            .with_description("Time spent inside the digit provider")
            .build(),
    );
}

// No-ops when metrics are disabled.
#[cfg(feature = "metrics")]
pub fn increment_requests() {
    if let Some(counter) = REQUESTS.get() {
        counter.add(1, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_requests() {}

#[cfg(feature = "metrics")]
pub fn increment_request_errors(status: u16) {
    if let Some(counter) = REQUEST_ERRORS.get() {
        counter.add(1, &[KeyValue::new("status", i64::from(status))]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn increment_request_errors(_status: u16) {}

#[cfg(feature = "metrics")]
pub fn record_digits_requested(digits: f64) {
    if let Some(histogram) = DIGITS_REQUESTED.get() {
        histogram.record(digits, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn record_digits_requested(_digits: f64) {}

#[cfg(feature = "metrics")]
pub fn record_compute_duration(duration_ms: f64) {
    if let Some(histogram) = COMPUTE_DURATION_MS.get() {
        histogram.record(duration_ms, &[]);
    }
}

#[cfg(not(feature = "metrics"))]
pub fn record_compute_duration(_duration_ms: f64) {}
