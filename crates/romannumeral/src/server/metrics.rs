//! Prometheus metrics for the conversion server.
//!
//! All instruments live in a process-wide registry and are exposed at
//! `/metrics` in Prometheus text format. HTTP-level metrics are
//! recorded by the [`track_requests`] middleware; conversion outcome
//! metrics are recorded by the conversion handler.

use axum::{extract::Request, middleware::Next, response::Response};
use prometheus::{
    Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::LazyLock;
use std::time::Instant;

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Total number of requests, by method, endpoint and status.
static REQUEST_COUNTER: LazyLock<IntCounterVec> = LazyLock::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "roman_numeral_requests_total",
            "Total number of Roman numeral conversion requests",
        ),
        &["method", "endpoint", "status"],
    )
    .expect("valid metric definition");
    REGISTRY
        .register(Box::new(counter.clone()))
        .expect("metric registers once");
    counter
});

/// Request latency, by method and endpoint.
static REQUEST_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    let histogram = HistogramVec::new(
        HistogramOpts::new(
            "roman_numeral_request_duration_seconds",
            "Duration of Roman numeral conversion requests in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0]),
        &["method", "endpoint"],
    )
    .expect("valid metric definition");
    REGISTRY
        .register(Box::new(histogram.clone()))
        .expect("metric registers once");
    histogram
});

/// Total number of error responses, by class and endpoint.
static ERROR_COUNTER: LazyLock<IntCounterVec> = LazyLock::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "roman_numeral_errors_total",
            "Total number of errors in Roman numeral conversion",
        ),
        &["error_type", "endpoint"],
    )
    .expect("valid metric definition");
    REGISTRY
        .register(Box::new(counter.clone()))
        .expect("metric registers once");
    counter
});

/// Requests currently in flight.
static ACTIVE_REQUESTS: LazyLock<IntGauge> = LazyLock::new(|| {
    let gauge = IntGauge::new(
        "roman_numeral_active_requests",
        "Number of currently active requests",
    )
    .expect("valid metric definition");
    REGISTRY
        .register(Box::new(gauge.clone()))
        .expect("metric registers once");
    gauge
});

static CONVERSION_SUCCESS: LazyLock<IntCounter> = LazyLock::new(|| {
    let counter = IntCounter::new(
        "roman_numeral_conversions_success_total",
        "Total number of successful Roman numeral conversions",
    )
    .expect("valid metric definition");
    REGISTRY
        .register(Box::new(counter.clone()))
        .expect("metric registers once");
    counter
});

static CONVERSION_FAILURE: LazyLock<IntCounterVec> = LazyLock::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "roman_numeral_conversions_failure_total",
            "Total number of failed Roman numeral conversions",
        ),
        &["error_type"],
    )
    .expect("valid metric definition");
    REGISTRY
        .register(Box::new(counter.clone()))
        .expect("metric registers once");
    counter
});

/// Distribution of converted input values.
static INPUT_VALUES: LazyLock<Histogram> = LazyLock::new(|| {
    let histogram = Histogram::with_opts(
        HistogramOpts::new(
            "roman_numeral_input_values",
            "Distribution of input values for Roman numeral conversion",
        )
        .buckets(vec![1.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 2000.0, 3999.0]),
    )
    .expect("valid metric definition");
    REGISTRY
        .register(Box::new(histogram.clone()))
        .expect("metric registers once");
    histogram
});

/// Middleware recording request count, latency, error class and the
/// in-flight gauge for every response.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let endpoint = request.uri().path().to_string();

    ACTIVE_REQUESTS.inc();
    let start = Instant::now();

    let response = next.run(request).await;

    ACTIVE_REQUESTS.dec();

    let status = response.status();
    REQUEST_COUNTER
        .with_label_values(&[&method, &endpoint, status.as_str()])
        .inc();
    REQUEST_DURATION
        .with_label_values(&[&method, &endpoint])
        .observe(start.elapsed().as_secs_f64());

    if status.is_server_error() {
        ERROR_COUNTER
            .with_label_values(&["server_error", &endpoint])
            .inc();
    } else if status.is_client_error() {
        ERROR_COUNTER
            .with_label_values(&["client_error", &endpoint])
            .inc();
    }

    response
}

pub fn record_conversion_success(input_value: u16) {
    CONVERSION_SUCCESS.inc();
    INPUT_VALUES.observe(f64::from(input_value));
}

pub fn record_conversion_failure(error_type: &str) {
    CONVERSION_FAILURE.with_label_values(&[error_type]).inc();
}

/// Render the registry in Prometheus text exposition format.
pub fn render() -> Result<String, prometheus::Error> {
    // Touch the lazy instruments so they show up even before traffic.
    LazyLock::force(&ACTIVE_REQUESTS);
    LazyLock::force(&CONVERSION_SUCCESS);
    LazyLock::force(&REQUEST_COUNTER);
    LazyLock::force(&REQUEST_DURATION);
    LazyLock::force(&ERROR_COUNTER);
    LazyLock::force(&CONVERSION_FAILURE);
    LazyLock::force(&INPUT_VALUES);

    TextEncoder::new().encode_to_string(&REGISTRY.gather())
}
