//! Prometheus metrics setup and metric definitions

use metrics::{counter, describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> Result<PrometheusHandle, BuildError> {
    // Latency buckets in seconds, with sub-millisecond resolution for fast lookups
    let buckets = vec![
        0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets(&buckets)?
        .install_recorder()
}

/// Register metric descriptions and emit initial zero values so the
/// exposition output carries HELP/TYPE lines from startup.
pub fn describe_metrics() {
    describe_counter!("meatsafe_http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "meatsafe_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "meatsafe_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );

    describe_counter!("meatsafe_auth_login_total", "Total number of login attempts");
    describe_counter!(
        "meatsafe_seizures_recorded_total",
        "Total number of seizure records created"
    );

    counter!("meatsafe_auth_login_total", "result" => "success").absolute(0);
    counter!("meatsafe_auth_login_total", "result" => "failure").absolute(0);
}
