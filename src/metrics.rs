//! Prometheus metrics for form traffic, request latency and page effects.
//!
//! This module provides metrics for:
//! - HTTP request latency
//! - Contact and appointment submissions
//! - Validation failures
//! - Elements revealed and count-up animations completed

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::clinic::FormKind;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Contact submissions counter metric name.
pub const METRIC_CONTACT_SUBMISSIONS: &str = "contact_submissions_total";
/// Appointment bookings counter metric name.
pub const METRIC_APPOINTMENT_BOOKINGS: &str = "appointment_bookings_total";
/// Validation failures counter metric name.
pub const METRIC_VALIDATION_FAILURES: &str = "form_validation_failures_total";
/// Revealed elements counter metric name.
pub const METRIC_ELEMENTS_REVEALED: &str = "elements_revealed_total";
/// Completed count-up animations counter metric name.
pub const METRIC_COUNT_UPS_COMPLETED: &str = "count_ups_completed_total";

/// Install the Prometheus recorder and register metric descriptions.
///
/// The returned handle renders the text exposition for `/metrics`.
pub fn install() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    describe_counter!(
        METRIC_CONTACT_SUBMISSIONS,
        "Total number of accepted contact form submissions"
    );
    describe_counter!(
        METRIC_APPOINTMENT_BOOKINGS,
        "Total number of accepted appointment bookings"
    );
    describe_counter!(
        METRIC_VALIDATION_FAILURES,
        "Total number of form submissions rejected for missing fields"
    );
    describe_counter!(
        METRIC_ELEMENTS_REVEALED,
        "Total number of page elements revealed"
    );
    describe_counter!(
        METRIC_COUNT_UPS_COMPLETED,
        "Total number of stat count-up animations completed"
    );

    debug!("Metrics initialized");
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint.to_string()).record(latency_ms);
}

/// Increment the accepted-submission counter for a form.
pub fn inc_form_accepted(form: FormKind) {
    match form {
        FormKind::Contact => counter!(METRIC_CONTACT_SUBMISSIONS).increment(1),
        FormKind::Appointment => counter!(METRIC_APPOINTMENT_BOOKINGS).increment(1),
    }
}

/// Increment validation failures counter.
pub fn inc_validation_failures(form: FormKind) {
    counter!(METRIC_VALIDATION_FAILURES, "form" => form.to_string()).increment(1);
}

/// Increment revealed elements counter.
pub fn inc_elements_revealed() {
    counter!(METRIC_ELEMENTS_REVEALED).increment(1);
}

/// Increment completed count-ups counter.
pub fn inc_count_ups_completed() {
    counter!(METRIC_COUNT_UPS_COMPLETED).increment(1);
}
