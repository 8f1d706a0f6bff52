//! HTTP API handlers.

use std::any::Any;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{error, info, instrument};

use crate::clinic::{
    self, AppointmentForm, ContactForm, Doctor, FormKind, Reply, Service, Submission,
};
use crate::config::Config;
use crate::error::{ApiError, ClinicError, GENERIC_FAILURE};
use crate::metrics;

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<Config>,
    /// Prometheus handle, present when a recorder was installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle so `/metrics` can render.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus text exposition.
pub async fn metrics_text(State(state): State<AppState>) -> Result<Response, ApiError> {
    let handle = state.metrics.as_ref().ok_or(ApiError::NotFound)?;

    Ok(([(CONTENT_TYPE, "text/plain; version=0.0.4")], handle.render()).into_response())
}

/// Landing page.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let page = tokio::fs::read_to_string(state.config.index_path())
        .await
        .map_err(ClinicError::from)?;

    Ok(Html(page))
}

/// Log an accepted submission as a single JSON record.
fn log_submission<T: Serialize>(form: FormKind, submission: &T) -> Result<(), ApiError> {
    let unexpected = |source: ClinicError| ApiError::Unexpected { form, source };

    let received_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| unexpected(e.into()))?;
    let record = serde_json::to_string(submission).map_err(|e| unexpected(e.into()))?;

    info!(%form, %received_at, submission = %record, "Form submission received");
    Ok(())
}

/// Contact form handler.
#[instrument(skip_all)]
pub async fn contact(
    State(state): State<AppState>,
    Submission(form): Submission<ContactForm>,
) -> Result<Json<Reply>, ApiError> {
    form.validate()
        .inspect_err(|_| metrics::inc_validation_failures(FormKind::Contact))?;

    log_submission(FormKind::Contact, &form)?;

    // Stand-in for delivering the message.
    tokio::time::sleep(state.config.contact_delay()).await;

    metrics::inc_form_accepted(FormKind::Contact);
    Ok(Json(Reply::success(FormKind::Contact.success_message())))
}

/// Appointment booking handler.
#[instrument(skip_all)]
pub async fn appointments(
    State(state): State<AppState>,
    Submission(form): Submission<AppointmentForm>,
) -> Result<Json<Reply>, ApiError> {
    form.validate()
        .inspect_err(|_| metrics::inc_validation_failures(FormKind::Appointment))?;

    log_submission(FormKind::Appointment, &form)?;

    // Stand-in for booking the slot.
    tokio::time::sleep(state.config.appointment_delay()).await;

    metrics::inc_form_accepted(FormKind::Appointment);
    Ok(Json(Reply::success(FormKind::Appointment.success_message())))
}

/// Service listing.
pub async fn services() -> Json<&'static [Service]> {
    Json(clinic::services())
}

/// Doctor listing.
pub async fn doctors() -> Json<&'static [Doctor]> {
    Json(clinic::doctors())
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Turns a handler panic into the generic 500 body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(%detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Reply::failure(GENERIC_FAILURE)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_state_starts_without_metrics() {
        let state = AppState::default();
        assert!(state.metrics.is_none());
        assert_eq!(state.config.port, 3000);
    }

    #[test]
    fn panic_becomes_generic_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
