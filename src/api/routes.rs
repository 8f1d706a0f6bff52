//! HTTP API route definitions.

use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::MatchedPath,
    handler::HandlerWithoutStateExt,
    http::{header::CONTENT_TYPE, Method, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use super::handlers::{
    appointments, contact, doctors, handle_panic, health, index, metrics_text, not_found,
    services, AppState,
};
use crate::metrics;

/// Create the full application router: API, landing page and static assets.
pub fn create_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(index).fallback(not_found))
        // Health and metrics
        .route("/health", get(health).fallback(not_found))
        .route("/metrics", get(metrics_text).fallback(not_found))
        // Forms
        .route("/api/contact", post(contact).fallback(not_found))
        .route("/api/appointments", post(appointments).fallback(not_found))
        // Catalogs
        .route("/api/services", get(services).fallback(not_found))
        .route("/api/doctors", get(doctors).fallback(not_found))
        .fallback_service(assets)
        .layer(middleware::from_fn(track_latency))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Records per-route latency, keyed by the matched route pattern.
async fn track_latency(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "static".to_string());

    let response = next.run(req).await;
    metrics::record_http_latency(start, &endpoint);
    response
}
