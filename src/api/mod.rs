//! HTTP API module: landing page, form endpoints, catalogs, health and metrics.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
