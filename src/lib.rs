//! MedLife Clinic website backend.
//!
//! Serves the clinic's landing page and a small JSON API, and models the
//! page's scroll-triggered effects so they can be run and tested headlessly.
//!
//! # Endpoints
//!
//! ```text
//! GET  /                  landing page
//! POST /api/contact       {name, email, phone?, message}
//! POST /api/appointments  {name, email, phone, service, date?, message?}
//! GET  /api/services      4 fixed services
//! GET  /api/doctors       3 fixed doctors
//! GET  /health            liveness
//! GET  /metrics           Prometheus exposition
//! ```
//!
//! Anything else answers `404 {success:false, message:"Endpoint not found"}`.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`clinic`]: Catalogs, form payloads and the reply envelope
//! - [`api`]: HTTP router and handlers
//! - [`reveal`]: Viewport reveal controller and count-up animations
//! - [`metrics`]: Prometheus counters and histograms
//! - [`utils`]: Utility functions

pub mod api;
pub mod clinic;
pub mod config;
pub mod error;
pub mod metrics;
pub mod reveal;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, ClinicError, Result};
