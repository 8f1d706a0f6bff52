//! Clinic domain: the service and doctor catalogs, form submissions, and
//! the JSON envelope every API reply uses.

pub mod catalog;
pub mod forms;
pub mod types;

pub use catalog::{doctors, services};
pub use forms::{AppointmentForm, ContactForm, FormKind, Submission};
pub use types::{Doctor, Reply, Service};
