//! Contact and appointment form submissions.

use axum::{
    async_trait,
    body::{Body, Bytes},
    extract::FromRequest,
    http::{header::CONTENT_TYPE, Request},
    Form, Json,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::Display;
use tracing::debug;

use crate::error::ApiError;

/// Which form a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FormKind {
    #[strum(serialize = "contact")]
    Contact,
    #[strum(serialize = "appointment")]
    Appointment,
}

impl FormKind {
    /// Acknowledgement sent once the submission is accepted.
    pub fn success_message(self) -> &'static str {
        match self {
            FormKind::Contact => "Thank you for your message! We will get back to you soon.",
            FormKind::Appointment => {
                "Appointment booked successfully! We will confirm your appointment shortly."
            }
        }
    }

    /// Message sent when handling the submission fails unexpectedly.
    pub fn failure_message(self) -> &'static str {
        match self {
            FormKind::Contact => {
                "An error occurred while sending your message. Please try again."
            }
            FormKind::Appointment => {
                "An error occurred while booking your appointment. Please try again."
            }
        }
    }
}

/// `POST /api/contact` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
}

/// `POST /api/appointments` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentForm {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub service: Option<String>,
    /// Preferred date, free text.
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
}

/// Accept any JSON scalar for a text field. Falsy values (`null`, `false`,
/// `0`, `""`) become `None`; other numbers and `true` keep their text form.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::Bool(true)) => Some("true".to_string()),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// A field counts as present only when it holds non-empty text.
fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, str::is_empty)
}

fn collect_missing(fields: &[(&'static str, &Option<String>)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| *name)
        .collect()
}

fn check(form: FormKind, missing: Vec<&'static str>) -> Result<(), ApiError> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation { form, missing })
    }
}

impl ContactForm {
    /// Names of required fields that are absent or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        collect_missing(&[
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ])
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        check(FormKind::Contact, self.missing_fields())
    }
}

impl AppointmentForm {
    /// Names of required fields that are absent or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        collect_missing(&[
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("service", &self.service),
        ])
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        check(FormKind::Appointment, self.missing_fields())
    }
}

/// How a request body is encoded, judged from its `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    UrlEncoded,
    Other,
}

fn body_kind<B>(req: &Request<B>) -> BodyKind {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    if mime == "application/x-www-form-urlencoded" {
        BodyKind::UrlEncoded
    } else if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else {
        BodyKind::Other
    }
}

/// Form body accepted as either JSON or `application/x-www-form-urlencoded`.
///
/// An empty body, or one in any other encoding, yields `T::default()` and
/// is reported through normal validation. A JSON or urlencoded body that
/// fails to decode is rejected with [`ApiError::MalformedBody`].
#[derive(Debug, Clone, Default)]
pub struct Submission<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Submission<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let kind = body_kind(&req);
        let method = req.method().clone();
        let content_type = req.headers().get(CONTENT_TYPE).cloned();
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;

        let (BodyKind::Json | BodyKind::UrlEncoded, Some(content_type)) = (kind, content_type)
        else {
            debug!(?kind, "No form payload, treating as empty");
            return Ok(Submission(T::default()));
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            debug!(?kind, "Empty form body, treating as empty");
            return Ok(Submission(T::default()));
        }

        let mut req = Request::new(Body::from(bytes));
        *req.method_mut() = method;
        req.headers_mut().insert(CONTENT_TYPE, content_type);
        let parsed = match kind {
            BodyKind::UrlEncoded => Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| value)
                .map_err(|rejection| rejection.body_text()),
            _ => Json::<T>::from_request(req, state)
                .await
                .map(|Json(value)| value)
                .map_err(|rejection| rejection.body_text()),
        };

        parsed.map(Submission).map_err(ApiError::MalformedBody)
    }
}
