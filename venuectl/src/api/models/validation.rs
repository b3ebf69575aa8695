//! Shared request validation helpers.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{Error, FieldError};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub const INVALID_EMAIL: &str = "Please enter a valid email address";

/// Loose address syntax check: something, an `@`, and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Accumulates field failures so a request reports every problem at once.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.push(field, message);
        }
    }

    pub fn require_non_empty(&mut self, value: &str, field: &str, message: &str) {
        self.check(!value.trim().is_empty(), field, message);
    }

    pub fn require_email(&mut self, value: &str, field: &str) {
        self.check(is_valid_email(value), field, INVALID_EMAIL);
    }

    /// `Ok(value)` when nothing failed, otherwise a validation error listing every field.
    pub fn finish<T>(self, value: T) -> Result<T, Error> {
        if self.0.is_empty() { Ok(value) } else { Err(Error::invalid_fields(self.0)) }
    }
}

/// JSON body extractor that reports unreadable bodies as 400 validation errors.
///
/// A missing or mistyped field is reported against that field, like any other failed check.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await.map_err(rejection_to_error)?;
        serde_path_to_error::deserialize(body).map(ApiJson).map_err(shape_error)
    }
}

static MISSING_FIELD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^missing field `([^`]+)`").expect("missing field pattern is valid"));

/// Map a deserialization failure onto the field it happened at.
fn shape_error(err: serde_path_to_error::Error<serde_json::Error>) -> Error {
    let at_root = err.path().iter().next().is_none();
    let path = err.path().to_string();
    let detail = err.into_inner().to_string();

    if !at_root {
        return Error::invalid_fields(vec![FieldError::new(path, format!("Invalid value: {detail}"))]);
    }
    match MISSING_FIELD_RE.captures(&detail) {
        Some(caps) => Error::invalid_fields(vec![FieldError::new(&caps[1], format!("{} is required", &caps[1]))]),
        None => Error::bad_request(format!("Invalid request body: {detail}")),
    }
}

fn rejection_to_error(rejection: JsonRejection) -> Error {
    let message = match &rejection {
        JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON".to_string(),
        JsonRejection::MissingJsonContentType(_) => "Expected request with `Content-Type: application/json`".to_string(),
        other => other.body_text(),
    };
    Error::bad_request(message)
}
