//! API request/response models for the contact form.

use super::validation::FieldErrors;
use crate::{
    db::models::contact_messages::{ContactMessageCreateDBRequest, ContactMessageDBResponse},
    errors::Error,
    types::ContactMessageId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MIN_MESSAGE_CHARS: usize = 10;

/// Request body for `POST /api/contact`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ContactMessageCreate {
    #[schema(example = "Jane")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// At least 10 characters
    #[schema(example = "Hello from space!")]
    pub message: String,
}

impl ContactMessageCreate {
    /// Check every field, reporting all failures together.
    pub fn validate(self) -> Result<ContactMessageCreateDBRequest, Error> {
        let mut errors = FieldErrors::new();
        errors.require_non_empty(&self.name, "name", "Name is required");
        errors.require_email(&self.email, "email");
        errors.check(
            self.message.chars().count() >= MIN_MESSAGE_CHARS,
            "message",
            "Message must be at least 10 characters long",
        );

        errors.finish(ContactMessageCreateDBRequest {
            name: self.name,
            email: self.email,
            message: self.message,
        })
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessageDBResponse> for ContactMessageResponse {
    fn from(db: ContactMessageDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            email: db.email,
            message: db.message,
            created_at: db.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactMessageCreate {
        ContactMessageCreate {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_message() {
        let request = form("Jane", "jane@example.com", "Hello from space!").validate().unwrap();
        assert_eq!(request.message, "Hello from space!");
    }

    #[test]
    fn test_exactly_ten_characters_is_enough() {
        assert!(form("Jane", "jane@example.com", "0123456789").validate().is_ok());
        assert!(form("Jane", "jane@example.com", "012345678").validate().is_err());
    }

    #[test]
    fn test_reports_every_field() {
        match form("", "jane", "short").validate() {
            Err(Error::Validation { errors, .. }) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["name", "email", "message"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
