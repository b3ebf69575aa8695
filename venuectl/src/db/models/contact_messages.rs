use crate::types::ContactMessageId;
use chrono::{DateTime, Utc};

/// Database representation of a contact form submission
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ContactMessageCreateDBRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

pub type ContactMessageDBResponse = ContactMessage;
