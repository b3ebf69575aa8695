//! Database repository for contact form submissions. Write-mostly.

use crate::db::{
    errors::Result,
    models::contact_messages::{ContactMessage, ContactMessageCreateDBRequest, ContactMessageDBResponse},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct ContactMessages<'c> {
    db: &'c mut PgConnection,
}

impl<'c> ContactMessages<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), err)]
    pub async fn create(&mut self, request: &ContactMessageCreateDBRequest) -> Result<ContactMessageDBResponse> {
        let message = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, message, created_at
            "#,
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.message)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(message)
    }

    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<ContactMessageDBResponse>> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            "SELECT id, name, email, message, created_at FROM contact_messages ORDER BY seq ASC",
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(messages)
    }
}
