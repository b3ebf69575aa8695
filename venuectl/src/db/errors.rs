//! Store-level errors shared by both backends.
//!
//! Constraint violations carry the constraint name so callers can tell a double booking
//! apart from other conflicts. The in-memory store reports the same constraint names the
//! Postgres schema defines.

use sqlx::error::ErrorKind;
use std::fmt;
use thiserror::Error;

use crate::db::models::reservations::SLOT_UNIQUE_CONSTRAINT;

/// Which constraint was violated, and the backend's description of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub name: Option<String>,
    pub table: Option<String>,
    pub detail: String,
}

impl Constraint {
    pub fn new(name: &str, table: &str, detail: impl Into<String>) -> Self {
        Self {
            name: Some(name.to_string()),
            table: Some(table.to_string()),
            detail: detail.into(),
        }
    }

    fn from_database(err: &dyn sqlx::error::DatabaseError) -> Self {
        Self {
            name: err.constraint().map(str::to_string),
            table: err.table().map(str::to_string),
            detail: err.message().to_string(),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.table, &self.name) {
            (Some(table), Some(name)) => write!(f, "{table}.{name}: {}", self.detail),
            (None, Some(name)) => write!(f, "{name}: {}", self.detail),
            _ => f.write_str(&self.detail),
        }
    }
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Entity not found")]
    NotFound,

    #[error("Unique constraint violation ({0})")]
    UniqueViolation(Constraint),

    #[error("Foreign key constraint violation ({0})")]
    ForeignKeyViolation(Constraint),

    #[error("Check constraint violation ({0})")]
    CheckViolation(Constraint),

    /// Anything the caller cannot act on: connection loss, pool timeouts, bad SQL.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DbError {
    /// True when the violation is the one-booking-per-slot constraint on reservations.
    pub fn is_slot_taken(&self) -> bool {
        matches!(
            self,
            DbError::UniqueViolation(Constraint { name: Some(name), .. }) if name == SLOT_UNIQUE_CONSTRAINT
        )
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => DbError::UniqueViolation(Constraint::from_database(&**db_err)),
                ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation(Constraint::from_database(&**db_err)),
                ErrorKind::CheckViolation => DbError::CheckViolation(Constraint::from_database(&**db_err)),
                _ => DbError::Other(anyhow::Error::from(err)),
            },
            _ => DbError::Other(anyhow::Error::from(err)),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
