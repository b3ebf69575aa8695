//! Repository implementations for the relational store.
//!
//! Each repository wraps a borrowed `PgConnection` (usually a transaction) and provides
//! strongly-typed queries returning records from [`crate::db::models`]:
//!
//! - [`Facilities`]: Facility catalog reads and seeding
//! - [`Reservations`]: Reservation CRUD, implements [`Repository`]
//! - [`ContactMessages`]: Contact form inserts
//!
//! ```ignore
//! use venuectl::db::handlers::{Reservations, Repository};
//!
//! let mut tx = pool.begin().await?;
//! let mut repo = Reservations::new(&mut tx);
//! let all = repo.list(&Default::default()).await?;
//! tx.commit().await?;
//! ```

pub mod contact_messages;
pub mod facilities;
pub mod repository;
pub mod reservations;

pub use contact_messages::ContactMessages;
pub use facilities::Facilities;
pub use repository::Repository;
pub use reservations::{ReservationFilter, Reservations};
