//! Storage abstraction shared by the booking core and the HTTP handlers.
//!
//! [`Store`] is the whole persistence contract the service relies on. Two implementations
//! exist and are interchangeable:
//!
//! - [`InMemoryStore`]: tables held in process memory, lost on restart. Default for
//!   development and used by the HTTP tests.
//! - [`PostgresStore`]: the relational schema under `migrations/`, accessed through the
//!   repositories in [`crate::db::handlers`].
//!
//! Which one is active is decided once at startup from [`crate::config::StoreConfig`].
//! Both enforce one reservation per (facility, date, time) on insert and report a clash as
//! [`DbError::UniqueViolation`](crate::db::errors::DbError::UniqueViolation) with the
//! [`SLOT_UNIQUE_CONSTRAINT`](crate::db::models::reservations::SLOT_UNIQUE_CONSTRAINT) name.

use chrono::NaiveDate;

use crate::{
    db::{
        errors::Result,
        models::{
            contact_messages::{ContactMessage, ContactMessageCreateDBRequest},
            facilities::{Facility, FacilityCreateDBRequest},
            reservations::{Reservation, ReservationCreateDBRequest, ReservationUpdateDBRequest},
        },
    },
    types::{FacilityId, ReservationId},
};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryStore;
pub use postgres::PostgresStore;

#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Short name of the backend, for logs.
    fn backend(&self) -> &'static str;

    /// All facilities in insertion order.
    async fn list_facilities(&self) -> Result<Vec<Facility>>;

    async fn get_facility(&self, id: FacilityId) -> Result<Option<Facility>>;

    /// Insert `defaults` only if the catalog is empty. Returns how many rows were written.
    ///
    /// The emptiness check and the inserts are atomic with respect to other seeders.
    async fn seed_facilities(&self, defaults: &[FacilityCreateDBRequest]) -> Result<usize>;

    /// All reservations, oldest first.
    async fn list_reservations(&self) -> Result<Vec<Reservation>>;

    async fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>>;

    async fn reservations_by_facility_and_date(&self, facility_id: FacilityId, date: NaiveDate) -> Result<Vec<Reservation>>;

    /// Persist a new reservation with a fresh id and creation timestamp.
    async fn insert_reservation(&self, request: &ReservationCreateDBRequest) -> Result<Reservation>;

    /// Merge the supplied fields into an existing reservation. `None` if the id is unknown.
    async fn update_reservation(&self, id: ReservationId, request: &ReservationUpdateDBRequest) -> Result<Option<Reservation>>;

    /// `true` if a reservation existed and was removed.
    async fn delete_reservation(&self, id: ReservationId) -> Result<bool>;

    async fn insert_contact_message(&self, request: &ContactMessageCreateDBRequest) -> Result<ContactMessage>;

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>>;
}
