//! In-memory store.
//!
//! Every table is a `Vec` behind its own [`RwLock`], so listing keeps insertion order and
//! readers never block each other. Data is lost on restart.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use super::Store;
use crate::{
    db::{
        errors::{Constraint, DbError, Result},
        models::{
            contact_messages::{ContactMessage, ContactMessageCreateDBRequest},
            facilities::{Facility, FacilityCreateDBRequest},
            reservations::{Reservation, ReservationCreateDBRequest, ReservationUpdateDBRequest, SLOT_UNIQUE_CONSTRAINT},
        },
    },
    types::{FacilityId, ReservationId},
};

#[derive(Clone, Default)]
pub struct InMemoryStore {
    facilities: Arc<RwLock<Vec<Facility>>>,
    reservations: Arc<RwLock<Vec<Reservation>>>,
    contact_messages: Arc<RwLock<Vec<ContactMessage>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Store for InMemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list_facilities(&self) -> Result<Vec<Facility>> {
        Ok(self.facilities.read().clone())
    }

    async fn get_facility(&self, id: FacilityId) -> Result<Option<Facility>> {
        Ok(self.facilities.read().iter().find(|f| f.id == id).cloned())
    }

    async fn seed_facilities(&self, defaults: &[FacilityCreateDBRequest]) -> Result<usize> {
        let mut facilities = self.facilities.write();
        if !facilities.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        facilities.extend(defaults.iter().map(|f| Facility {
            id: Uuid::new_v4(),
            name: f.name.clone(),
            facility_type: f.facility_type.clone(),
            description: f.description.clone(),
            capacity: f.capacity,
            hourly_rate: f.hourly_rate,
            created_at: now,
        }));
        Ok(defaults.len())
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>> {
        Ok(self.reservations.read().clone())
    }

    async fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>> {
        Ok(self.reservations.read().iter().find(|r| r.id == id).cloned())
    }

    async fn reservations_by_facility_and_date(&self, facility_id: FacilityId, date: NaiveDate) -> Result<Vec<Reservation>> {
        Ok(self
            .reservations
            .read()
            .iter()
            .filter(|r| r.facility_id == facility_id && r.date == date)
            .cloned()
            .collect())
    }

    async fn insert_reservation(&self, request: &ReservationCreateDBRequest) -> Result<Reservation> {
        if !self.facilities.read().iter().any(|f| f.id == request.facility_id) {
            return Err(DbError::ForeignKeyViolation(Constraint::new(
                "reservations_facility_id_fkey",
                "reservations",
                format!("facility {} does not exist", request.facility_id),
            )));
        }

        let mut reservations = self.reservations.write();
        if reservations
            .iter()
            .any(|r| r.facility_id == request.facility_id && r.date == request.date && r.time == request.time)
        {
            return Err(DbError::UniqueViolation(Constraint::new(
                SLOT_UNIQUE_CONSTRAINT,
                "reservations",
                format!("slot {} {} already booked", request.date, request.time),
            )));
        }

        let reservation = Reservation {
            id: Uuid::new_v4(),
            facility_id: request.facility_id,
            customer_name: request.customer_name.clone(),
            customer_email: request.customer_email.clone(),
            customer_phone: request.customer_phone.clone(),
            date: request.date,
            time: request.time.clone(),
            duration: request.duration,
            party_size: request.party_size,
            pricing_tier: request.pricing_tier.clone(),
            total_cost: request.total_cost,
            status: request.status,
            created_at: Utc::now(),
        };
        reservations.push(reservation.clone());
        Ok(reservation)
    }

    async fn update_reservation(&self, id: ReservationId, request: &ReservationUpdateDBRequest) -> Result<Option<Reservation>> {
        let mut reservations = self.reservations.write();
        Ok(reservations.iter_mut().find(|r| r.id == id).map(|existing| {
            request.apply_to(existing);
            existing.clone()
        }))
    }

    async fn delete_reservation(&self, id: ReservationId) -> Result<bool> {
        let mut reservations = self.reservations.write();
        let before = reservations.len();
        reservations.retain(|r| r.id != id);
        Ok(reservations.len() < before)
    }

    async fn insert_contact_message(&self, request: &ContactMessageCreateDBRequest) -> Result<ContactMessage> {
        let message = ContactMessage {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            email: request.email.clone(),
            message: request.message.clone(),
            created_at: Utc::now(),
        };
        self.contact_messages.write().push(message.clone());
        Ok(message)
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>> {
        Ok(self.contact_messages.read().clone())
    }
}
