//! Booking core: availability, pricing and the reservation lifecycle.
//!
//! [`BookingService`] owns the one-booking-per-slot rule. Creation runs
//! validate → facility lookup → conflict check → price → insert, and the conflict check and
//! insert happen while holding an async mutex keyed by (facility, date). Requests for
//! different facilities or days never wait on each other.
//!
//! The in-process lock only serializes requests handled by this process. With the Postgres
//! store the `reservations_slot_unique` index backs it up across instances; a violation of
//! that index is reported as [`Error::Conflict`] just like a clash found by the check.

pub mod pricing;
pub mod slots;

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::{
    api::models::reservations::{ReservationCreate, ValidReservation},
    db::{
        models::{
            facilities::Facility,
            reservations::{Reservation, ReservationStatus, ReservationUpdateDBRequest},
        },
        store::Store,
    },
    errors::{Error, Result},
    types::{FacilityId, ReservationId, abbrev_uuid},
};
use slots::{TimeSlot, slot_calendar};

pub const SLOT_TAKEN_MESSAGE: &str = "This time slot is already booked";

type SlotDay = (FacilityId, NaiveDate);

/// Today's date in the venue's (process-local) time zone.
pub fn venue_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn Store>,
    slot_locks: Arc<SlotLocks>,
}

impl BookingService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            slot_locks: Arc::new(DashMap::new()),
        }
    }

    pub async fn list_facilities(&self) -> Result<Vec<Facility>> {
        Ok(self.store.list_facilities().await?)
    }

    /// Slot calendar for one facility and day. Unknown facilities simply have no bookings.
    #[instrument(skip(self), fields(facility_id = %abbrev_uuid(&facility_id)), err)]
    pub async fn availability(&self, facility_id: FacilityId, date: NaiveDate) -> Result<Vec<TimeSlot>> {
        let reservations = self.store.reservations_by_facility_and_date(facility_id, date).await?;
        Ok(slot_calendar(&reservations))
    }

    /// Validate against today's date and book.
    pub async fn create_reservation(&self, request: ReservationCreate) -> Result<Reservation> {
        let valid = request.validate(venue_today())?;
        self.book(valid).await
    }

    /// Book an already-validated request.
    #[instrument(
        skip_all,
        fields(facility_id = %request.facility_id, date = %request.date, time = %request.time),
        err
    )]
    pub async fn book(&self, request: ValidReservation) -> Result<Reservation> {
        let facility = self.find_facility(&request.facility_id).await?;
        let key = (facility.id, request.date);

        // Declared before `lock` so it runs once this request's reference is gone, also when
        // the future is dropped while waiting.
        let _cleanup = SlotLockCleanup {
            locks: &self.slot_locks,
            key,
        };
        let lock = self.slot_locks.entry(key).or_default().clone();
        let _guard = lock.lock().await;

        self.insert_if_free(&facility, request).await
    }

    /// Facility ids are opaque to clients; one that is not a UUID matches nothing.
    async fn find_facility(&self, raw_id: &str) -> Result<Facility> {
        let facility = match raw_id.parse::<FacilityId>() {
            Ok(id) => self.store.get_facility(id).await?,
            Err(_) => None,
        };
        facility.ok_or_else(|| Error::NotFound {
            resource: "Facility".to_string(),
            id: raw_id.to_string(),
        })
    }

    /// Conflict check and insert. Caller holds the slot-day lock.
    async fn insert_if_free(&self, facility: &Facility, request: ValidReservation) -> Result<Reservation> {
        let booked = self.store.reservations_by_facility_and_date(facility.id, request.date).await?;
        if booked.iter().any(|r| r.time == request.time) {
            debug!("Slot already taken");
            return Err(Error::Conflict {
                message: SLOT_TAKEN_MESSAGE.to_string(),
            });
        }

        let total_cost = pricing::price(facility.hourly_rate, &request.pricing_tier, Some(request.duration));
        let reservation = match self
            .store
            .insert_reservation(&request.into_db_request(facility.id, total_cost))
            .await
        {
            Ok(r) => r,
            Err(e) if e.is_slot_taken() => {
                return Err(Error::Conflict {
                    message: SLOT_TAKEN_MESSAGE.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            reservation_id = %abbrev_uuid(&reservation.id),
            total_cost = %reservation.total_cost,
            "Reservation created"
        );
        Ok(reservation)
    }

    pub async fn list_reservations(&self) -> Result<Vec<Reservation>> {
        Ok(self.store.list_reservations().await?)
    }

    pub async fn get_reservation(&self, id: ReservationId) -> Result<Reservation> {
        self.store.get_reservation(id).await?.ok_or_else(|| reservation_not_found(id))
    }

    /// Change a reservation's status. Any transition is allowed; the slot is not re-checked.
    #[instrument(skip(self), fields(reservation_id = %abbrev_uuid(&id)), err)]
    pub async fn update_status(&self, id: ReservationId, status: ReservationStatus) -> Result<Reservation> {
        let updated = self
            .store
            .update_reservation(id, &ReservationUpdateDBRequest::status(status))
            .await?
            .ok_or_else(|| reservation_not_found(id))?;

        info!(status = %updated.status, "Reservation status updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(reservation_id = %abbrev_uuid(&id)), err)]
    pub async fn delete_reservation(&self, id: ReservationId) -> Result<()> {
        if self.store.delete_reservation(id).await? {
            info!("Reservation deleted");
            Ok(())
        } else {
            Err(reservation_not_found(id))
        }
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.slot_locks.len()
    }
}

type SlotLocks = DashMap<SlotDay, Arc<Mutex<()>>>;

/// Drops a slot-day lock from the map once nothing else holds it.
struct SlotLockCleanup<'a> {
    locks: &'a SlotLocks,
    key: SlotDay,
}

impl Drop for SlotLockCleanup<'_> {
    fn drop(&mut self) {
        self.locks.remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

fn reservation_not_found(id: ReservationId) -> Error {
    Error::NotFound {
        resource: "Reservation".to_string(),
        id: id.to_string(),
    }
}
