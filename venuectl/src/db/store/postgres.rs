//! PostgreSQL-backed store.
//!
//! Reads go through a pooled connection, writes through a short transaction. The
//! `reservations_slot_unique` index is the final arbiter for double bookings; its violation
//! surfaces as a [`DbError::UniqueViolation`].

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{debug, instrument};

use super::Store;
use crate::{
    db::{
        errors::{DbError, Result},
        handlers::{ContactMessages, Facilities, Repository, ReservationFilter, Reservations},
        models::{
            contact_messages::{ContactMessage, ContactMessageCreateDBRequest},
            facilities::{Facility, FacilityCreateDBRequest},
            reservations::{Reservation, ReservationCreateDBRequest, ReservationUpdateDBRequest},
        },
    },
    types::{FacilityId, ReservationId},
};

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Store for PostgresStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn list_facilities(&self) -> Result<Vec<Facility>> {
        let mut conn = self.pool.acquire().await?;
        Facilities::new(&mut conn).list().await
    }

    async fn get_facility(&self, id: FacilityId) -> Result<Option<Facility>> {
        let mut conn = self.pool.acquire().await?;
        Facilities::new(&mut conn).get_by_id(id).await
    }

    #[instrument(skip_all, err)]
    async fn seed_facilities(&self, defaults: &[FacilityCreateDBRequest]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        let inserted = {
            let mut repo = Facilities::new(&mut tx);
            repo.lock_catalog().await?;
            if repo.exists_any().await? {
                debug!("Facility catalog already populated");
                0
            } else {
                for facility in defaults {
                    repo.create(facility).await?;
                }
                defaults.len()
            }
        };

        tx.commit().await?;
        Ok(inserted)
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>> {
        let mut conn = self.pool.acquire().await?;
        Reservations::new(&mut conn).list(&ReservationFilter::default()).await
    }

    async fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>> {
        let mut conn = self.pool.acquire().await?;
        Reservations::new(&mut conn).get_by_id(id).await
    }

    async fn reservations_by_facility_and_date(&self, facility_id: FacilityId, date: NaiveDate) -> Result<Vec<Reservation>> {
        let mut conn = self.pool.acquire().await?;
        Reservations::new(&mut conn)
            .list(&ReservationFilter::slot_day(facility_id, date))
            .await
    }

    async fn insert_reservation(&self, request: &ReservationCreateDBRequest) -> Result<Reservation> {
        let mut tx = self.pool.begin().await?;
        let reservation = Reservations::new(&mut tx).create(request).await?;
        tx.commit().await?;
        Ok(reservation)
    }

    async fn update_reservation(&self, id: ReservationId, request: &ReservationUpdateDBRequest) -> Result<Option<Reservation>> {
        let mut tx = self.pool.begin().await?;
        let updated = match Reservations::new(&mut tx).update(id, request).await {
            Ok(reservation) => Some(reservation),
            Err(DbError::NotFound) => None,
            Err(e) => return Err(e),
        };
        tx.commit().await?;
        Ok(updated)
    }

    async fn delete_reservation(&self, id: ReservationId) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let deleted = Reservations::new(&mut tx).delete(id).await?;
        tx.commit().await?;
        Ok(deleted)
    }

    async fn insert_contact_message(&self, request: &ContactMessageCreateDBRequest) -> Result<ContactMessage> {
        let mut conn = self.pool.acquire().await?;
        ContactMessages::new(&mut conn).create(request).await
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>> {
        let mut conn = self.pool.acquire().await?;
        ContactMessages::new(&mut conn).list().await
    }
}

#[cfg(all(test, feature = "postgres-tests"))]
mod tests {
    use super::*;
    use crate::db::models::{
        facilities::default_facilities,
        reservations::{PricingTier, ReservationStatus},
    };
    use rust_decimal::Decimal;

    fn booking(facility_id: FacilityId, time: &str) -> ReservationCreateDBRequest {
        ReservationCreateDBRequest {
            facility_id,
            customer_name: "Jane Roe".to_string(),
            customer_email: "jane@example.com".to_string(),
            customer_phone: "5551234567".to_string(),
            date: NaiveDate::from_ymd_opt(2099, 6, 1).unwrap(),
            time: time.to_string(),
            duration: 2,
            party_size: 4,
            pricing_tier: PricingTier::GalacticVip,
            total_cost: Decimal::new(16200, 2),
            status: ReservationStatus::Confirmed,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_seed_once_in_order(pool: PgPool) {
        let store = PostgresStore::new(pool);
        assert_eq!(store.seed_facilities(&default_facilities()).await.unwrap(), 3);
        assert_eq!(store.seed_facilities(&default_facilities()).await.unwrap(), 0);

        let names: Vec<_> = store.list_facilities().await.unwrap().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["Quantum Bowling", "Nebula Billiards", "Galactic Arcade"]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_slot_index_rejects_double_booking(pool: PgPool) {
        let store = PostgresStore::new(pool);
        store.seed_facilities(&default_facilities()).await.unwrap();
        let facility = store.list_facilities().await.unwrap().remove(0);

        let created = store.insert_reservation(&booking(facility.id, "14:00")).await.unwrap();
        assert_eq!(created.pricing_tier, PricingTier::GalacticVip);
        assert_eq!(created.total_cost, Decimal::new(16200, 2));

        let err = store.insert_reservation(&booking(facility.id, "14:00")).await.unwrap_err();
        assert!(err.is_slot_taken());

        let day = store
            .reservations_by_facility_and_date(facility.id, created.date)
            .await
            .unwrap();
        assert_eq!(day.len(), 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_and_delete(pool: PgPool) {
        let store = PostgresStore::new(pool);
        store.seed_facilities(&default_facilities()).await.unwrap();
        let facility = store.list_facilities().await.unwrap().remove(0);
        let created = store.insert_reservation(&booking(facility.id, "10:00")).await.unwrap();

        let cancelled = store
            .update_reservation(created.id, &ReservationUpdateDBRequest::status(ReservationStatus::Cancelled))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert_eq!(cancelled.customer_name, created.customer_name);

        assert!(
            store
                .update_reservation(uuid::Uuid::new_v4(), &ReservationUpdateDBRequest::default())
                .await
                .unwrap()
                .is_none()
        );

        assert!(store.delete_reservation(created.id).await.unwrap());
        assert!(!store.delete_reservation(created.id).await.unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_contact_messages(pool: PgPool) {
        let store = PostgresStore::new(pool);
        let saved = store
            .insert_contact_message(&ContactMessageCreateDBRequest {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                message: "Do you host birthday parties?".to_string(),
            })
            .await
            .unwrap();

        let all = store.list_contact_messages().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, saved.id);
    }
}
