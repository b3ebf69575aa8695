//! Database repository for reservations.

use crate::{
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::reservations::{Reservation, ReservationCreateDBRequest, ReservationDBResponse, ReservationUpdateDBRequest},
    },
    types::{FacilityId, ReservationId},
};
use chrono::NaiveDate;
use sqlx::PgConnection;
use tracing::instrument;

const RESERVATION_COLUMNS: &str = "id, facility_id, customer_name, customer_email, customer_phone, date, time, \
     duration, party_size, pricing_tier, total_cost, status, created_at";

/// Filter for listing reservations. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub facility_id: Option<FacilityId>,
    pub date: Option<NaiveDate>,
}

impl ReservationFilter {
    pub fn slot_day(facility_id: FacilityId, date: NaiveDate) -> Self {
        Self {
            facility_id: Some(facility_id),
            date: Some(date),
        }
    }
}

pub struct Reservations<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Reservations<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Reservations<'c> {
    type CreateRequest = ReservationCreateDBRequest;
    type UpdateRequest = ReservationUpdateDBRequest;
    type Response = ReservationDBResponse;
    type Id = ReservationId;
    type Filter = ReservationFilter;

    #[instrument(skip(self, request), fields(facility_id = %request.facility_id, date = %request.date, time = %request.time), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            r#"
            INSERT INTO reservations (
                facility_id, customer_name, customer_email, customer_phone, date, time,
                duration, party_size, pricing_tier, total_cost, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {RESERVATION_COLUMNS}
            "#
        ))
        .bind(request.facility_id)
        .bind(&request.customer_name)
        .bind(&request.customer_email)
        .bind(&request.customer_phone)
        .bind(request.date)
        .bind(&request.time)
        .bind(request.duration)
        .bind(request.party_size)
        .bind(request.pricing_tier.as_str())
        .bind(request.total_cost)
        .bind(request.status.as_str())
        .fetch_one(&mut *self.db)
        .await?;

        Ok(reservation)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let reservation = sqlx::query_as::<_, Reservation>(&format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(reservation)
    }

    #[instrument(skip(self), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            r#"
            SELECT {RESERVATION_COLUMNS}
            FROM reservations
            WHERE ($1::uuid IS NULL OR facility_id = $1)
              AND ($2::date IS NULL OR date = $2)
            ORDER BY seq ASC
            "#
        ))
        .bind(filter.facility_id)
        .bind(filter.date)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(reservations)
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns [`DbError::NotFound`] when no reservation has this id.
    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            r#"
            UPDATE reservations SET status = COALESCE($2, status)
            WHERE id = $1
            RETURNING {RESERVATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.status.map(|s| s.as_str()))
        .fetch_optional(&mut *self.db)
        .await?;

        reservation.ok_or(DbError::NotFound)
    }
}
