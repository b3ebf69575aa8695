//! Database repository for the facility catalog.

use crate::{
    db::{
        errors::Result,
        models::facilities::{Facility, FacilityCreateDBRequest, FacilityDBResponse},
    },
    types::FacilityId,
};
use sqlx::PgConnection;
use tracing::instrument;

const FACILITY_COLUMNS: &str = "id, name, facility_type, description, capacity, hourly_rate, created_at";

pub struct Facilities<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Facilities<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    pub async fn create(&mut self, request: &FacilityCreateDBRequest) -> Result<FacilityDBResponse> {
        let facility = sqlx::query_as::<_, Facility>(&format!(
            r#"
            INSERT INTO facilities (name, facility_type, description, capacity, hourly_rate)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {FACILITY_COLUMNS}
            "#
        ))
        .bind(&request.name)
        .bind(request.facility_type.as_str())
        .bind(&request.description)
        .bind(request.capacity)
        .bind(request.hourly_rate)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(facility)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_id(&mut self, id: FacilityId) -> Result<Option<FacilityDBResponse>> {
        let facility = sqlx::query_as::<_, Facility>(&format!("SELECT {FACILITY_COLUMNS} FROM facilities WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(facility)
    }

    /// All facilities in insertion order
    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<FacilityDBResponse>> {
        let facilities = sqlx::query_as::<_, Facility>(&format!("SELECT {FACILITY_COLUMNS} FROM facilities ORDER BY seq ASC"))
            .fetch_all(&mut *self.db)
            .await?;

        Ok(facilities)
    }

    #[instrument(skip(self), err)]
    pub async fn exists_any(&mut self) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM facilities LIMIT 1)")
            .fetch_one(&mut *self.db)
            .await?;

        Ok(exists)
    }

    /// Serialize concurrent seeders for the rest of the transaction.
    #[instrument(skip(self), err)]
    pub async fn lock_catalog(&mut self) -> Result<()> {
        sqlx::query("LOCK TABLE facilities IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *self.db)
            .await?;
        Ok(())
    }
}
