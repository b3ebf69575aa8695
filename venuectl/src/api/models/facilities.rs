//! API response model for facilities.

use crate::{
    db::models::facilities::{FacilityDBResponse, FacilityType},
    types::FacilityId,
};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// A bookable facility.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacilityResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: FacilityId,
    #[schema(example = "Quantum Bowling")]
    pub name: String,
    /// Facility kind, e.g. `bowling`, `billiards`, `arcade`
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "bowling")]
    pub facility_type: FacilityType,
    pub description: String,
    /// Maximum people per booking
    pub capacity: i32,
    /// Base price per hour, two decimal places
    #[schema(value_type = String, example = "45.00")]
    pub hourly_rate: Decimal,
}

impl From<FacilityDBResponse> for FacilityResponse {
    fn from(db: FacilityDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            facility_type: db.facility_type,
            description: db.description,
            capacity: db.capacity,
            hourly_rate: db.hourly_rate,
        }
    }
}
