//! Database models for reservations.

use crate::types::{FacilityId, ReservationId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Name of the unique index guarding one booking per (facility, date, time).
pub const SLOT_UNIQUE_CONSTRAINT: &str = "reservations_slot_unique";

/// Named price multiplier bucket. Unrecognised tiers are kept verbatim and priced at the base rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PricingTier {
    Explorer,
    Commander,
    GalacticVip,
    Other(String),
}

impl PricingTier {
    pub fn as_str(&self) -> &str {
        match self {
            PricingTier::Explorer => "explorer",
            PricingTier::Commander => "commander",
            PricingTier::GalacticVip => "galactic-vip",
            PricingTier::Other(s) => s,
        }
    }
}

impl From<String> for PricingTier {
    fn from(value: String) -> Self {
        match value.as_str() {
            "explorer" => PricingTier::Explorer,
            "commander" => PricingTier::Commander,
            "galactic-vip" => PricingTier::GalacticVip,
            _ => PricingTier::Other(value),
        }
    }
}

impl From<&str> for PricingTier {
    fn from(value: &str) -> Self {
        PricingTier::from(value.to_string())
    }
}

impl From<PricingTier> for String {
    fn from(value: PricingTier) -> Self {
        match value {
            PricingTier::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PricingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reservation lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    #[default]
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid reservation status '{0}'")]
pub struct InvalidStatus(pub String);

impl FromStr for ReservationStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for ReservationStatus {
    type Error = InvalidStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Database representation of a reservation
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Reservation {
    pub id: ReservationId,
    pub facility_id: FacilityId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub date: NaiveDate,
    /// Slot start, `HH:MM`
    pub time: String,
    pub duration: i32,
    pub party_size: i32,
    #[sqlx(try_from = "String")]
    pub pricing_tier: PricingTier,
    pub total_cost: Decimal,
    #[sqlx(try_from = "String")]
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// Request to insert a reservation. The price is already computed; id and created_at are assigned by the store.
#[derive(Debug, Clone)]
pub struct ReservationCreateDBRequest {
    pub facility_id: FacilityId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub duration: i32,
    pub party_size: i32,
    pub pricing_tier: PricingTier,
    pub total_cost: Decimal,
    pub status: ReservationStatus,
}

/// Update for a reservation. `None` leaves the column untouched.
///
/// Only the status can change; customer details and the slot stay as they were booked.
#[derive(Debug, Clone, Default)]
pub struct ReservationUpdateDBRequest {
    pub status: Option<ReservationStatus>,
}

impl ReservationUpdateDBRequest {
    pub fn status(status: ReservationStatus) -> Self {
        Self { status: Some(status) }
    }

    pub fn apply_to(&self, reservation: &mut Reservation) {
        if let Some(status) = self.status {
            reservation.status = status;
        }
    }
}

pub type ReservationDBResponse = Reservation;
