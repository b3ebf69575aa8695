//! API request/response models for reservations.

use super::validation::FieldErrors;
use crate::{
    booking::{pricing::effective_duration, slots::is_slot_time},
    db::models::reservations::{PricingTier, ReservationCreateDBRequest, ReservationDBResponse, ReservationStatus},
    errors::Error,
    types::{FacilityId, ReservationId},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MIN_PHONE_CHARS: usize = 10;
pub const MIN_PARTY_SIZE: i32 = 1;
pub const MAX_PARTY_SIZE: i32 = 20;

/// Request body for `POST /api/reservations`.
///
/// Any `totalCost` sent by the client is ignored; the price is always computed server side.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreate {
    /// An id that matches no facility is reported as not found
    #[schema(example = "6b0f5c1e-2d4a-4c1b-9a57-3f0e2b8d9c10")]
    pub facility_id: String,
    #[schema(example = "John Doe")]
    pub customer_name: String,
    #[schema(example = "john@example.com")]
    pub customer_email: String,
    /// At least 10 characters
    #[schema(example = "1234567890")]
    pub customer_phone: String,
    /// `YYYY-MM-DD`, today or later
    #[schema(example = "2099-01-01")]
    pub date: String,
    /// Slot start on the hourly grid, `10:00` to `22:00`
    #[schema(example = "14:00")]
    pub time: String,
    /// Hours, defaults to 1
    pub duration: Option<i32>,
    #[schema(example = 4)]
    pub party_size: i32,
    /// `explorer`, `commander` or `galactic-vip`; any other value pays the base rate
    #[schema(example = "explorer")]
    pub pricing_tier: String,
    /// Defaults to `confirmed`
    pub status: Option<ReservationStatus>,
}

/// A reservation request that passed every field check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidReservation {
    /// As sent; resolved against the catalog when booking
    pub facility_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub date: NaiveDate,
    pub time: String,
    pub duration: i32,
    pub party_size: i32,
    pub pricing_tier: PricingTier,
    pub status: ReservationStatus,
}

impl ValidReservation {
    pub fn into_db_request(self, facility_id: FacilityId, total_cost: Decimal) -> ReservationCreateDBRequest {
        ReservationCreateDBRequest {
            facility_id,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            date: self.date,
            time: self.time,
            duration: self.duration,
            party_size: self.party_size,
            pricing_tier: self.pricing_tier,
            total_cost,
            status: self.status,
        }
    }
}

/// Strict `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

impl ReservationCreate {
    /// Check every field against the booking rules, with `today` as the earliest bookable date.
    pub fn validate(self, today: NaiveDate) -> Result<ValidReservation, Error> {
        let mut errors = FieldErrors::new();

        errors.require_email(&self.customer_email, "customerEmail");
        errors.check(
            self.customer_phone.chars().count() >= MIN_PHONE_CHARS,
            "customerPhone",
            "Please enter a valid phone number",
        );
        errors.check(self.party_size >= MIN_PARTY_SIZE, "partySize", "Party size must be at least 1");
        errors.check(self.party_size <= MAX_PARTY_SIZE, "partySize", "Party size cannot exceed 20");
        errors.check(is_slot_time(&self.time), "time", "Time must be an hourly slot between 10:00 and 22:00");
        errors.check(self.duration.is_none_or(|d| d >= 0), "duration", "Duration cannot be negative");

        let date = match parse_date(&self.date) {
            Some(d) if d >= today => d,
            Some(_) => {
                errors.push("date", "Date must be today or in the future");
                today
            }
            None => {
                errors.push("date", "Date must be in YYYY-MM-DD format");
                today
            }
        };

        errors.finish(ValidReservation {
            facility_id: self.facility_id,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            date,
            time: self.time,
            duration: effective_duration(self.duration),
            party_size: self.party_size,
            pricing_tier: PricingTier::from(self.pricing_tier),
            status: self.status.unwrap_or_default(),
        })
    }
}

/// Request body for `PATCH /api/reservations/{id}`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReservationStatusUpdate {
    /// `pending`, `confirmed` or `cancelled`
    #[schema(example = "cancelled")]
    pub status: String,
}

impl ReservationStatusUpdate {
    pub fn validate(&self) -> Result<ReservationStatus, Error> {
        self.status.parse::<ReservationStatus>().map_err(|_| {
            Error::invalid_fields(vec![crate::errors::FieldError::new(
                "status",
                "Status must be one of pending, confirmed, cancelled",
            )])
        })
    }
}

/// A stored reservation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ReservationId,
    #[schema(value_type = String, format = "uuid")]
    pub facility_id: FacilityId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[schema(value_type = String, example = "2099-01-01")]
    pub date: NaiveDate,
    pub time: String,
    pub duration: i32,
    pub party_size: i32,
    #[schema(value_type = String, example = "explorer")]
    pub pricing_tier: PricingTier,
    /// Computed from the facility rate, tier and duration
    #[schema(value_type = String, example = "36.00")]
    pub total_cost: Decimal,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<ReservationDBResponse> for ReservationResponse {
    fn from(db: ReservationDBResponse) -> Self {
        Self {
            id: db.id,
            facility_id: db.facility_id,
            customer_name: db.customer_name,
            customer_email: db.customer_email,
            customer_phone: db.customer_phone,
            date: db.date,
            time: db.time,
            duration: db.duration,
            party_size: db.party_size,
            pricing_tier: db.pricing_tier,
            total_cost: db.total_cost,
            status: db.status,
            created_at: db.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 15).unwrap()
    }

    fn request() -> ReservationCreate {
        serde_json::from_value(json!({
            "facilityId": Uuid::new_v4(),
            "customerName": "John Doe",
            "customerEmail": "john@example.com",
            "customerPhone": "1234567890",
            "date": "2030-06-15",
            "time": "10:00",
            "partySize": 4,
            "pricingTier": "explorer",
            "totalCost": "0.01"
        }))
        .unwrap()
    }

    fn failing_fields(request: ReservationCreate) -> Vec<String> {
        match request.validate(today()) {
            Err(Error::Validation { errors, .. }) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_applied() {
        let valid = request().validate(today()).unwrap();
        assert_eq!(valid.duration, 1);
        assert_eq!(valid.status, ReservationStatus::Confirmed);
        assert_eq!(valid.pricing_tier, PricingTier::Explorer);
        assert_eq!(valid.date, today());
    }

    #[test]
    fn test_zero_duration_means_one_hour() {
        let mut req = request();
        req.duration = Some(0);
        assert_eq!(req.validate(today()).unwrap().duration, 1);
    }

    #[test]
    fn test_party_size_bounds() {
        for (size, ok) in [(0, false), (1, true), (20, true), (21, false)] {
            let mut req = request();
            req.party_size = size;
            assert_eq!(req.validate(today()).is_ok(), ok, "party size {size}");
        }
    }

    #[test]
    fn test_past_date_rejected() {
        let mut req = request();
        req.date = "2030-06-14".to_string();
        assert_eq!(failing_fields(req), vec!["date"]);
    }

    #[test]
    fn test_malformed_date_rejected() {
        for bad in ["2030-6-15", "15/06/2030", "2030-02-30", ""] {
            let mut req = request();
            req.date = bad.to_string();
            assert_eq!(failing_fields(req), vec!["date"], "date {bad:?}");
        }
    }

    #[test]
    fn test_off_grid_time_rejected() {
        let mut req = request();
        req.time = "09:00".to_string();
        assert_eq!(failing_fields(req), vec!["time"]);
    }

    #[test]
    fn test_all_failures_reported() {
        let mut req = request();
        req.customer_email = "invalid-email".to_string();
        req.customer_phone = "123".to_string();
        req.party_size = 21;
        assert_eq!(failing_fields(req), vec!["customerEmail", "customerPhone", "partySize"]);
    }

    #[test]
    fn test_empty_name_and_tier_accepted() {
        let mut req = request();
        req.customer_name = String::new();
        req.pricing_tier = String::new();

        let valid = req.validate(today()).unwrap();
        assert_eq!(valid.pricing_tier, PricingTier::Other(String::new()));
        assert_eq!(valid.pricing_tier.multiplier(), Decimal::ONE);
    }

    #[test]
    fn test_facility_id_kept_verbatim() {
        let mut req = request();
        req.facility_id = "bowling-1".to_string();
        assert_eq!(req.validate(today()).unwrap().facility_id, "bowling-1");
    }

    #[test]
    fn test_status_update_parsing() {
        let update = ReservationStatusUpdate {
            status: "cancelled".to_string(),
        };
        assert_eq!(update.validate().unwrap(), ReservationStatus::Cancelled);

        let bad = ReservationStatusUpdate {
            status: "archived".to_string(),
        };
        assert!(matches!(bad.validate(), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_response_shape() {
        let valid = request().validate(today()).unwrap();
        let db = ReservationDBResponse {
            id: Uuid::new_v4(),
            facility_id: Uuid::new_v4(),
            customer_name: valid.customer_name.clone(),
            customer_email: valid.customer_email.clone(),
            customer_phone: valid.customer_phone.clone(),
            date: valid.date,
            time: valid.time.clone(),
            duration: valid.duration,
            party_size: valid.party_size,
            pricing_tier: PricingTier::GalacticVip,
            total_cost: Decimal::new(16200, 2),
            status: ReservationStatus::Pending,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(ReservationResponse::from(db)).unwrap();
        assert_eq!(json["date"], "2030-06-15");
        assert_eq!(json["pricingTier"], "galactic-vip");
        assert_eq!(json["totalCost"], "162.00");
        assert_eq!(json["status"], "pending");
        assert!(json.get("createdAt").is_some());
    }
}
