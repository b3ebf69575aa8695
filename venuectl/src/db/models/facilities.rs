//! Database models for bookable facilities.

use crate::types::FacilityId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of facility. Stored as free text so new kinds can be added without a migration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FacilityType {
    Bowling,
    Billiards,
    Arcade,
    Other(String),
}

impl FacilityType {
    pub fn as_str(&self) -> &str {
        match self {
            FacilityType::Bowling => "bowling",
            FacilityType::Billiards => "billiards",
            FacilityType::Arcade => "arcade",
            FacilityType::Other(s) => s,
        }
    }
}

impl From<String> for FacilityType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "bowling" => FacilityType::Bowling,
            "billiards" => FacilityType::Billiards,
            "arcade" => FacilityType::Arcade,
            _ => FacilityType::Other(value),
        }
    }
}

impl From<FacilityType> for String {
    fn from(value: FacilityType) -> Self {
        match value {
            FacilityType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database representation of a facility
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Facility {
    pub id: FacilityId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub facility_type: FacilityType,
    pub description: String,
    pub capacity: i32,
    pub hourly_rate: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Request to create a new facility
#[derive(Debug, Clone)]
pub struct FacilityCreateDBRequest {
    pub name: String,
    pub facility_type: FacilityType,
    pub description: String,
    pub capacity: i32,
    pub hourly_rate: Decimal,
}

pub type FacilityDBResponse = Facility;

/// The catalog every fresh venue starts with.
pub fn default_facilities() -> Vec<FacilityCreateDBRequest> {
    vec![
        FacilityCreateDBRequest {
            name: "Quantum Bowling".to_string(),
            facility_type: FacilityType::Bowling,
            description: "20 state-of-the-art lanes with holographic scoring systems and cosmic lighting effects".to_string(),
            capacity: 8,
            hourly_rate: Decimal::new(4500, 2),
        },
        FacilityCreateDBRequest {
            name: "Nebula Billiards".to_string(),
            facility_type: FacilityType::Billiards,
            description: "12 premium tables with electromagnetic cue technology and asteroid-inspired designs".to_string(),
            capacity: 4,
            hourly_rate: Decimal::new(3500, 2),
        },
        FacilityCreateDBRequest {
            name: "Galactic Arcade".to_string(),
            facility_type: FacilityType::Arcade,
            description: "100+ cutting-edge games featuring VR, AR, and classic arcade experiences".to_string(),
            capacity: 20,
            hourly_rate: Decimal::new(2500, 2),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facility_type_round_trips_unknown_kinds() {
        let kind = FacilityType::from("laser-tag".to_string());
        assert_eq!(kind, FacilityType::Other("laser-tag".to_string()));
        assert_eq!(String::from(kind), "laser-tag");
        assert_eq!(FacilityType::from("arcade".to_string()), FacilityType::Arcade);
    }

    #[test]
    fn test_default_catalog() {
        let defaults = default_facilities();
        let kinds: Vec<_> = defaults.iter().map(|f| f.facility_type.clone()).collect();
        assert_eq!(kinds, vec![FacilityType::Bowling, FacilityType::Billiards, FacilityType::Arcade]);
        assert_eq!(defaults[0].hourly_rate.to_string(), "45.00");
        assert!(defaults.iter().all(|f| f.capacity > 0));
    }
}
