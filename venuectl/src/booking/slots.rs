//! Hourly slot grid and availability calendar.

use serde::Serialize;
use utoipa::ToSchema;

use crate::db::models::reservations::Reservation;

/// First bookable hour of the day.
pub const OPENING_HOUR: u32 = 10;
/// Last bookable hour of the day (a slot starts at this hour).
pub const LAST_SLOT_HOUR: u32 = 22;

/// One bookable hour for a facility on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Slot start, `HH:MM`
    #[schema(example = "14:00")]
    pub time: String,
    pub available: bool,
    #[schema(example = "2:00 PM")]
    pub display_time: String,
}

fn slot_time(hour: u32) -> String {
    format!("{hour:02}:00")
}

/// 12-hour rendering. Hour 12 renders as `12:00 AM`.
fn display_time(hour: u32) -> String {
    if hour > 12 {
        format!("{}:00 PM", hour - 12)
    } else {
        format!("{hour}:00 AM")
    }
}

/// Every slot start on the grid, ascending.
pub fn slot_times() -> impl Iterator<Item = String> {
    (OPENING_HOUR..=LAST_SLOT_HOUR).map(slot_time)
}

/// Whether `time` is exactly one of the grid values.
pub fn is_slot_time(time: &str) -> bool {
    slot_times().any(|t| t == time)
}

/// Build the day's calendar from the reservations already held for one facility and date.
///
/// A slot is unavailable iff some reservation carries exactly its `time` string. The caller
/// is responsible for passing only reservations for the facility and date of interest.
pub fn slot_calendar(reservations: &[Reservation]) -> Vec<TimeSlot> {
    (OPENING_HOUR..=LAST_SLOT_HOUR)
        .map(|hour| {
            let time = slot_time(hour);
            let available = !reservations.iter().any(|r| r.time == time);
            TimeSlot {
                time,
                available,
                display_time: display_time(hour),
            }
        })
        .collect()
}
