use crate::AppState;
use crate::api::models::facilities::FacilityResponse;
use crate::api::models::reservations::parse_date;
use crate::booking::slots::{TimeSlot, slot_calendar};
use crate::errors::Result;
use crate::types::FacilityId;
use axum::{
    Json,
    extract::{Path, State},
};

#[utoipa::path(
    get,
    path = "/facilities",
    tag = "facilities",
    summary = "List facilities",
    responses(
        (status = 200, description = "Every bookable facility, in catalog order", body = Vec<FacilityResponse>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_facilities(State(state): State<AppState>) -> Result<Json<Vec<FacilityResponse>>> {
    let facilities = state.bookings.list_facilities().await?;
    Ok(Json(facilities.into_iter().map(FacilityResponse::from).collect()))
}

/// Hourly slots for one facility and day. A facility with no bookings, one that does not
/// exist, or a path that names no real facility or date reports every slot as available.
#[utoipa::path(
    get,
    path = "/availability/{facility_id}/{date}",
    tag = "facilities",
    summary = "Get availability",
    params(
        ("facility_id" = String, Path, description = "Facility ID"),
        ("date" = String, Path, description = "Day to check, `YYYY-MM-DD`")
    ),
    responses(
        (status = 200, description = "Thirteen hourly slots from 10:00 to 22:00", body = Vec<TimeSlot>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_availability(
    State(state): State<AppState>,
    Path((facility_id, date)): Path<(String, String)>,
) -> Result<Json<Vec<TimeSlot>>> {
    match (facility_id.parse::<FacilityId>(), parse_date(&date)) {
        (Ok(facility_id), Some(date)) => Ok(Json(state.bookings.availability(facility_id, date).await?)),
        _ => {
            tracing::debug!(%facility_id, %date, "Path matches no bookable slot-day, every slot is open");
            Ok(Json(slot_calendar(&[])))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{FUTURE_DATE, create_test_app, first_facility_id, reservation_body};
    use axum::http::StatusCode;
    use serde_json::Value;
    use uuid::Uuid;

    #[test_log::test(tokio::test)]
    async fn test_list_facilities_returns_seeded_catalog() {
        let (server, _) = create_test_app().await;

        let response = server.get("/api/facilities").await;
        response.assert_status_ok();
        let facilities: Vec<Value> = response.json();

        assert_eq!(facilities.len(), 3);
        assert_eq!(facilities[0]["name"], "Quantum Bowling");
        assert_eq!(facilities[0]["type"], "bowling");
        assert_eq!(facilities[0]["hourlyRate"], "45.00");
        assert_eq!(facilities[2]["type"], "arcade");
    }

    #[test_log::test(tokio::test)]
    async fn test_availability_grid() {
        let (server, _) = create_test_app().await;
        let facility_id = first_facility_id(&server).await;

        let response = server.get(&format!("/api/availability/{facility_id}/{FUTURE_DATE}")).await;
        response.assert_status_ok();
        let slots: Vec<Value> = response.json();

        let times: Vec<&str> = slots.iter().map(|s| s["time"].as_str().unwrap()).collect();
        assert_eq!(
            times,
            vec![
                "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00", "18:00", "19:00", "20:00",
                "21:00", "22:00"
            ]
        );
        assert!(slots.iter().all(|s| s["available"] == true));
        assert_eq!(slots[0]["displayTime"], "10:00 AM");
        assert_eq!(slots[3]["displayTime"], "1:00 PM");
    }

    #[test_log::test(tokio::test)]
    async fn test_booked_slot_is_unavailable_only_on_that_day() {
        let (server, _) = create_test_app().await;
        let facility_id = first_facility_id(&server).await;

        server
            .post("/api/reservations")
            .json(&reservation_body(facility_id, "14:00"))
            .await
            .assert_status(StatusCode::CREATED);

        let slots: Vec<Value> = server
            .get(&format!("/api/availability/{facility_id}/{FUTURE_DATE}"))
            .await
            .json();
        let taken: Vec<&str> = slots
            .iter()
            .filter(|s| s["available"] == false)
            .map(|s| s["time"].as_str().unwrap())
            .collect();
        assert_eq!(taken, vec!["14:00"]);

        let next_day: Vec<Value> = server.get(&format!("/api/availability/{facility_id}/2099-01-02")).await.json();
        assert!(next_day.iter().all(|s| s["available"] == true));
    }

    #[test_log::test(tokio::test)]
    async fn test_unknown_facility_has_open_grid() {
        let (server, _) = create_test_app().await;

        let slots: Vec<Value> = server
            .get(&format!("/api/availability/{}/{FUTURE_DATE}", Uuid::new_v4()))
            .await
            .json();
        assert_eq!(slots.len(), 13);
    }

    #[test_log::test(tokio::test)]
    async fn test_unmatched_availability_path_is_open_grid() {
        let (server, _) = create_test_app().await;
        let facility_id = first_facility_id(&server).await;

        for path in [
            format!("/api/availability/{facility_id}/01-01-2099"),
            format!("/api/availability/bowling-1/{FUTURE_DATE}"),
        ] {
            let response = server.get(&path).await;
            response.assert_status_ok();
            let slots: Vec<Value> = response.json();
            assert_eq!(slots.len(), 13, "path {path}");
            assert!(slots.iter().all(|s| s["available"] == true), "path {path}");
        }
    }
}
