use crate::AppState;
use crate::api::models::reservations::{ReservationCreate, ReservationResponse, ReservationStatusUpdate};
use crate::api::models::validation::ApiJson;
use crate::errors::{Error, Result};
use crate::types::ReservationId;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

fn parse_reservation_id(raw: &str) -> Result<ReservationId> {
    raw.parse().map_err(|_| Error::NotFound {
        resource: "Reservation".to_string(),
        id: raw.to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    summary = "Create reservation",
    description = "Books one hourly slot. The total cost is computed from the facility's hourly rate, \
the pricing tier multiplier and the duration; any client-supplied cost is ignored.",
    request_body = ReservationCreate,
    responses(
        (status = 201, description = "Reservation created", body = ReservationResponse),
        (status = 400, description = "One or more fields failed validation", body = crate::errors::ErrorBody),
        (status = 404, description = "No facility has this ID", body = crate::errors::ErrorBody),
        (status = 409, description = "The slot is already booked", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_reservation(
    State(state): State<AppState>,
    ApiJson(create): ApiJson<ReservationCreate>,
) -> Result<(StatusCode, Json<ReservationResponse>)> {
    let reservation = state.bookings.create_reservation(create).await?;
    Ok((StatusCode::CREATED, Json(ReservationResponse::from(reservation))))
}

#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    summary = "List reservations",
    responses(
        (status = 200, description = "All reservations, oldest first", body = Vec<ReservationResponse>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_reservations(State(state): State<AppState>) -> Result<Json<Vec<ReservationResponse>>> {
    let reservations = state.bookings.list_reservations().await?;
    Ok(Json(reservations.into_iter().map(ReservationResponse::from).collect()))
}

#[utoipa::path(
    patch,
    path = "/reservations/{id}",
    tag = "reservations",
    summary = "Update reservation status",
    request_body = ReservationStatusUpdate,
    params(
        ("id" = String, Path, description = "Reservation ID", format = "uuid")
    ),
    responses(
        (status = 200, description = "Updated reservation", body = ReservationResponse),
        (status = 400, description = "Unknown status", body = crate::errors::ErrorBody),
        (status = 404, description = "Reservation not found", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<ReservationStatusUpdate>,
) -> Result<Json<ReservationResponse>> {
    let status = update.validate()?;
    let id = parse_reservation_id(&id)?;
    let reservation = state.bookings.update_status(id, status).await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

#[utoipa::path(
    delete,
    path = "/reservations/{id}",
    tag = "reservations",
    summary = "Delete reservation",
    params(
        ("id" = String, Path, description = "Reservation ID", format = "uuid")
    ),
    responses(
        (status = 204, description = "Reservation deleted"),
        (status = 404, description = "Reservation not found", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_reservation(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let id = parse_reservation_id(&id)?;
    state.bookings.delete_reservation(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
