//! OpenAPI documentation for the booking API.
//!
//! The document is served at `/api-docs/openapi.json` and rendered with Scalar at `/docs`.

use utoipa::OpenApi;

use crate::{api, booking::slots::TimeSlot, db::models::reservations::ReservationStatus, errors};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "venuectl",
        description = "Facilities, hourly availability and reservations for the venue."
    ),
    servers(
        (url = "/api", description = "Booking API")
    ),
    paths(
        api::handlers::facilities::list_facilities,
        api::handlers::facilities::get_availability,
        api::handlers::reservations::create_reservation,
        api::handlers::reservations::list_reservations,
        api::handlers::reservations::update_reservation,
        api::handlers::reservations::delete_reservation,
        api::handlers::contact::create_contact_message,
    ),
    components(
        schemas(
            api::models::facilities::FacilityResponse,
            api::models::reservations::ReservationCreate,
            api::models::reservations::ReservationResponse,
            api::models::reservations::ReservationStatusUpdate,
            api::models::contact::ContactMessageCreate,
            api::models::contact::ContactMessageResponse,
            ReservationStatus,
            TimeSlot,
            errors::ErrorBody,
            errors::FieldError,
        )
    ),
    tags(
        (name = "facilities", description = "Facility catalog and availability"),
        (name = "reservations", description = "Booking lifecycle"),
        (name = "contact", description = "Contact form"),
    )
)]
pub struct ApiDoc;
