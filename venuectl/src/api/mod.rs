//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: Request/response data structures and their validation
//!
//! # API Structure
//!
//! - **Facilities** (`/api/facilities`, `/api/availability/{facility_id}/{date}`)
//! - **Reservations** (`/api/reservations`, `/api/reservations/{id}`)
//! - **Contact** (`/api/contact`)
//!
//! All endpoints are documented with `utoipa`; the rendered reference is served at `/docs`.

pub mod handlers;
pub mod models;
