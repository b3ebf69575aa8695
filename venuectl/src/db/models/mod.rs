//! Database record models matching table schemas.
//!
//! These structs correspond directly to table rows and are shared by both store
//! implementations. They derive `sqlx::FromRow` for the relational store and are
//! stored as-is by the in-memory store.
//!
//! - [`facilities`]: Bookable facilities and the default catalog
//! - [`reservations`]: Booked slots, pricing tiers and lifecycle status
//! - [`contact_messages`]: Contact form submissions
//!
//! API-facing shapes live in [`crate::api::models`] and convert from these via `From`.

pub mod contact_messages;
pub mod facilities;
pub mod reservations;
