//! API request and response data models.
//!
//! These are the JSON shapes on the wire (camelCase field names). They are kept apart from
//! the stored records in [`crate::db::models`]; request types carry their own `validate`
//! method that turns raw input into something the booking core accepts, collecting every
//! failing field into a single [`Error::Validation`](crate::errors::Error::Validation).
//!
//! - [`facilities`]: Facility catalog responses
//! - [`reservations`]: Booking requests, status updates and stored reservations
//! - [`contact`]: Contact form submissions
//! - [`validation`]: Field checks and the [`ApiJson`](validation::ApiJson) body extractor

pub mod contact;
pub mod facilities;
pub mod reservations;
pub mod validation;
