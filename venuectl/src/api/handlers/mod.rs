//! HTTP request handlers, mounted under `/api`.
//!
//! Handlers stay thin: decode the request, call into [`crate::booking`] or
//! [`crate::contact`], and map the result to a response. Failures are returned as
//! [`crate::errors::Error`], which renders the status code and JSON error body.
//!
//! - [`facilities`]: Facility catalog and per-day availability
//! - [`reservations`]: Create, list, update status, delete
//! - [`contact`]: Contact form submissions

pub mod contact;
pub mod facilities;
pub mod reservations;
