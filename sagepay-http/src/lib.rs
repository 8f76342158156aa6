//! # Sage Pay HTTP
//!
//! Maps the message types of [`sagepay_core`] onto the [`http`] crate.
//!
//! - [`server_request`]: read an ACS callback out of an inbound request.
//! - [`response`]: turn a gateway response into an
//!   [`ErrorBatch`](sagepay_core::response::ErrorBatch).
//! - [`request`]: render any [`ApiRequest`](sagepay_core::request::ApiRequest)
//!   as an addressed, authenticated `http::Request`.
//! - [`axum`](crate::axum): an extractor for the ACS return route (feature `axum`).
//!
//! This crate does not send anything; hand the built requests to the HTTP
//! client of your choice.

pub mod errors;
pub mod request;
pub mod response;
pub mod server_request;

#[cfg(feature = "axum")]
pub mod axum;
