//! # Sage Pay Kit
//!
//! Message modeling for the Sage Pay Pi REST API. Requests serialize to the
//! JSON bodies the gateway expects, responses parse into typed values, and
//! the callbacks an issuer's 3-D Secure system posts back are parsed and
//! routed to the right gateway resource.
//!
//! The kit never talks to the network itself.
//!
//! ## Modules
//!
//! - [`server_request`]: the ACS callback posted when the shopper returns from 3-D Secure.
//! - [`request`]: outbound requests, including [`CreateSecure3D`](request::CreateSecure3D).
//! - [`response`]: gateway responses and the [`ErrorBatch`](response::ErrorBatch) normalizer.
//! - [`config`]: gateway endpoint and integration credentials.
//! - [`types`]: shared helpers such as [`SensitiveValue`](types::SensitiveValue).
//! - [`http`]: mapping onto the `http` crate and an axum extractor (feature `http`).
//!
//! ## Completing 3-D Secure
//!
//! ```
//! use sagepay_kit::{
//!     request::{ApiRequest, CreateSecure3D, Secure3DMode},
//!     server_request::{AuthenticationCallback, CallbackFields},
//! };
//!
//! // The body the ACS posted back to the merchant site.
//! let fields = CallbackFields::from_form(b"PaRes=eJzVWNmSo0&MD=ORDER-1234");
//! assert!(AuthenticationCallback::is_request(&fields));
//!
//! let callback = AuthenticationCallback::from_fields(&fields);
//! let request = CreateSecure3D::resolve(callback, "D6F0D8F3-A4A5").unwrap();
//!
//! assert_eq!(request.mode(), Secure3DMode::LegacyFlow);
//! assert_eq!(request.resource_path(), ["transactions", "D6F0D8F3-A4A5", "3d-secure"]);
//! ```
//!
//! ## Reading gateway errors
//!
//! ```
//! use sagepay_kit::response::ErrorBatch;
//!
//! let batch = ErrorBatch::from_response(
//!     422,
//!     Some("application/json"),
//!     br#"{"errors": [{"code": 1003, "description": "Missing mandatory field", "property": "amount"}]}"#,
//! )
//! .unwrap();
//!
//! for error in &batch {
//!     println!("{error}");
//! }
//! assert_eq!(batch.by_property(Some("amount")).count(), 1);
//! ```

pub mod config {
    pub use sagepay_core::config::*;
}

pub mod errors {
    pub use sagepay_core::errors::*;
}

pub mod request {
    pub use sagepay_core::request::*;
}

pub mod response {
    pub use sagepay_core::response::*;
}

pub mod server_request {
    pub use sagepay_core::server_request::*;
}

pub mod types {
    pub use sagepay_core::types::*;
}

#[cfg(feature = "http")]
pub use sagepay_http as http;
