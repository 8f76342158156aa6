//! Sage Pay core library.
//!
//! Message types for the Sage Pay Pi REST API: requests that serialize to
//! JSON bodies, responses parsed into typed values, and the callbacks an
//! issuer's 3-D Secure system posts back to the merchant site.
//!
//! Nothing here performs I/O. Fetching bodies and sending requests is the
//! job of the transport, see the `sagepay-http` crate.

pub mod config;
pub mod errors;
pub mod request;
pub mod response;
pub mod server_request;
pub mod types;
