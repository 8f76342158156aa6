//! Messages the gateway, or an agent acting for it, sends to the merchant site.
//!
//! These are parsed from the body of an inbound HTTP request rather than
//! from a gateway API response.

mod authentication_callback;
mod fields;

pub use authentication_callback::*;
pub use fields::*;
