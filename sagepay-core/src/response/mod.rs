//! Responses returned by the gateway REST API.

mod error_batch;
mod session_key;

pub use error_batch::*;
pub use session_key::*;
