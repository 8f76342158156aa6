//! Requests sent to the gateway REST API.
//!
//! Every request serializes to its JSON body and knows which resource it
//! is addressed to. Turning that into an actual HTTP message is left to the
//! transport (see the `sagepay-http` crate).

mod create_secure3d;
mod security_code;
mod session_key;

pub use create_secure3d::*;
pub use security_code::*;
pub use session_key::*;

use serde::Serialize;

use crate::{config::Auth, errors::Result, types::SensitiveValue};

/// An outbound API request.
pub trait ApiRequest: Serialize {
    /// Path segments below the API base URL, e.g. `["transactions", id, "3d-secure"]`.
    fn resource_path(&self) -> Vec<String>;

    /// Credentials to present. Integration key basic auth unless overridden.
    fn authorization(&self, auth: &Auth) -> Authorization {
        Authorization::Basic(auth.basic_credentials())
    }

    /// The JSON body.
    fn body(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Value of the `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// Encoded `key:password` pair.
    Basic(SensitiveValue<String>),
    /// Merchant session key.
    Bearer(SensitiveValue<String>),
}

impl Authorization {
    /// Full header value, e.g. `Bearer 7AF0...`.
    pub fn header_value(&self) -> SensitiveValue<String> {
        match self {
            Authorization::Basic(credentials) => {
                SensitiveValue::new(format!("Basic {}", credentials.peek()))
            }
            Authorization::Bearer(key) => SensitiveValue::new(format!("Bearer {}", key.peek())),
        }
    }
}
