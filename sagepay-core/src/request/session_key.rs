//! Asking the gateway for a short-lived merchant session key.

use bon::Builder;
use serde::Serialize;

use crate::request::ApiRequest;

/// Requests a merchant session key for drop-in checkout and card tokenisation.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionKey {
    #[builder(into)]
    pub vendor_name: String,
}

impl ApiRequest for CreateSessionKey {
    fn resource_path(&self) -> Vec<String> {
        vec!["merchant-session-keys".to_string()]
    }
}
