//! Linking a freshly captured security code to a saved card identifier.
//!
//! The gateway keeps the code for one transaction only and then discards it.

use bon::Builder;
use serde::Serialize;

use crate::{
    config::Auth,
    request::{ApiRequest, Authorization},
    response::MerchantSessionKey,
    types::SensitiveValue,
};

/// Attaches a CVV to a reusable card identifier.
///
/// Authenticates with the merchant session key rather than the integration
/// credentials. The session key may be given as a string or as the
/// [`MerchantSessionKey`] response it came from.
///
/// ```
/// use serde_json::json;
/// use sagepay_core::request::{ApiRequest, LinkSecurityCode};
///
/// let request = LinkSecurityCode::builder()
///     .merchant_session_key("M1E996F5-A9BC-41FE-B088-E5B73DB94277")
///     .card_identifier("C6F92981-8C2D-457A-AA1E-16EBCD6D3AC6")
///     .security_code("123")
///     .build();
///
/// assert_eq!(
///     request.resource_path(),
///     ["card-identifiers", "C6F92981-8C2D-457A-AA1E-16EBCD6D3AC6", "security-code"]
/// );
/// assert_eq!(serde_json::to_value(&request).unwrap(), json!({ "securityCode": "123" }));
/// assert!(!format!("{request:?}").contains("123"));
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSecurityCode {
    #[serde(skip)]
    #[builder(into)]
    merchant_session_key: SensitiveValue<String>,

    #[serde(skip)]
    #[builder(into)]
    card_identifier: String,

    #[builder(into)]
    security_code: SensitiveValue<String>,
}

impl LinkSecurityCode {
    pub fn card_identifier(&self) -> &str {
        &self.card_identifier
    }

    /// The raw security code.
    pub fn security_code(&self) -> &str {
        self.security_code.peek()
    }
}

impl ApiRequest for LinkSecurityCode {
    fn resource_path(&self) -> Vec<String> {
        vec![
            "card-identifiers".to_string(),
            self.card_identifier.clone(),
            "security-code".to_string(),
        ]
    }

    fn authorization(&self, _auth: &Auth) -> Authorization {
        Authorization::Bearer(self.merchant_session_key.clone())
    }
}

impl From<MerchantSessionKey> for SensitiveValue<String> {
    fn from(key: MerchantSessionKey) -> Self {
        key.merchant_session_key
    }
}

impl From<&MerchantSessionKey> for SensitiveValue<String> {
    fn from(key: &MerchantSessionKey) -> Self {
        key.merchant_session_key.clone()
    }
}
