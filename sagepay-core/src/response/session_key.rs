use serde::{Deserialize, Serialize};

use crate::types::SensitiveValue;

/// A merchant session key issued by `merchant-session-keys`.
///
/// ```
/// use sagepay_core::response::MerchantSessionKey;
///
/// let key: MerchantSessionKey = serde_json::from_str(
///     r#"{"merchantSessionKey": "M1E996F5", "expiry": "2026-10-18T12:00:00.000+01:00"}"#,
/// )
/// .unwrap();
///
/// assert_eq!(key.merchant_session_key.peek(), "M1E996F5");
/// assert!(!format!("{key:?}").contains("M1E996F5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantSessionKey {
    pub merchant_session_key: SensitiveValue<String>,
    /// ISO 8601 timestamp after which the key is no longer accepted.
    pub expiry: String,
}
