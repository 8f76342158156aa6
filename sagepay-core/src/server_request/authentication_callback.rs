//! The POST an issuing bank's ACS sends the shopper back with after 3-D Secure.

use bon::Builder;
use serde::Serialize;

use crate::{
    errors::Result,
    server_request::CallbackFields,
    types::{AnyJson, non_empty},
};

/// The 3-D Secure result returned by the card issuer's Access Control System.
///
/// A 3DS v2 challenge returns `cres` plus `threeDSSessionData`. A 3DS v1
/// authentication returns `PaRes` plus the optional merchant data `MD` that
/// was bounced through the ACS.
///
/// ```
/// use sagepay_core::server_request::{AuthenticationCallback, CallbackFields};
///
/// let fields = CallbackFields::from_form(b"CRES=eyJhY3M&threeDSSessionData=c2Vzcw");
/// assert!(AuthenticationCallback::is_request(&fields));
///
/// let callback = AuthenticationCallback::from_fields(&fields);
/// assert!(callback.is_valid());
/// assert_eq!(callback.cres(), Some("eyJhY3M"));
/// assert_eq!(callback.pa_res(), None);
/// ```
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthenticationCallback {
    #[serde(rename = "cRes")]
    #[builder(into)]
    pub(crate) cres: Option<String>,

    #[serde(rename = "threeDSSessionData")]
    #[builder(into)]
    pub(crate) three_ds_session_data: Option<String>,

    #[serde(rename = "PaRes")]
    #[builder(into)]
    pub(crate) pa_res: Option<String>,

    #[serde(rename = "MD")]
    #[builder(into)]
    pub(crate) merchant_data: Option<String>,
}

impl AuthenticationCallback {
    /// Field names as the ACS sends them.
    pub const CRES: &'static str = "cres";
    pub const THREE_DS_SESSION_DATA: &'static str = "threeDSSessionData";
    pub const PA_RES: &'static str = "PaRes";
    pub const MD: &'static str = "MD";

    /// Pick the callback fields out of an inbound request body.
    ///
    /// `cres` is matched in any case; the remaining fields only match their
    /// exact spelling. Issuers are inconsistent about the casing of `cres`
    /// across protocol versions, while `PaRes` and `MD` are fixed.
    pub fn from_fields(fields: &CallbackFields) -> Self {
        AuthenticationCallback {
            cres: fields.get_ignore_case(Self::CRES).map(str::to_string),
            three_ds_session_data: fields.get(Self::THREE_DS_SESSION_DATA).map(str::to_string),
            pa_res: fields.get(Self::PA_RES).map(str::to_string),
            merchant_data: fields.get(Self::MD).map(str::to_string),
        }
    }

    /// Parse an `application/x-www-form-urlencoded` body.
    pub fn from_form(body: &[u8]) -> Self {
        Self::from_fields(&CallbackFields::from_form(body))
    }

    /// Parse a JSON body.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        Ok(Self::from_fields(&CallbackFields::from_json(body)?))
    }

    /// Build from an already decoded JSON value.
    pub fn from_json_value(value: &AnyJson) -> Self {
        Self::from_fields(&CallbackFields::from_json_value(value))
    }

    /// Whether an arbitrary inbound message is an ACS callback at all.
    ///
    /// Call this before parsing, e.g. to tell the shopper's return from a
    /// health-check ping that hits the same route.
    pub fn is_request(fields: &CallbackFields) -> bool {
        non_empty(fields.get_ignore_case(Self::CRES)).is_some()
            || non_empty(fields.get(Self::PA_RES)).is_some()
    }

    /// A callback is usable when it carries a challenge result or a legacy result.
    pub fn is_valid(&self) -> bool {
        if self.cres().is_some() {
            return true;
        }

        self.pa_res().is_some()
    }

    /// Whether this is the 3DS v2 challenge flow. `cres` takes precedence
    /// when an ACS sends both.
    pub fn is_challenge(&self) -> bool {
        self.cres().is_some()
    }

    /// Encrypted challenge result (`cres`), if non-empty.
    pub fn cres(&self) -> Option<&str> {
        non_empty(self.cres.as_deref())
    }

    /// Session correlator that accompanies `cres`, if non-empty.
    pub fn three_ds_session_data(&self) -> Option<&str> {
        non_empty(self.three_ds_session_data.as_deref())
    }

    /// Encrypted legacy result (`PaRes`), if non-empty.
    pub fn pa_res(&self) -> Option<&str> {
        non_empty(self.pa_res.as_deref())
    }

    /// Merchant data (`MD`) used to find the transaction again, if non-empty.
    pub fn merchant_data(&self) -> Option<&str> {
        non_empty(self.merchant_data.as_deref())
    }
}

impl From<&CallbackFields> for AuthenticationCallback {
    fn from(fields: &CallbackFields) -> Self {
        Self::from_fields(fields)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> CallbackFields {
        pairs.iter().copied().collect()
    }

    #[test]
    fn is_request_matches_issuer_casing() {
        assert!(AuthenticationCallback::is_request(&fields(&[("cres", "x")])));
        assert!(AuthenticationCallback::is_request(&fields(&[("CRes", "x")])));
        assert!(AuthenticationCallback::is_request(&fields(&[("PaRes", "y")])));

        assert!(!AuthenticationCallback::is_request(&fields(&[("paRes", "y")])));
        assert!(!AuthenticationCallback::is_request(&fields(&[("PARES", "y")])));
        assert!(!AuthenticationCallback::is_request(&fields(&[])));
    }

    #[test]
    fn is_request_ignores_empty_values() {
        assert!(!AuthenticationCallback::is_request(&fields(&[("cres", "")])));
        assert!(!AuthenticationCallback::is_request(&fields(&[("PaRes", ""), ("MD", "m")])));
        assert!(!AuthenticationCallback::is_request(&fields(&[("MD", "m")])));
    }

    #[test]
    fn blank_cres_variant_does_not_mask_filled_one() {
        let fields = CallbackFields::from_form(b"cres=abc&CRES=");

        assert!(AuthenticationCallback::is_request(&fields));
        let callback = AuthenticationCallback::from_fields(&fields);
        assert!(callback.is_challenge());
        assert_eq!(callback.cres(), Some("abc"));
    }

    #[test]
    fn md_and_session_data_are_case_sensitive() {
        let callback = AuthenticationCallback::from_fields(&fields(&[
            ("PaRes", "p"),
            ("md", "lower"),
            ("threedssessiondata", "lower"),
        ]));

        assert_eq!(callback.merchant_data(), None);
        assert_eq!(callback.three_ds_session_data(), None);
        assert_eq!(callback.pa_res(), Some("p"));
    }

    #[test]
    fn validity() {
        let challenge = AuthenticationCallback::builder().cres("c").build();
        let legacy = AuthenticationCallback::builder().pa_res("p").build();
        let both = AuthenticationCallback::builder().cres("c").pa_res("p").build();
        let empty_values = AuthenticationCallback::builder()
            .cres("")
            .pa_res("")
            .merchant_data("m")
            .build();

        assert!(challenge.is_valid());
        assert!(legacy.is_valid());
        assert!(both.is_valid());
        assert!(both.is_challenge());
        assert!(!AuthenticationCallback::default().is_valid());
        assert!(!empty_values.is_valid());
    }

    #[test]
    fn parses_legacy_form_post() {
        let callback = AuthenticationCallback::from_form(b"PaRes=eJzVWNmSo0&MD=txn-0001");

        assert!(!callback.is_challenge());
        assert_eq!(callback.pa_res(), Some("eJzVWNmSo0"));
        assert_eq!(callback.merchant_data(), Some("txn-0001"));
        assert_eq!(callback.cres(), None);
    }

    #[test]
    fn parses_challenge_json_post() {
        let callback =
            AuthenticationCallback::from_json(br#"{"cres": "eyJ0aHJl", "threeDSSessionData": "MTIz"}"#)
                .unwrap();

        assert!(callback.is_challenge());
        assert_eq!(callback.cres(), Some("eyJ0aHJl"));
        assert_eq!(callback.three_ds_session_data(), Some("MTIz"));
    }

    #[test]
    fn debug_serialization_uses_wire_names() {
        let callback = AuthenticationCallback::builder()
            .pa_res("p")
            .merchant_data("m")
            .build();

        assert_eq!(
            serde_json::to_value(&callback).unwrap(),
            json!({
                "cRes": null,
                "threeDSSessionData": null,
                "PaRes": "p",
                "MD": "m",
            })
        );
    }
}
