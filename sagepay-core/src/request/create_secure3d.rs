//! Completing a transaction after the shopper returns from 3-D Secure.
//!
//! The ACS result is forwarded to the gateway against the transaction that
//! asked for authentication. Which resource receives it, and in what shape,
//! depends on whether the issuer ran a 3DS v2 challenge (`cres`) or the
//! legacy 3DS v1 flow (`PaRes`).

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{Error, Result},
    request::ApiRequest,
    server_request::AuthenticationCallback,
    types::non_empty,
};

/// Which 3-D Secure flow a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Secure3DMode {
    /// 3DS v2: the issuer returned `cres` after an interactive challenge.
    ChallengeFlow,
    /// 3DS v1: the issuer returned `PaRes`.
    LegacyFlow,
}

impl Secure3DMode {
    /// Sub-resource of the transaction that accepts this flow's result.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Secure3DMode::ChallengeFlow => "3d-secure-challenge",
            Secure3DMode::LegacyFlow => "3d-secure",
        }
    }
}

impl Display for Secure3DMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Secure3DMode::ChallengeFlow => write!(f, "challenge"),
            Secure3DMode::LegacyFlow => write!(f, "legacy"),
        }
    }
}

/// The accepted shapes of a 3-D Secure result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Secure3DResult {
    /// A bare `PaRes` string, e.g. stored by the merchant before redirecting.
    PaRes(String),
    /// The full callback posted by the ACS.
    Callback(AuthenticationCallback),
}

impl From<String> for Secure3DResult {
    fn from(pa_res: String) -> Self {
        Secure3DResult::PaRes(pa_res)
    }
}

impl From<&str> for Secure3DResult {
    fn from(pa_res: &str) -> Self {
        Secure3DResult::PaRes(pa_res.to_string())
    }
}

impl From<AuthenticationCallback> for Secure3DResult {
    fn from(callback: AuthenticationCallback) -> Self {
        Secure3DResult::Callback(callback)
    }
}

/// The JSON body forwarded to the gateway.
///
/// Also parses a body back, which is how a stored or logged request can be
/// inspected later.
///
/// ```
/// use serde_json::json;
/// use sagepay_core::request::Secure3DPayload;
///
/// let payload: Secure3DPayload = serde_json::from_value(json!({ "paRes": "eJzV" })).unwrap();
/// assert_eq!(payload, Secure3DPayload::Legacy { pa_res: "eJzV".to_string() });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Secure3DPayload {
    Challenge {
        #[serde(rename = "cRes")]
        c_res: String,
        #[serde(rename = "threeDSSessionData")]
        three_ds_session_data: Option<String>,
    },
    Legacy {
        #[serde(rename = "paRes")]
        pa_res: String,
    },
}

impl Secure3DPayload {
    pub fn mode(&self) -> Secure3DMode {
        match self {
            Secure3DPayload::Challenge { .. } => Secure3DMode::ChallengeFlow,
            Secure3DPayload::Legacy { .. } => Secure3DMode::LegacyFlow,
        }
    }
}

impl TryFrom<Secure3DResult> for Secure3DPayload {
    type Error = Error;

    fn try_from(result: Secure3DResult) -> Result<Self> {
        match result {
            Secure3DResult::PaRes(pa_res) if !pa_res.is_empty() => {
                Ok(Secure3DPayload::Legacy { pa_res })
            }
            Secure3DResult::PaRes(_) => Err(Error::Validation(
                "3-D Secure result is an empty PaRes".to_string(),
            )),
            Secure3DResult::Callback(callback) => Self::try_from(callback),
        }
    }
}

impl TryFrom<AuthenticationCallback> for Secure3DPayload {
    type Error = Error;

    fn try_from(callback: AuthenticationCallback) -> Result<Self> {
        let AuthenticationCallback {
            cres,
            three_ds_session_data,
            pa_res,
            ..
        } = callback;

        match (cres, pa_res) {
            (Some(c_res), _) if !c_res.is_empty() => Ok(Secure3DPayload::Challenge {
                c_res,
                three_ds_session_data,
            }),
            (_, Some(pa_res)) if !pa_res.is_empty() => Ok(Secure3DPayload::Legacy { pa_res }),
            _ => Err(Error::Validation(
                "ACS callback carries neither cres nor PaRes".to_string(),
            )),
        }
    }
}

/// Sends a 3-D Secure result to the gateway for the transaction it belongs to.
///
/// ```
/// use serde_json::json;
/// use sagepay_core::{
///     request::{ApiRequest, CreateSecure3D, Secure3DMode},
///     server_request::AuthenticationCallback,
/// };
///
/// let callback = AuthenticationCallback::from_form(b"cres=eyJhY3M&threeDSSessionData=MTIz");
/// let request = CreateSecure3D::resolve(callback, "D6F0D8F3-A4A5").unwrap();
///
/// assert_eq!(request.mode(), Secure3DMode::ChallengeFlow);
/// assert_eq!(request.resource_path(), ["transactions", "D6F0D8F3-A4A5", "3d-secure-challenge"]);
/// assert_eq!(
///     serde_json::to_value(&request).unwrap(),
///     json!({ "cRes": "eyJhY3M", "threeDSSessionData": "MTIz" })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSecure3D {
    transaction_id: String,
    payload: Secure3DPayload,
}

impl CreateSecure3D {
    /// Decide the flow for a 3-D Secure result and build the request.
    ///
    /// A callback with a non-empty `cres` goes to the challenge resource with
    /// `cres` and its session data. Anything else goes to the legacy resource
    /// with `PaRes`. Inputs carrying neither, or an empty transaction id, are
    /// rejected with [`Error::Validation`].
    pub fn resolve(
        result: impl Into<Secure3DResult>,
        transaction_id: impl Into<String>,
    ) -> Result<Self> {
        let transaction_id = transaction_id.into();
        if transaction_id.is_empty() {
            return Err(Error::Validation(
                "3-D Secure result needs a transaction id".to_string(),
            ));
        }

        let payload = Secure3DPayload::try_from(result.into())?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Resolved 3-D Secure result: transaction='{}', flow='{}'",
            transaction_id,
            payload.mode()
        );

        Ok(CreateSecure3D {
            transaction_id,
            payload,
        })
    }

    pub fn mode(&self) -> Secure3DMode {
        self.payload.mode()
    }

    /// The transaction this result completes.
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// `cres`, only in the challenge flow.
    pub fn challenge_result(&self) -> Option<&str> {
        match &self.payload {
            Secure3DPayload::Challenge { c_res, .. } => Some(c_res.as_str()),
            Secure3DPayload::Legacy { .. } => None,
        }
    }

    /// `threeDSSessionData`, only in the challenge flow and only if the ACS sent one.
    pub fn session_data(&self) -> Option<&str> {
        match &self.payload {
            Secure3DPayload::Challenge {
                three_ds_session_data,
                ..
            } => non_empty(three_ds_session_data.as_deref()),
            Secure3DPayload::Legacy { .. } => None,
        }
    }

    /// `PaRes`, only in the legacy flow.
    pub fn legacy_result(&self) -> Option<&str> {
        match &self.payload {
            Secure3DPayload::Legacy { pa_res } => Some(pa_res.as_str()),
            Secure3DPayload::Challenge { .. } => None,
        }
    }

    pub fn payload(&self) -> &Secure3DPayload {
        &self.payload
    }

    pub fn into_payload(self) -> Secure3DPayload {
        self.payload
    }
}

impl Serialize for CreateSecure3D {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.payload.serialize(serializer)
    }
}

impl ApiRequest for CreateSecure3D {
    fn resource_path(&self) -> Vec<String> {
        vec![
            "transactions".to_string(),
            self.transaction_id.clone(),
            self.mode().resource_name().to_string(),
        ]
    }
}
