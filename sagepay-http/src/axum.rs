//! Axum extractor for the ACS return route.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sagepay_core::server_request::AuthenticationCallback;

use crate::server_request::{content_type, parse_acs_body};

/// Extracts an [`AuthenticationCallback`] from the ACS POST.
///
/// Requests that are not ACS callbacks, or whose body cannot be read, are
/// rejected with `400 Bad Request`.
///
/// ```rust
/// use axum::{Router, routing::post};
/// use sagepay_http::axum::AcsCallback;
///
/// async fn three_ds_return(AcsCallback(callback): AcsCallback) -> String {
///     format!("challenge: {}", callback.is_challenge())
/// }
///
/// let app: Router = Router::new().route("/checkout/3ds-return", post(three_ds_return));
/// ```
#[derive(Debug, Clone)]
pub struct AcsCallback(pub AuthenticationCallback);

/// Why a request was not accepted as an ACS callback.
#[derive(Debug)]
pub enum AcsRejection {
    /// The body could not be read or decoded.
    InvalidBody(String),
    /// The body carries neither `cres` nor `PaRes`.
    NotACallback,
}

impl IntoResponse for AcsRejection {
    fn into_response(self) -> Response {
        match self {
            AcsRejection::InvalidBody(reason) => {
                (StatusCode::BAD_REQUEST, format!("Invalid ACS callback body: {reason}"))
                    .into_response()
            }
            AcsRejection::NotACallback => {
                (StatusCode::BAD_REQUEST, "Not a 3-D Secure ACS callback").into_response()
            }
        }
    }
}

impl<S> FromRequest<S> for AcsCallback
where
    S: Send + Sync,
{
    type Rejection = AcsRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = content_type(req.headers()).map(str::to_string);

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|err| AcsRejection::InvalidBody(err.body_text()))?;

        match parse_acs_body(content_type.as_deref(), &body) {
            Ok(Some(callback)) => Ok(AcsCallback(callback)),
            Ok(None) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Rejected POST without cres or PaRes on the ACS return route");
                Err(AcsRejection::NotACallback)
            }
            Err(err) => Err(AcsRejection::InvalidBody(err.to_string())),
        }
    }
}
