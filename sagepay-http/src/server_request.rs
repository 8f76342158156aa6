//! Reading ACS callbacks out of inbound HTTP requests.

use http::{HeaderMap, Request, header::CONTENT_TYPE};
use sagepay_core::{
    server_request::{AuthenticationCallback, CallbackFields},
    types::is_json_media_type,
};

use crate::errors::Result;

/// The request's `Content-Type`, if present and readable.
pub fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}

/// Decode a body as JSON when labelled JSON, otherwise as a form post.
pub fn callback_fields(content_type: Option<&str>, body: &[u8]) -> Result<CallbackFields> {
    if content_type.is_some_and(is_json_media_type) {
        Ok(CallbackFields::from_json(body)?)
    } else {
        Ok(CallbackFields::from_form(body))
    }
}

/// Parse a body into an ACS callback.
///
/// Returns `None` when the body is not an ACS callback at all, so the route
/// can treat it as some other request (or reject it).
pub fn parse_acs_body(
    content_type: Option<&str>,
    body: &[u8],
) -> Result<Option<AuthenticationCallback>> {
    let fields = callback_fields(content_type, body)?;

    if !AuthenticationCallback::is_request(&fields) {
        #[cfg(feature = "tracing")]
        tracing::debug!("Request body is not an ACS callback: {} field(s)", fields.len());
        return Ok(None);
    }

    Ok(Some(AuthenticationCallback::from_fields(&fields)))
}

/// Parse an inbound [`Request`] into an ACS callback.
///
/// ```
/// use http::Request;
/// use sagepay_http::server_request::parse_acs_request;
///
/// let request = Request::post("/checkout/3ds-return")
///     .header("content-type", "application/x-www-form-urlencoded")
///     .body("PaRes=eJzVWNmSo0&MD=ORDER-1234")
///     .unwrap();
///
/// let callback = parse_acs_request(&request).unwrap().unwrap();
/// assert_eq!(callback.pa_res(), Some("eJzVWNmSo0"));
/// assert_eq!(callback.merchant_data(), Some("ORDER-1234"));
/// ```
pub fn parse_acs_request<B: AsRef<[u8]>>(
    request: &Request<B>,
) -> Result<Option<AuthenticationCallback>> {
    parse_acs_body(content_type(request.headers()), request.body().as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_callback() {
        let request = Request::post("/3ds")
            .header(CONTENT_TYPE, "application/json")
            .body(r#"{"CRES": "eyJ0", "threeDSSessionData": "c2Vz"}"#)
            .unwrap();

        let callback = parse_acs_request(&request).unwrap().unwrap();
        assert!(callback.is_challenge());
        assert_eq!(callback.cres(), Some("eyJ0"));
        assert_eq!(callback.three_ds_session_data(), Some("c2Vz"));
    }

    #[test]
    fn form_is_the_default() {
        let request = Request::post("/3ds").body("cres=abc").unwrap();

        let callback = parse_acs_request(&request).unwrap().unwrap();
        assert_eq!(callback.cres(), Some("abc"));
    }

    #[test]
    fn other_posts_are_not_callbacks() {
        let ping = Request::post("/3ds").body("status=ok").unwrap();
        assert_eq!(parse_acs_request(&ping).unwrap(), None);

        let lower = Request::post("/3ds").body("paRes=abc").unwrap();
        assert_eq!(parse_acs_request(&lower).unwrap(), None);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let request = Request::post("/3ds")
            .header(CONTENT_TYPE, "application/json")
            .body("{\"cres\"")
            .unwrap();

        assert!(parse_acs_request(&request).is_err());
    }
}
