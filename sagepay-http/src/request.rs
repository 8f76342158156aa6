//! Rendering outbound requests as [`http::Request`]s.
//!
//! Sending them is up to whichever HTTP client the application already uses.

use bon::Builder;
use bytes::Bytes;
use http::{
    HeaderValue, Method, Request,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use sagepay_core::{
    config::{Auth, Endpoint},
    request::ApiRequest,
};

use crate::errors::Result;

/// Gateway account and environment, used to address and authenticate requests.
///
/// ```
/// use sagepay_core::{config::{Auth, Endpoint}, request::CreateSecure3D};
/// use sagepay_http::request::Gateway;
///
/// let gateway = Gateway::builder()
///     .endpoint(Endpoint::test())
///     .auth(
///         Auth::builder()
///             .integration_key("key")
///             .integration_password("secret")
///             .build(),
///     )
///     .build();
///
/// let request = CreateSecure3D::resolve("eJzVWNmSo0", "T-1").unwrap();
/// let http_request = gateway.http_request(&request).unwrap();
///
/// assert_eq!(http_request.method(), "POST");
/// assert_eq!(
///     http_request.uri(),
///     "https://pi-test.sagepay.com/api/v1/transactions/T-1/3d-secure"
/// );
/// assert_eq!(&http_request.body()[..], br#"{"paRes":"eJzVWNmSo0"}"#);
/// ```
#[derive(Builder, Debug, Clone)]
pub struct Gateway {
    #[builder(default)]
    pub endpoint: Endpoint,
    pub auth: Auth,
}

impl Gateway {
    /// Endpoint and credentials from `SAGEPAY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Gateway {
            endpoint: Endpoint::from_env()?,
            auth: Auth::from_env()?,
        })
    }

    /// Build the POST for an API request.
    ///
    /// The `Authorization` header is flagged sensitive so HTTP stacks that
    /// honour the flag keep it out of their logs.
    pub fn http_request<R: ApiRequest>(&self, request: &R) -> Result<Request<Bytes>> {
        let url = self.endpoint.url_for(request)?;
        let body = Bytes::from(request.body()?);

        let mut authorization =
            HeaderValue::from_str(request.authorization(&self.auth).header_value().peek())?;
        authorization.set_sensitive(true);

        #[cfg(feature = "tracing")]
        tracing::debug!("Built gateway request: POST {}", url);

        let http_request = Request::builder()
            .method(Method::POST)
            .uri(url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, authorization)
            .body(body)?;

        Ok(http_request)
    }
}
