//! Gateway endpoint and account credentials.

use base64::{Engine, prelude::BASE64_STANDARD};
use bon::Builder;
use url::Url;

use crate::{
    errors::{Error, Result},
    request::ApiRequest,
    types::SensitiveValue,
};

/// Base URL of the live gateway.
pub const LIVE_BASE_URL: &str = "https://pi-live.sagepay.com/api/v1/";
/// Base URL of the test (sandbox) gateway.
pub const TEST_BASE_URL: &str = "https://pi-test.sagepay.com/api/v1/";

/// Which gateway environment to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndpointMode {
    Live,
    #[default]
    Test,
}

impl std::str::FromStr for EndpointMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" | "production" => Ok(EndpointMode::Live),
            "test" | "sandbox" => Ok(EndpointMode::Test),
            other => Err(Error::Config(format!(
                "Unknown endpoint mode '{other}'; expected 'live' or 'test'"
            ))),
        }
    }
}

/// Where requests are addressed.
///
/// ```
/// use sagepay_core::config::{Endpoint, EndpointMode};
///
/// let endpoint = Endpoint::builder().mode(EndpointMode::Live).build();
/// assert_eq!(
///     endpoint.base_url().unwrap().as_str(),
///     "https://pi-live.sagepay.com/api/v1/"
/// );
///
/// let endpoint = Endpoint::test();
/// assert_eq!(
///     endpoint.url_for_path(["transactions", "T-1", "3d-secure"]).unwrap().as_str(),
///     "https://pi-test.sagepay.com/api/v1/transactions/T-1/3d-secure"
/// );
/// ```
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    /// Gateway environment. Ignored when `base_url` is set.
    #[builder(default)]
    pub mode: EndpointMode,
    /// Overrides the environment URL, e.g. for a local mock gateway.
    pub base_url: Option<Url>,
}

impl Endpoint {
    pub fn live() -> Self {
        Endpoint::builder().mode(EndpointMode::Live).build()
    }

    pub fn test() -> Self {
        Endpoint::builder().mode(EndpointMode::Test).build()
    }

    /// Read `SAGEPAY_MODE` and `SAGEPAY_BASE_URL` from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Endpoint::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mode = match lookup("SAGEPAY_MODE") {
            Some(mode) => mode.parse()?,
            None => EndpointMode::default(),
        };
        let base_url = lookup("SAGEPAY_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| Url::parse(&url))
            .transpose()?;

        Ok(Endpoint { mode, base_url })
    }

    pub fn base_url(&self) -> Result<Url> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None => match self.mode {
                EndpointMode::Live => Ok(Url::parse(LIVE_BASE_URL)?),
                EndpointMode::Test => Ok(Url::parse(TEST_BASE_URL)?),
            },
        }
    }

    /// Append path segments to the base URL. Each segment is percent-encoded.
    pub fn url_for_path<I>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url()?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!("Base URL '{url}' cannot carry a path")));
        }
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Full URL of a request's resource.
    pub fn url_for(&self, request: &impl ApiRequest) -> Result<Url> {
        self.url_for_path(request.resource_path())
    }
}

/// Integration credentials for the merchant account.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct Auth {
    #[builder(into)]
    pub integration_key: String,
    #[builder(into)]
    pub integration_password: SensitiveValue<String>,
}

impl Auth {
    /// Read `SAGEPAY_INTEGRATION_KEY` and `SAGEPAY_INTEGRATION_PASSWORD` from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Auth::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("{key} is not set")))
        };

        Ok(Auth {
            integration_key: required("SAGEPAY_INTEGRATION_KEY")?,
            integration_password: required("SAGEPAY_INTEGRATION_PASSWORD")?.into(),
        })
    }

    /// `base64(key:password)` for HTTP basic authentication.
    pub fn basic_credentials(&self) -> SensitiveValue<String> {
        let pair = format!("{}:{}", self.integration_key, self.integration_password.peek());
        SensitiveValue::new(BASE64_STANDARD.encode(pair))
    }
}
