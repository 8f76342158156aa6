//! [`SensitiveValue`] keeps secrets out of logs and debug output.

use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

const REDACTED: &str = "*** REDACTED ***";

/// Wraps a secret (card security code, session key, integration password).
///
/// `Debug` and `Display` never show the inner value. Code that genuinely needs
/// the secret has to ask for it with [`peek`](SensitiveValue::peek) or
/// [`expose`](SensitiveValue::expose).
///
/// Serialization writes the raw value, since the only place a secret is
/// serialized is the request body that carries it to the gateway.
///
/// ```
/// use sagepay_core::types::SensitiveValue;
///
/// let cvv = SensitiveValue::new("123".to_string());
///
/// assert_eq!(format!("{cvv:?}"), "SensitiveValue(*** REDACTED ***)");
/// assert_eq!(cvv.to_string(), "*** REDACTED ***");
/// assert_eq!(cvv.peek(), "123");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SensitiveValue<T>(T);

impl<T> SensitiveValue<T> {
    /// Take ownership of a secret value.
    pub fn new(value: T) -> Self {
        SensitiveValue(value)
    }

    /// Borrow the secret without giving up the wrapper.
    pub fn peek(&self) -> &T {
        &self.0
    }

    /// Unwrap the secret.
    pub fn expose(self) -> T {
        self.0
    }

    /// Transform the secret while keeping it wrapped.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SensitiveValue<U> {
        SensitiveValue(f(self.0))
    }
}

impl<T> From<T> for SensitiveValue<T> {
    fn from(value: T) -> Self {
        SensitiveValue(value)
    }
}

impl From<&str> for SensitiveValue<String> {
    fn from(value: &str) -> Self {
        SensitiveValue(value.to_string())
    }
}

impl<T> Debug for SensitiveValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SensitiveValue({REDACTED})")
    }
}

impl<T> Display for SensitiveValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T: Serialize> Serialize for SensitiveValue<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for SensitiveValue<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        T::deserialize(deserializer).map(SensitiveValue)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn never_formats_the_secret() {
        let key: SensitiveValue<String> = "sk_live_abc".into();
        let rendered = format!("{key} {key:?} {:#?}", key);
        assert!(!rendered.contains("sk_live_abc"));
    }

    #[test]
    fn serializes_transparently() {
        #[derive(Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Body {
            security_code: SensitiveValue<String>,
        }

        let body = Body {
            security_code: "999".into(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "securityCode": "999" })
        );

        let parsed: Body = serde_json::from_value(json!({ "securityCode": "321" })).unwrap();
        assert_eq!(parsed.security_code.expose(), "321");
    }

    #[test]
    fn map_keeps_it_wrapped() {
        let secret: SensitiveValue<String> = "secret".into();
        let len = secret.map(|s| s.len());
        assert_eq!(*len.peek(), 6);
        assert_eq!(format!("{len:?}"), "SensitiveValue(*** REDACTED ***)");
    }
}
