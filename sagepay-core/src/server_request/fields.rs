//! [`CallbackFields`] is the raw key/value view of an inbound POST.

use url::form_urlencoded;

use crate::{
    errors::Result,
    types::{AnyJson, scalar_to_string},
};

/// Ordered key/value pairs taken from an inbound request body.
///
/// Keys keep their original casing. When a key repeats, the last value wins,
/// matching how form posts are usually flattened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackFields(Vec<(String, String)>);

impl CallbackFields {
    /// Parse an `application/x-www-form-urlencoded` body.
    pub fn from_form(body: &[u8]) -> Self {
        form_urlencoded::parse(body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Parse a JSON body.
    ///
    /// Only a top-level object contributes fields. Malformed JSON is an error.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let value: AnyJson = serde_json::from_slice(body)?;
        Ok(Self::from_json_value(&value))
    }

    /// Collect the scalar members of a JSON object.
    ///
    /// Nested objects, arrays and `null` members are ignored.
    pub fn from_json_value(value: &AnyJson) -> Self {
        match value {
            AnyJson::Object(map) => map
                .iter()
                .filter_map(|(k, v)| scalar_to_string(v).map(|v| (k.clone(), v)))
                .collect(),
            _ => Self::default(),
        }
    }

    /// Look up a key exactly as written.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a key ignoring ASCII case.
    ///
    /// Differently cased spellings are distinct keys, so a blank `CRES` does
    /// not hide a filled-in `cres`. The last non-empty match wins, falling
    /// back to the last match.
    pub fn get_ignore_case(&self, key: &str) -> Option<&str> {
        let mut matches = self
            .0
            .iter()
            .rev()
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str());

        let last = matches.next()?;
        if !last.is_empty() {
            return Some(last);
        }
        matches.find(|v| !v.is_empty()).or(Some(last))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for CallbackFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        CallbackFields(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
