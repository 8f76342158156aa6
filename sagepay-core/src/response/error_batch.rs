//! Gateway errors, normally validation errors, collected into one queryable batch.
//!
//! The gateway reports errors in several shapes: a list wrapped in an
//! `errors` member, a single bare error object, or just a status code on a
//! response with no JSON body. [`ErrorBatch::normalize`] accepts all of them.

use std::fmt::Display;

use bon::Builder;
use serde::Serialize;

use crate::{
    errors::Result,
    types::{AnyJson, is_json_media_type, scalar_to_string},
};

/// One error reported by the gateway.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// Gateway error code, e.g. `1003`.
    #[builder(into)]
    pub code: String,
    #[builder(into, default)]
    pub description: String,
    /// The request field the error refers to, `None` for general errors.
    #[builder(into)]
    pub property: Option<String>,
    /// Status of the response the error arrived with.
    pub http_status: u16,
}

impl ErrorRecord {
    /// Map one raw `{code, description, property}` object.
    ///
    /// Returns `None` when the data is not an object or has no usable `code`.
    /// Numeric codes are kept in their decimal form.
    pub fn from_data(data: &AnyJson, http_status: u16) -> Option<Self> {
        let fields = data.as_object()?;
        let code = fields
            .get("code")
            .and_then(scalar_to_string)
            .filter(|c| !c.is_empty())?;

        Some(ErrorRecord {
            code,
            description: fields
                .get("description")
                .and_then(scalar_to_string)
                .unwrap_or_default(),
            property: fields
                .get("property")
                .and_then(scalar_to_string),
            http_status,
        })
    }
}

impl Display for ErrorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.property {
            Some(property) => write!(f, "{} ({}): {}", self.code, property, self.description),
            None => write!(f, "{}: {}", self.code, self.description),
        }
    }
}

/// A transport-level response as seen by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseEnvelope<'a> {
    pub status: u16,
    pub content_type: Option<&'a str>,
    pub body: &'a [u8],
}

impl ResponseEnvelope<'_> {
    /// Decoded body when it is JSON, `None` when there is nothing to decode.
    ///
    /// A body without a JSON content type, or an empty JSON body, counts as
    /// no data. A JSON body that does not parse is an error.
    pub fn json_data(&self) -> Result<Option<AnyJson>> {
        if !self.content_type.is_some_and(is_json_media_type) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "Error response has no JSON body: status={}, content_type={:?}",
                self.status,
                self.content_type
            );
            return Ok(None);
        }

        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(self.body)?))
    }
}

/// The raw shapes an error batch can be built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorSource<'a> {
    /// A full response; its status becomes the batch status.
    Envelope(ResponseEnvelope<'a>),
    /// Already decoded data with the status it arrived with.
    Data { data: &'a AnyJson, http_status: u16 },
}

/// An ordered collection of [`ErrorRecord`]s sharing one HTTP status.
///
/// An empty batch is a normal outcome (e.g. a `200` with no error body);
/// use [`has_errors`](ErrorBatch::has_errors) to decide whether anything
/// went wrong.
///
/// ```
/// use serde_json::json;
/// use sagepay_core::response::{ErrorBatch, ErrorSource};
///
/// let data = json!({
///     "errors": [
///         { "code": "1004", "description": "Invalid card number", "property": "cardDetails.cardNumber" },
///         { "code": "1009", "description": "Invalid vendor" }
///     ]
/// });
/// let batch = ErrorBatch::normalize(ErrorSource::Data { data: &data, http_status: 422 }).unwrap();
///
/// assert_eq!(batch.count(), 2);
/// assert_eq!(batch.by_property(Some("cardDetails.cardNumber")).count(), 1);
/// assert_eq!(batch.distinct_properties(), [Some("cardDetails.cardNumber"), None]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBatch {
    http_status: u16,
    errors: Vec<ErrorRecord>,
}

impl ErrorBatch {
    /// An empty batch for a given status.
    pub fn empty(http_status: u16) -> Self {
        ErrorBatch {
            http_status,
            errors: Vec::new(),
        }
    }

    /// Build a batch from any supported shape.
    ///
    /// Only a malformed JSON body fails; entries that cannot be mapped to an
    /// [`ErrorRecord`] are skipped.
    pub fn normalize(source: ErrorSource<'_>) -> Result<Self> {
        match source {
            ErrorSource::Envelope(envelope) => Ok(match envelope.json_data()? {
                Some(data) => Self::from_data(&data, envelope.status),
                None => Self::empty(envelope.status),
            }),
            ErrorSource::Data { data, http_status } => Ok(Self::from_data(data, http_status)),
        }
    }

    /// Build a batch from a response's parts.
    pub fn from_response(status: u16, content_type: Option<&str>, body: &[u8]) -> Result<Self> {
        Self::normalize(ErrorSource::Envelope(ResponseEnvelope {
            status,
            content_type,
            body,
        }))
    }

    /// Build a batch from decoded data.
    ///
    /// A list under `errors` yields one record per usable entry, in order.
    /// Without `errors`, an object with a top-level `code` is one error.
    /// Anything else yields an empty batch.
    pub fn from_data(data: &AnyJson, http_status: u16) -> Self {
        let errors = match data.get("errors") {
            Some(AnyJson::Array(entries)) => entries
                .iter()
                .filter_map(|entry| {
                    let record = ErrorRecord::from_data(entry, http_status);
                    if record.is_none() {
                        skipped(entry);
                    }
                    record
                })
                .collect(),
            Some(AnyJson::Null) | None => ErrorRecord::from_data(data, http_status)
                .into_iter()
                .collect(),
            Some(_) => Vec::new(),
        };

        ErrorBatch {
            http_status,
            errors,
        }
    }

    pub fn http_status(&self) -> u16 {
        self.http_status
    }

    /// Errors for one property; `None` selects errors with no property.
    pub fn by_property(&self, property: Option<&str>) -> ErrorBatch {
        ErrorBatch {
            http_status: self.http_status,
            errors: self
                .errors
                .iter()
                .filter(|e| e.property.as_deref() == property)
                .cloned()
                .collect(),
        }
    }

    /// Every property reported on, in first-seen order. `None` appears at
    /// most once, standing for the errors with no property.
    pub fn distinct_properties(&self) -> Vec<Option<&str>> {
        let mut properties: Vec<Option<&str>> = Vec::new();
        for property in self.errors.iter().map(|e| e.property.as_deref()) {
            if !properties.contains(&property) {
                properties.push(property);
            }
        }
        properties
    }

    pub fn count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.count() > 0
    }

    pub fn first(&self) -> Option<&ErrorRecord> {
        self.errors.first()
    }

    pub fn all(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ErrorRecord> {
        self.errors.iter()
    }
}

impl IntoIterator for ErrorBatch {
    type Item = ErrorRecord;
    type IntoIter = std::vec::IntoIter<ErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorBatch {
    type Item = &'a ErrorRecord;
    type IntoIter = std::slice::Iter<'a, ErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

fn skipped(_entry: &AnyJson) {
    #[cfg(feature = "tracing")]
    tracing::debug!("Skipping error entry without a usable code: {}", _entry);
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::Error;

    fn normalized(data: AnyJson, http_status: u16) -> ErrorBatch {
        ErrorBatch::normalize(ErrorSource::Data {
            data: &data,
            http_status,
        })
        .unwrap()
    }

    #[test]
    fn wrapped_errors_keep_order_and_status() {
        let batch = normalized(
            json!({
                "errors": [
                    { "code": "A", "description": "bad", "property": "card" },
                    { "code": "B", "description": "oops" }
                ]
            }),
            422,
        );

        assert_eq!(batch.count(), 2);
        assert_eq!(batch.http_status(), 422);
        assert_eq!(batch.all()[0].code, "A");
        assert_eq!(batch.all()[1].code, "B");
        assert!(batch.iter().all(|e| e.http_status == 422));

        let card = batch.by_property(Some("card"));
        assert_eq!(card.count(), 1);
        assert_eq!(card.first().unwrap().description, "bad");
        assert_eq!(card.http_status(), 422);

        let general = batch.by_property(None);
        assert_eq!(general.count(), 1);
        assert_eq!(general.first().unwrap().code, "B");

        assert_eq!(batch.distinct_properties(), [Some("card"), None]);
    }

    #[test]
    fn distinct_properties_first_seen_order() {
        let batch = normalized(
            json!({
                "errors": [
                    { "code": "1", "description": "" },
                    { "code": "2", "property": "b" },
                    { "code": "3", "property": "a" },
                    { "code": "4", "property": "b" },
                    { "code": "5" }
                ]
            }),
            422,
        );

        assert_eq!(batch.distinct_properties(), [None, Some("b"), Some("a")]);
        assert_eq!(batch.by_property(Some("b")).count(), 2);
        assert_eq!(batch.by_property(Some("missing")).count(), 0);
    }

    #[test]
    fn blank_property_is_kept_apart_from_missing() {
        let batch = normalized(
            json!({
                "errors": [
                    { "code": "A", "property": "" },
                    { "code": "B" }
                ]
            }),
            422,
        );

        assert_eq!(batch.by_property(None).count(), 1);
        assert_eq!(batch.by_property(Some("")).count(), 1);
        assert_eq!(batch.distinct_properties(), [Some(""), None]);
    }

    #[test]
    fn single_bare_error() {
        let batch = normalized(json!({ "code": "X", "description": "single" }), 400);

        assert_eq!(batch.count(), 1);
        let error = batch.first().unwrap();
        assert_eq!(error.code, "X");
        assert_eq!(error.description, "single");
        assert_eq!(error.property, None);
        assert_eq!(error.http_status, 400);
    }

    #[test]
    fn numeric_codes() {
        let batch = normalized(
            json!({ "errors": [{ "code": 1003, "description": "Missing mandatory field", "property": "amount" }] }),
            422,
        );
        assert_eq!(batch.first().unwrap().code, "1003");
        assert_eq!(
            batch.first().unwrap().to_string(),
            "1003 (amount): Missing mandatory field"
        );
    }

    #[test]
    fn empty_inputs() {
        for data in [
            json!({}),
            json!({ "code": "" }),
            json!({ "errors": [] }),
            json!({ "errors": { "code": "A" } }),
            json!([{ "code": "A" }]),
            json!(null),
        ] {
            let batch = normalized(data, 200);
            assert!(!batch.has_errors());
            assert!(batch.is_empty());
            assert_eq!(batch.first(), None);
            assert!(batch.distinct_properties().is_empty());
        }
    }

    #[test]
    fn null_errors_falls_back_to_single_error() {
        let batch = normalized(json!({ "errors": null, "code": "C", "description": "d" }), 500);
        assert_eq!(batch.count(), 1);
    }

    #[test]
    fn unusable_entries_are_skipped() {
        let batch = normalized(
            json!({
                "errors": [
                    { "description": "no code" },
                    "not an object",
                    { "code": "", "description": "blank code" },
                    { "code": "OK", "property": null }
                ]
            }),
            422,
        );

        assert_eq!(batch.count(), 1);
        assert_eq!(batch.first().unwrap().code, "OK");
        assert_eq!(batch.first().unwrap().description, "");
        assert_eq!(batch.first().unwrap().property, None);
    }

    #[test]
    fn envelope_with_json_body() {
        let batch = ErrorBatch::from_response(
            401,
            Some("application/json; charset=utf-8"),
            br#"{"code": 1002, "description": "Authentication failed"}"#,
        )
        .unwrap();

        assert_eq!(batch.http_status(), 401);
        assert_eq!(batch.count(), 1);
        assert_eq!(batch.first().unwrap().http_status, 401);
    }

    #[test]
    fn envelope_without_json_is_empty() {
        let html =
            ErrorBatch::from_response(502, Some("text/html"), b"<h1>Bad gateway</h1>").unwrap();
        assert!(!html.has_errors());
        assert_eq!(html.http_status(), 502);

        let untyped = ErrorBatch::from_response(500, None, br#"{"code": "A"}"#).unwrap();
        assert!(!untyped.has_errors());

        let blank = ErrorBatch::from_response(204, Some("application/json"), b"  ").unwrap();
        assert!(!blank.has_errors());
    }

    #[test]
    fn malformed_json_body_propagates() {
        let result = ErrorBatch::from_response(422, Some("application/json"), b"{\"errors\": [");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn empty_batch_differs_from_blank_record() {
        let empty = normalized(json!({}), 400);
        let blank = normalized(json!({ "code": "0" }), 400);

        assert!(!empty.has_errors());
        assert!(blank.has_errors());
        assert_eq!(blank.first().unwrap().description, "");
    }

    #[test]
    fn iteration() {
        let batch = normalized(
            json!({ "errors": [{ "code": "A" }, { "code": "B" }] }),
            422,
        );

        let borrowed: Vec<&str> = (&batch).into_iter().map(|e| e.code.as_str()).collect();
        assert_eq!(borrowed, ["A", "B"]);

        let owned: Vec<String> = batch.into_iter().map(|e| e.code).collect();
        assert_eq!(owned, ["A", "B"]);
    }

    #[test]
    fn builder_for_hand_made_records() {
        let record = ErrorRecord::builder()
            .code("1005")
            .property("amount")
            .http_status(422)
            .build();

        assert_eq!(record.description, "");
        assert_eq!(record.to_string(), "1005 (amount): ");
    }
}
