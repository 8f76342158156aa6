//! Normalizing gateway error responses.

use http::Response;
use sagepay_core::response::ErrorBatch;

use crate::{errors::Result, server_request::content_type};

/// Builds an [`ErrorBatch`] straight from an [`http::Response`].
///
/// ```
/// use http::Response;
/// use sagepay_http::response::ErrorBatchExt;
///
/// let response = Response::builder()
///     .status(422)
///     .header("content-type", "application/json")
///     .body(r#"{"errors": [{"code": 1004, "description": "Invalid card number", "property": "cardNumber"}]}"#)
///     .unwrap();
///
/// let batch = response.error_batch().unwrap();
/// assert_eq!(batch.http_status(), 422);
/// assert_eq!(batch.distinct_properties(), [Some("cardNumber")]);
/// ```
pub trait ErrorBatchExt {
    fn error_batch(&self) -> Result<ErrorBatch>;
}

impl<B: AsRef<[u8]>> ErrorBatchExt for Response<B> {
    fn error_batch(&self) -> Result<ErrorBatch> {
        let batch = ErrorBatch::from_response(
            self.status().as_u16(),
            content_type(self.headers()),
            self.body().as_ref(),
        )?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Gateway response carried {} error(s): status={}",
            batch.count(),
            batch.http_status()
        );

        Ok(batch)
    }
}
