//! HTTP client for the two extraction-service endpoints.
//!
//! Both endpoints take the PDF as a multipart `file` field. The table
//! endpoint replies with JSON; the export endpoint replies with opaque
//! spreadsheet bytes. Error bodies may be JSON with an `error`/`message`
//! field, plain text, or empty, and the message preference follows that
//! order.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde_json::Value;
use stmtx_core::{StatementPage, validate_pages};

use crate::error::IngestError;

pub const EXTRACT_TABLE_PATH: &str = "/api/extract-table";
pub const EXPORT_PATH: &str = "/api/extract-and-export";

pub struct ExtractorClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExtractorClient {
    /// Build a client for the service at `base_url`.
    ///
    /// No timeout is applied unless one is given, matching the reference
    /// behavior; a hanging call then blocks that ingestion indefinitely.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, IngestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Phase 1, fetch side: submit the PDF and decode the reply to JSON.
    ///
    /// The body is read fully as text first and parsed afterwards, so a 2xx
    /// reply with an unparsable body is `MalformedResponse`, distinct from a
    /// transport failure. Non-2xx replies become `Service` errors with the
    /// best message the body offers (fallback: "failed to process PDF").
    pub async fn fetch_tables(&self, file_name: &str, pdf: Vec<u8>) -> Result<Value, IngestError> {
        let response = self.post_pdf(EXTRACT_TABLE_PATH, file_name, pdf).await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(service_error(status, &text, "failed to process PDF"));
        }
        serde_json::from_str(&text).map_err(IngestError::MalformedResponse)
    }

    /// Phase 1 in one step: fetch, then validate the page-sequence shape.
    pub async fn extract_tables(
        &self,
        file_name: &str,
        pdf: Vec<u8>,
    ) -> Result<Vec<StatementPage>, IngestError> {
        let reply = self.fetch_tables(file_name, pdf).await?;
        Ok(validate_pages(&reply)?)
    }

    /// Phase 2: submit the same PDF to the export endpoint and return the
    /// spreadsheet bytes. A 2xx reply with an empty body is still a failure.
    pub async fn export_spreadsheet(
        &self,
        file_name: &str,
        pdf: Vec<u8>,
    ) -> Result<Vec<u8>, IngestError> {
        let response = self.post_pdf(EXPORT_PATH, file_name, pdf).await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return Err(service_error(status, &text, "failed to generate spreadsheet"));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(IngestError::EmptyArtifact);
        }
        Ok(body.to_vec())
    }

    async fn post_pdf(
        &self,
        path: &str,
        file_name: &str,
        pdf: Vec<u8>,
    ) -> Result<Response, IngestError> {
        let part = Part::bytes(pdf)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .multipart(form)
            .send()
            .await?;
        Ok(response)
    }
}

/// Build a `Service` error from a failure body: prefer a JSON `error` field,
/// then `message`, then the raw body text, then `fallback`.
fn service_error(status: StatusCode, body: &str, fallback: &str) -> IngestError {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        value
            .get("error")
            .or_else(|| value.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    let message = from_json
        .or_else(|| {
            let text = body.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .unwrap_or_else(|| fallback.to_string());

    IngestError::Service {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: IngestError) -> String {
        err.to_string()
    }

    #[test]
    fn service_error_prefers_error_field() {
        let err = service_error(
            StatusCode::BAD_REQUEST,
            r#"{"error": "bad pdf", "message": "ignored"}"#,
            "fallback",
        );
        assert_eq!(message(err), "bad pdf");
    }

    #[test]
    fn service_error_falls_back_to_message_field() {
        let err = service_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message": "ran out of memory"}"#,
            "fallback",
        );
        assert_eq!(message(err), "ran out of memory");
    }

    #[test]
    fn service_error_falls_back_to_raw_text() {
        let err = service_error(StatusCode::BAD_GATEWAY, "upstream exploded", "fallback");
        assert_eq!(message(err), "upstream exploded");
    }

    #[test]
    fn service_error_falls_back_to_generic_message() {
        for body in ["", "   ", r#"{"detail": "unrecognized key"}"#] {
            let err = service_error(StatusCode::INTERNAL_SERVER_ERROR, body, "fallback");
            assert_eq!(message(err), "fallback");
        }
    }

    #[test]
    fn service_error_keeps_the_status() {
        let err = service_error(StatusCode::BAD_REQUEST, "", "fallback");
        match err {
            IngestError::Service { status, .. } => assert_eq!(status, 400),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
