//! Shape validation for the table-extraction reply.
//!
//! The service reply is decoded to JSON elsewhere; this module only decides
//! whether that JSON is a well-formed sequence of statement pages before
//! anything downstream trusts it.

use serde_json::Value;
use thiserror::Error;

use crate::statement::{Row, StatementPage};

/// A decoded reply that does not have the expected page-sequence shape.
/// Checks run in order and the first violation wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected an array of tables")]
    ExpectedArray,
    #[error("missing headers array at index {0}")]
    MissingHeaders(usize),
    #[error("missing rows array at index {0}")]
    MissingRows(usize),
    #[error("missing page number at index {0}")]
    MissingPageNumber(usize),
}

/// Check `value` against the page-sequence shape and convert it.
///
/// Each element must carry an array `headers`, an array `rows`, and a numeric
/// `pageNumber`; a wrong-typed field fails the same way as a missing one. An
/// empty array is valid (a statement with no extractable tables). Row content
/// is carried over as-is, with no cross-page uniqueness check on page numbers.
pub fn validate_pages(value: &Value) -> Result<Vec<StatementPage>, ValidationError> {
    let tables = value.as_array().ok_or(ValidationError::ExpectedArray)?;

    let mut pages = Vec::with_capacity(tables.len());
    for (index, entry) in tables.iter().enumerate() {
        let headers = entry
            .get("headers")
            .and_then(Value::as_array)
            .ok_or(ValidationError::MissingHeaders(index))?;
        let rows = entry
            .get("rows")
            .and_then(Value::as_array)
            .ok_or(ValidationError::MissingRows(index))?;
        let page_number = entry
            .get("pageNumber")
            .and_then(Value::as_f64)
            .ok_or(ValidationError::MissingPageNumber(index))?;

        pages.push(StatementPage::new(
            headers.iter().map(header_text).collect(),
            rows.iter().map(Row::from_value).collect(),
            page_number as u32,
        ));
    }
    Ok(pages)
}

fn header_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
