//! Heuristic account-metadata extraction from page 1.
//!
//! Bank statements put account details in free-form label lines ("Account
//! No : 1234...") that the extraction service returns as ordinary table
//! rows. This is a best-effort scan over those lines, not a schema: it must
//! tolerate OCR and formatting noise and never fail.

use serde::{Deserialize, Serialize};

use crate::statement::StatementPage;

/// Account metadata derived from page 1. A `None` field means its label was
/// not found, which is not an error. Recomputed fresh on every ingestion,
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(rename = "Account Number", skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(rename = "Account Name", skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(rename = "Bank Name", skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(rename = "Branch", skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(rename = "IFSC Code", skip_serializing_if = "Option::is_none")]
    pub ifsc_code: Option<String>,
}

impl AccountInfo {
    pub fn is_empty(&self) -> bool {
        self.account_number.is_none()
            && self.account_name.is_none()
            && self.bank_name.is_none()
            && self.branch.is_none()
            && self.ifsc_code.is_none()
    }

    /// Present fields as (display label, value) pairs, in marker order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Account Number", &self.account_number),
            ("Account Name", &self.account_name),
            ("Bank Name", &self.bank_name),
            ("Branch", &self.branch),
            ("IFSC Code", &self.ifsc_code),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }

    fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::AccountNumber => &mut self.account_number,
            Field::AccountName => &mut self.account_name,
            Field::BankName => &mut self.bank_name,
            Field::Branch => &mut self.branch,
            Field::IfscCode => &mut self.ifsc_code,
        };
        *slot = Some(value);
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    AccountNumber,
    AccountName,
    BankName,
    Branch,
    IfscCode,
}

/// Label markers in priority order. Matching is first-match-wins per row, so
/// a line that somehow contains two markers only ever sets the first.
const MARKERS: &[(&str, Field)] = &[
    ("Account No", Field::AccountNumber),
    ("A/C Name", Field::AccountName),
    ("BANK NAME", Field::BankName),
    ("BRANCH NAME", Field::Branch),
    ("IFSC Code", Field::IfscCode),
];

/// Scan page 1 for labeled metadata lines.
///
/// Each row's first cell (by key-insertion order) is treated as the label
/// line. A marker line is split on its first colon and the trimmed remainder
/// stored; a marker line without a colon stores nothing. Rows are processed
/// in order without short-circuiting, so a later row overwrites an earlier
/// value for the same field. No page 1 means an empty result.
pub fn extract_account_info(pages: &[StatementPage]) -> AccountInfo {
    let mut info = AccountInfo::default();

    let Some(first_page) = pages.iter().find(|p| p.page_number == 1) else {
        return info;
    };

    for row in &first_page.rows {
        let Some(line) = row.first_value() else {
            continue;
        };
        let Some((_, field)) = MARKERS.iter().find(|(marker, _)| line.contains(marker)) else {
            continue;
        };
        if let Some((_, rest)) = line.split_once(':') {
            info.set(*field, rest.trim().to_string());
        }
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::Row;

    fn label_page(lines: &[&str]) -> StatementPage {
        let rows = lines
            .iter()
            .map(|line| Row::from_pairs(vec![("Col".to_string(), line.to_string())]))
            .collect();
        StatementPage::new(vec!["Col".to_string()], rows, 1)
    }

    #[test]
    fn extracts_labeled_fields() {
        let page = label_page(&[
            "Account No: 1234567890",
            "A/C Name:  JOHN DOE ",
            "BANK NAME: STATE BANK",
            "BRANCH NAME: MG ROAD",
            "IFSC Code: ABCD0123456",
        ]);
        let info = extract_account_info(&[page]);
        assert_eq!(info.account_number.as_deref(), Some("1234567890"));
        assert_eq!(info.account_name.as_deref(), Some("JOHN DOE"));
        assert_eq!(info.bank_name.as_deref(), Some("STATE BANK"));
        assert_eq!(info.branch.as_deref(), Some("MG ROAD"));
        assert_eq!(info.ifsc_code.as_deref(), Some("ABCD0123456"));
    }

    #[test]
    fn marker_without_colon_stores_nothing() {
        let info = extract_account_info(&[label_page(&["Account No 1234"])]);
        assert!(info.is_empty());
    }

    #[test]
    fn value_keeps_text_after_first_colon() {
        let info = extract_account_info(&[label_page(&["BRANCH NAME: Main: East"])]);
        assert_eq!(info.branch.as_deref(), Some("Main: East"));
    }

    #[test]
    fn later_rows_overwrite_earlier_values() {
        let info = extract_account_info(&[label_page(&[
            "Account No: 1111",
            "Account No: 2222",
        ])]);
        assert_eq!(info.account_number.as_deref(), Some("2222"));
    }

    #[test]
    fn ambiguous_line_only_sets_first_marker() {
        let info = extract_account_info(&[label_page(&["Account No / A/C Name: 42"])]);
        assert_eq!(info.account_number.as_deref(), Some("42"));
        assert_eq!(info.account_name, None);
    }

    #[test]
    fn missing_page_one_yields_empty() {
        let page = StatementPage::new(vec![], vec![], 2);
        assert!(extract_account_info(&[page]).is_empty());
        assert!(extract_account_info(&[]).is_empty());
    }

    #[test]
    fn tolerates_empty_and_valueless_rows() {
        let rows = vec![
            Row::default(),
            Row::from_pairs(vec![("Col".to_string(), String::new())]),
            Row::from_pairs(vec![("Col".to_string(), "IFSC Code: X".to_string())]),
        ];
        let page = StatementPage::new(vec!["Col".to_string()], rows, 1);
        let info = extract_account_info(&[page]);
        assert_eq!(info.ifsc_code.as_deref(), Some("X"));
    }

    #[test]
    fn is_idempotent() {
        let pages = vec![label_page(&["Account No: 99", "IFSC Code: ABCD0000001"])];
        assert_eq!(extract_account_info(&pages), extract_account_info(&pages));
    }

    #[test]
    fn serializes_to_display_keys() {
        let info = extract_account_info(&[label_page(&["IFSC Code: ABCD0123456"])]);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json, serde_json::json!({"IFSC Code": "ABCD0123456"}));
    }
}
