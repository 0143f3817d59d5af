//! Wire model for extracted statement tables.
//!
//! The extraction service replies with an array of page objects:
//! `{"headers": [...], "rows": [{col: cell, ...}, ...], "pageNumber": n}`.
//! Row cells keep their JSON document order; several consumers depend on
//! "the first cell of a row" being well defined.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page's worth of extracted tabular data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementPage {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
    /// 1-based. Page 1 carries the account-metadata lines. Duplicates are
    /// tolerated and never deduplicated.
    #[serde(rename = "pageNumber")]
    pub page_number: u32,
}

impl StatementPage {
    pub fn new(headers: Vec<String>, rows: Vec<Row>, page_number: u32) -> Self {
        Self {
            headers,
            rows,
            page_number,
        }
    }
}

/// A table row: header name → cell text, in insertion order.
///
/// Backed by an ordered key/value list rather than a map so iteration and
/// `first_value` are deterministic. Rows are defensive about the shape the
/// service sends: keys may be missing or extra relative to the page headers,
/// non-string cells are stringified, and a non-object row entry decodes as an
/// empty row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn from_pairs(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    /// Lenient conversion from a decoded JSON value. Anything that is not an
    /// object becomes an empty row.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        let cells = object
            .iter()
            .map(|(key, cell)| (key.clone(), cell_text(cell)))
            .collect();
        Self { cells }
    }

    /// Cell under `header`, if present.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(key, _)| key == header)
            .map(|(_, cell)| cell.as_str())
    }

    /// First cell by key-insertion order. The account-metadata heuristic
    /// treats this as the row's label line.
    pub fn first_value(&self) -> Option<&str> {
        self.cells.first().map(|(_, cell)| cell.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(key, cell)| (key.as_str(), cell.as_str()))
    }
}

/// Render a JSON cell as display text. Strings pass through unquoted, null
/// becomes empty, everything else keeps its JSON rendering.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (key, cell) in &self.cells {
            map.serialize_entry(key, cell)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Row::from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_preserves_insertion_order() {
        let row = Row::from_value(&json!({"Z": "last?", "A": "no, first", "M": "middle"}));
        let keys: Vec<&str> = row.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Z", "A", "M"]);
        assert_eq!(row.first_value(), Some("last?"));
    }

    #[test]
    fn row_stringifies_non_string_cells() {
        let row = Row::from_value(&json!({"Amount": 42.5, "Flag": true, "Gap": null}));
        assert_eq!(row.get("Amount"), Some("42.5"));
        assert_eq!(row.get("Flag"), Some("true"));
        assert_eq!(row.get("Gap"), Some(""));
    }

    #[test]
    fn non_object_row_decodes_empty() {
        let row: Row = serde_json::from_value(json!("just a string")).unwrap();
        assert!(row.is_empty());
        assert_eq!(row.first_value(), None);
    }

    #[test]
    fn page_round_trips_wire_shape() {
        let wire = json!({
            "headers": ["Date", "Description"],
            "rows": [{"Date": "01/02", "Description": "UPI/1234"}],
            "pageNumber": 3
        });
        let page: StatementPage = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(page.page_number, 3);
        assert_eq!(page.rows[0].get("Description"), Some("UPI/1234"));
        assert_eq!(serde_json::to_value(&page).unwrap(), wire);
    }
}
