//! Row records: one mapping of field name to cell value per table row.

use crate::error::Result;
use crate::value::Value;
use serde::Serialize;
use std::collections::BTreeMap;

/// A single row of table data, keyed by column field name.
///
/// ```
/// use bstable::{Row, Value};
///
/// let row = Row::new().cell("id", 1).cell("name", "Ann");
/// assert_eq!(row.get("name"), Some(&Value::from("Ann")));
/// assert_eq!(row.get("email"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    cells: BTreeMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a cell (builder style).
    pub fn cell(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.cells.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.cells.get(field)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Row {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Build rows from loosely typed JSON.
///
/// Anything other than an array yields no rows; array items that are not
/// objects are skipped.
pub fn rows_from_json(json: serde_json::Value) -> Vec<Row> {
    let serde_json::Value::Array(items) = json else {
        log::debug!("row data is not a list, using no rows");
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::Object(map) => {
                Some(
                    map.into_iter()
                        .map(|(k, v)| (k, Value::from(v)))
                        .collect::<Row>(),
                )
            }
            other => {
                log::debug!("skipping non-object row: {}", other);
                None
            }
        })
        .collect()
}

/// Build rows from any serializable records, e.g. `#[derive(Serialize)]`
/// structs whose field names match the column names.
///
/// # Errors
///
/// Fails if a record cannot be serialized to JSON.
pub fn rows_from_records<T: Serialize>(records: &[T]) -> Result<Vec<Row>> {
    let json = serde_json::to_value(records)?;
    Ok(rows_from_json(json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_and_lookup() {
        let row = Row::new().cell("a", 1).cell("b", true).cell("a", 2);
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("a"), Some(&Value::from(2)));
    }

    #[test]
    fn from_pairs() {
        let row = Row::from([("id", 1)]);
        assert_eq!(row.get("id"), Some(&Value::from(1)));
    }

    #[test]
    fn json_array_of_objects() {
        let rows = rows_from_json(json!([{"id": 1, "name": "Ann"}, {"id": 2}]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some(&Value::from("Ann")));
        assert_eq!(rows[1].get("name"), None);
    }

    #[test]
    fn non_list_json_becomes_empty() {
        assert!(rows_from_json(json!({"id": 1})).is_empty());
        assert!(rows_from_json(json!("rows")).is_empty());
        assert!(rows_from_json(json!(null)).is_empty());
    }

    #[test]
    fn non_object_items_are_skipped() {
        let rows = rows_from_json(json!([1, {"id": 1}, "x"]));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn serializable_records() {
        #[derive(Serialize)]
        struct User {
            id: u32,
            email: Option<String>,
        }

        let rows = rows_from_records(&[
            User { id: 7, email: Some("a@b.c".into()) },
            User { id: 8, email: None },
        ])
        .unwrap();
        assert_eq!(rows[0].get("email"), Some(&Value::from("a@b.c")));
        assert_eq!(rows[1].get("email"), Some(&Value::Null));
    }
}
