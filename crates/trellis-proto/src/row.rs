//! Named-column rows returned by metadata queries.

use crate::value::Value;
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A single row with named columns.
///
/// Column order is the order the source returned them in; lookups by name
/// take the first matching column.
#[derive(Debug, Clone, PartialEq, Default, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Create a row from (name, value) pairs.
    pub fn new(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }

    /// Get a column value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    /// All columns in source order.
    pub fn columns(&self) -> &[(String, Value)] {
        &self.columns
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_name() {
        let row = Row::new(vec![
            ("table_name".to_string(), Value::String("users".into())),
            ("ordinal_position".to_string(), Value::Int64(1)),
        ]);

        assert_eq!(row.get("table_name"), Some(&Value::String("users".into())));
        assert_eq!(row.get("ordinal_position"), Some(&Value::Int64(1)));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.columns().len(), 2);
    }
}
