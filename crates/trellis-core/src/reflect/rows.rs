//! Typed views over raw metadata rows.

use crate::error::Error;
use trellis_proto::{Row, Value};

/// A row of `information_schema.columns`.
#[derive(Debug)]
pub(crate) struct ColumnRow {
    pub table_name: String,
    pub column_name: String,
    pub ordinal_position: u32,
    pub spanner_type: String,
    pub nullable: bool,
}

impl ColumnRow {
    pub fn decode(row: &Row) -> Result<Self, Error> {
        Ok(Self {
            table_name: required_str(row, "table_name")?,
            column_name: required_str(row, "column_name")?,
            ordinal_position: required_i64(row, "ordinal_position")? as u32,
            spanner_type: required_str(row, "spanner_type")?,
            nullable: yes_no(row, "is_nullable")?,
        })
    }
}

/// A row of `information_schema.tables`.
pub(crate) struct TableRow {
    pub table_name: String,
    pub parent_table_name: Option<String>,
}

impl TableRow {
    pub fn decode(row: &Row) -> Result<Self, Error> {
        Ok(Self {
            table_name: required_str(row, "table_name")?,
            parent_table_name: optional_str(row, "parent_table_name")?,
        })
    }
}

/// A row of `information_schema.indexes`.
pub(crate) struct IndexRow {
    pub table_name: String,
    pub index_name: String,
    pub is_unique: bool,
    pub is_null_filtered: bool,
    pub parent_table_name: Option<String>,
}

impl IndexRow {
    pub fn decode(row: &Row) -> Result<Self, Error> {
        Ok(Self {
            table_name: required_str(row, "table_name")?,
            index_name: required_str(row, "index_name")?,
            is_unique: required_bool(row, "is_unique")?,
            is_null_filtered: required_bool(row, "is_null_filtered")?,
            parent_table_name: optional_str(row, "parent_table_name")?,
        })
    }
}

/// A row of `information_schema.index_columns`.
///
/// A null ordinal position marks a storing column rather than a key column.
pub(crate) struct IndexColumnRow {
    pub table_name: String,
    pub index_name: String,
    pub column_name: String,
    pub ordinal_position: Option<i64>,
}

impl IndexColumnRow {
    pub fn decode(row: &Row) -> Result<Self, Error> {
        let ordinal_position = match row.get("ordinal_position") {
            None | Some(Value::Null) => None,
            Some(Value::Int64(position)) => Some(*position),
            Some(other) => {
                return Err(Error::InvalidRow(format!(
                    "ordinal_position has unexpected value {other:?}"
                )))
            }
        };
        Ok(Self {
            table_name: required_str(row, "table_name")?,
            index_name: required_str(row, "index_name")?,
            column_name: required_str(row, "column_name")?,
            ordinal_position,
        })
    }
}

fn required(row: &Row, column: &str) -> Result<Value, Error> {
    match row.get(column) {
        Some(value) if !value.is_null() => Ok(value.clone()),
        _ => Err(Error::InvalidRow(format!("missing column {column}"))),
    }
}

fn required_str(row: &Row, column: &str) -> Result<String, Error> {
    match required(row, column)? {
        Value::String(s) => Ok(s),
        other => Err(Error::InvalidRow(format!(
            "column {column} is not a string: {other:?}"
        ))),
    }
}

fn optional_str(row: &Row, column: &str) -> Result<Option<String>, Error> {
    match row.get(column) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::InvalidRow(format!(
            "column {column} is not a string: {other:?}"
        ))),
    }
}

fn required_i64(row: &Row, column: &str) -> Result<i64, Error> {
    match required(row, column)? {
        Value::Int64(i) => Ok(i),
        other => Err(Error::InvalidRow(format!(
            "column {column} is not an integer: {other:?}"
        ))),
    }
}

fn required_bool(row: &Row, column: &str) -> Result<bool, Error> {
    match required(row, column)? {
        Value::Bool(b) => Ok(b),
        other => Err(Error::InvalidRow(format!(
            "column {column} is not a bool: {other:?}"
        ))),
    }
}

/// Decode the information-schema YES/NO convention.
fn yes_no(row: &Row, column: &str) -> Result<bool, Error> {
    match required_str(row, column)?.as_str() {
        "YES" => Ok(true),
        "NO" => Ok(false),
        other => Err(Error::InvalidRow(format!(
            "column {column} is not YES or NO: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_row() -> Row {
        Row::new(vec![
            ("table_name".to_string(), Value::String("users".into())),
            ("column_name".to_string(), Value::String("id".into())),
            ("ordinal_position".to_string(), Value::Int64(1)),
            ("spanner_type".to_string(), Value::String("INT64".into())),
            ("is_nullable".to_string(), Value::String("NO".into())),
        ])
    }

    #[test]
    fn test_decode_column_row() {
        let decoded = ColumnRow::decode(&column_row()).unwrap();
        assert_eq!(decoded.table_name, "users");
        assert_eq!(decoded.column_name, "id");
        assert_eq!(decoded.ordinal_position, 1);
        assert_eq!(decoded.spanner_type, "INT64");
        assert!(!decoded.nullable);
    }

    #[test]
    fn test_missing_column_is_invalid() {
        let row = Row::new(vec![(
            "table_name".to_string(),
            Value::String("users".into()),
        )]);
        let err = ColumnRow::decode(&row).unwrap_err();
        assert!(matches!(err, Error::InvalidRow(_)));
    }

    #[test]
    fn test_bad_yes_no_is_invalid() {
        let row = Row::new(vec![
            ("table_name".to_string(), Value::String("users".into())),
            ("column_name".to_string(), Value::String("id".into())),
            ("ordinal_position".to_string(), Value::Int64(1)),
            ("spanner_type".to_string(), Value::String("INT64".into())),
            ("is_nullable".to_string(), Value::String("MAYBE".into())),
        ]);
        assert!(ColumnRow::decode(&row).is_err());
    }

    #[test]
    fn test_index_column_storing_marker() {
        let row = Row::new(vec![
            ("table_name".to_string(), Value::String("users".into())),
            ("index_name".to_string(), Value::String("idx".into())),
            ("column_name".to_string(), Value::String("extra".into())),
            ("ordinal_position".to_string(), Value::Null),
        ]);
        let decoded = IndexColumnRow::decode(&row).unwrap();
        assert_eq!(decoded.ordinal_position, None);
    }

    #[test]
    fn test_empty_parent_is_none() {
        let row = Row::new(vec![
            ("table_name".to_string(), Value::String("users".into())),
            ("parent_table_name".to_string(), Value::String(String::new())),
        ]);
        let decoded = TableRow::decode(&row).unwrap();
        assert_eq!(decoded.parent_table_name, None);
    }
}
