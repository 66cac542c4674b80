//! The row-fetch interface the catalog reflects through.

use crate::error::Error;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use trellis_proto::{Condition, OrderDirection, Row, Value};

/// The metadata tables the catalog reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogTable {
    /// Column rows, one per table column.
    Columns,
    /// Table rows, one per table.
    Tables,
    /// Index rows, one per index.
    Indexes,
    /// Index-column rows, one per column per index.
    IndexColumns,
}

impl CatalogTable {
    /// The information-schema name of this table.
    pub fn name(&self) -> &'static str {
        match self {
            CatalogTable::Columns => "information_schema.columns",
            CatalogTable::Tables => "information_schema.tables",
            CatalogTable::Indexes => "information_schema.indexes",
            CatalogTable::IndexColumns => "information_schema.index_columns",
        }
    }
}

/// Executes metadata queries against the database.
///
/// Implementations must honor every condition: equality filters restrict
/// the result set and ordering conditions fix the returned row order. The
/// catalog relies on ordering to reconstruct index key order.
pub trait RowSource: Send + Sync {
    /// Fetch rows from a metadata table under the given conditions.
    fn fetch(&self, table: CatalogTable, conditions: &[Condition]) -> Result<Vec<Row>, Error>;
}

/// An in-memory [`RowSource`] for tests and local development.
///
/// Holds canned rows per metadata table and applies equality filters and
/// ordering the way a live source would. Fetches are counted so callers
/// can assert that memoized accessors hit the source only once.
#[derive(Debug, Default)]
pub struct MemorySource {
    rows: HashMap<CatalogTable, Vec<Row>>,
    fetches: AtomicUsize,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows for a metadata table.
    pub fn with_rows(mut self, table: CatalogTable, rows: Vec<Row>) -> Self {
        self.rows.insert(table, rows);
        self
    }

    /// Number of fetches executed so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl RowSource for MemorySource {
    fn fetch(&self, table: CatalogTable, conditions: &[Condition]) -> Result<Vec<Row>, Error> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let mut rows: Vec<Row> = self.rows.get(&table).cloned().unwrap_or_default();

        for condition in conditions {
            if let Condition::Eq { column, value } = condition {
                rows.retain(|row| row.get(column) == Some(value));
            }
        }

        for condition in conditions {
            if let Condition::OrderBy { column, direction } = condition {
                rows.sort_by(|a, b| {
                    let null = Value::Null;
                    let left = a.get(column).unwrap_or(&null);
                    let right = b.get(column).unwrap_or(&null);
                    let ordering = left.cmp_for_order(right);
                    match direction {
                        OrderDirection::Asc => ordering,
                        OrderDirection::Desc => ordering.reverse(),
                    }
                });
            }
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, position: Value) -> Row {
        Row::new(vec![
            ("column_name".to_string(), Value::String(name.into())),
            ("ordinal_position".to_string(), position),
            ("table_schema".to_string(), Value::String(String::new())),
        ])
    }

    #[test]
    fn test_equality_filter() {
        let source = MemorySource::new().with_rows(
            CatalogTable::Columns,
            vec![
                row("a", Value::Int64(1)),
                Row::new(vec![(
                    "table_schema".to_string(),
                    Value::String("other".into()),
                )]),
            ],
        );

        let rows = source
            .fetch(
                CatalogTable::Columns,
                &[Condition::eq("table_schema", "")],
            )
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("column_name"), Some(&Value::String("a".into())));
    }

    #[test]
    fn test_order_by_nulls_first() {
        let source = MemorySource::new().with_rows(
            CatalogTable::IndexColumns,
            vec![
                row("b", Value::Int64(2)),
                row("c", Value::Null),
                row("a", Value::Int64(1)),
            ],
        );

        let rows = source
            .fetch(
                CatalogTable::IndexColumns,
                &[Condition::order_by_asc("ordinal_position")],
            )
            .unwrap();
        let names: Vec<&str> = rows
            .iter()
            .map(|r| r.get("column_name").and_then(Value::as_str).unwrap())
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_fetch_count() {
        let source = MemorySource::new();
        assert_eq!(source.fetch_count(), 0);
        source.fetch(CatalogTable::Tables, &[]).unwrap();
        source.fetch(CatalogTable::Tables, &[]).unwrap();
        assert_eq!(source.fetch_count(), 2);
    }
}
