//! Index definitions.

use std::collections::HashSet;

/// An index on a table.
///
/// Key columns are ordered; storing (covering) columns are not. The index
/// named [`IndexDef::PRIMARY`] is reserved: its key columns define the
/// table's primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDef {
    /// Index name (unique within its table).
    pub name: String,
    /// Owning table name.
    pub table: String,
    /// Key columns in key order.
    pub columns: Vec<String>,
    /// Covering columns stored with the index for read efficiency.
    pub storing_columns: HashSet<String>,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
    /// Whether rows with null key columns are excluded.
    pub null_filtered: bool,
    /// Parent table for interleaved indexes.
    pub parent: Option<String>,
}

impl IndexDef {
    /// Reserved name of the index that defines a table's primary key.
    pub const PRIMARY: &'static str = "PRIMARY_KEY";

    /// Create an index with the given key columns.
    pub fn new(
        table: impl Into<String>,
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            storing_columns: HashSet::new(),
            unique: false,
            null_filtered: false,
            parent: None,
        }
    }

    /// Mark the index unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Mark the index null-filtered.
    pub fn null_filtered(mut self) -> Self {
        self.null_filtered = true;
        self
    }

    /// Add storing (covering) columns.
    pub fn storing(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.storing_columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// Interleave the index in a parent table.
    pub fn interleaved_in(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Whether this is the reserved primary-key index.
    pub fn is_primary(&self) -> bool {
        self.name == Self::PRIMARY
    }

    /// The `CREATE INDEX` statement for this index.
    ///
    /// Storing columns are emitted in sorted order so the output is
    /// deterministic. The primary index has no DDL of its own; it is part
    /// of the table statement.
    pub fn ddl(&self) -> String {
        let mut ddl = String::from("CREATE ");
        if self.unique {
            ddl.push_str("UNIQUE ");
        }
        if self.null_filtered {
            ddl.push_str("NULL_FILTERED ");
        }
        ddl.push_str(&format!(
            "INDEX {} ON {} ({})",
            self.name,
            self.table,
            self.columns.join(", ")
        ));
        if !self.storing_columns.is_empty() {
            let mut storing: Vec<&str> =
                self.storing_columns.iter().map(String::as_str).collect();
            storing.sort_unstable();
            ddl.push_str(&format!(" STORING ({})", storing.join(", ")));
        }
        if let Some(parent) = &self.parent {
            ddl.push_str(&format!(", INTERLEAVE IN {parent}"));
        }
        ddl
    }
}
