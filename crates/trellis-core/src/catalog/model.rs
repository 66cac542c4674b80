//! Finalized per-table model descriptors.

use super::field::Field;
use super::index::IndexDef;
use crate::error::Error;
use std::collections::HashMap;
use std::sync::Arc;

/// A finalized table model.
///
/// Built once per table during reflection and never mutated afterward. The
/// interleaved parent, when present, is a direct reference to the parent's
/// own finalized model, not a name to look up.
#[derive(Debug, Clone)]
pub struct ModelDef {
    /// Table name.
    pub table_name: String,
    /// Fields in ordinal order.
    fields: Vec<Field>,
    /// Indexes keyed by name.
    indexes: HashMap<String, IndexDef>,
    /// Parent model for interleaved tables.
    interleaved: Option<Arc<ModelDef>>,
}

impl ModelDef {
    /// Assemble and check a model.
    ///
    /// Fails with a schema error when the table has no primary index, a
    /// primary-key column names no field, or an interleaved parent's
    /// primary key is not a prefix of this table's.
    pub fn new(
        table_name: impl Into<String>,
        fields: Vec<Field>,
        indexes: HashMap<String, IndexDef>,
        interleaved: Option<Arc<ModelDef>>,
    ) -> Result<Self, Error> {
        let table_name = table_name.into();
        let mut fields = fields;
        fields.sort_by_key(Field::position);

        let model = Self {
            table_name,
            fields,
            indexes,
            interleaved,
        };

        let primary = model.primary_index().ok_or_else(|| {
            Error::Schema(format!("table {} has no primary index", model.table_name))
        })?;
        for column in &primary.columns {
            if model.field(column).is_none() {
                return Err(Error::Schema(format!(
                    "primary key column {} does not exist in table {}",
                    column, model.table_name
                )));
            }
        }

        if let Some(parent) = &model.interleaved {
            let parent_key = parent.primary_key_columns();
            let child_key = model.primary_key_columns();
            if child_key.len() < parent_key.len()
                || child_key[..parent_key.len()] != parent_key[..]
            {
                return Err(Error::Schema(format!(
                    "primary key of {} is not prefixed by the key of its parent {}",
                    model.table_name, parent.table_name
                )));
            }
        }

        Ok(model)
    }

    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// All fields in ordinal order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Fields belonging to the primary key, in ordinal order.
    pub fn primary_key_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.is_primary_key())
    }

    /// Get an index by name.
    pub fn index(&self, name: &str) -> Option<&IndexDef> {
        self.indexes.get(name)
    }

    /// All indexes keyed by name.
    pub fn indexes(&self) -> &HashMap<String, IndexDef> {
        &self.indexes
    }

    /// The reserved primary index.
    pub fn primary_index(&self) -> Option<&IndexDef> {
        self.indexes.get(IndexDef::PRIMARY)
    }

    /// Primary-key column names in key order.
    pub fn primary_key_columns(&self) -> Vec<String> {
        self.primary_index()
            .map(|index| index.columns.clone())
            .unwrap_or_default()
    }

    /// The interleaved parent model, if any.
    pub fn interleaved(&self) -> Option<&Arc<ModelDef>> {
        self.interleaved.as_ref()
    }

    /// The `CREATE TABLE` statement for this table.
    pub fn ddl(&self) -> String {
        let columns: Vec<String> = self
            .fields
            .iter()
            .map(|field| format!("{} {}", field.name(), field.ddl()))
            .collect();
        let mut ddl = format!(
            "CREATE TABLE {} ({}) PRIMARY KEY ({})",
            self.table_name,
            columns.join(", "),
            self.primary_key_columns().join(", ")
        );
        if let Some(parent) = &self.interleaved {
            ddl.push_str(&format!(", INTERLEAVE IN PARENT {}", parent.table_name));
        }
        ddl
    }
}
