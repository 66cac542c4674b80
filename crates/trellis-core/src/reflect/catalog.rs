//! The memoized schema catalog.

use super::rows::{ColumnRow, IndexColumnRow, IndexRow, TableRow};
use super::source::{CatalogTable, RowSource};
use crate::catalog::{Field, FieldType, IndexDef, ModelDef};
use crate::error::Error;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};
use trellis_proto::Condition;

/// Raw per-table metadata before models are assembled.
#[derive(Debug, Clone)]
pub struct TableInfo {
    /// Fields keyed by column name.
    pub fields: HashMap<String, Field>,
    /// Declared interleaved parent table, if any.
    pub parent_table: Option<String>,
}

type TableMap = BTreeMap<String, TableInfo>;
type IndexMap = BTreeMap<String, HashMap<String, IndexDef>>;
type ModelMap = BTreeMap<String, Arc<ModelDef>>;

/// Per-table builder state between the two model-construction passes.
struct ModelSeed {
    fields: Vec<Field>,
    indexes: HashMap<String, IndexDef>,
    parent: Option<String>,
}

/// Reflects schema metadata into finalized table models.
///
/// Each accessor computes its result at most once per catalog and caches
/// it; first access is serialized so concurrent callers never duplicate a
/// fetch or observe a partial result. A failed build leaves its cache
/// empty, so the next call retries instead of serving a partial registry.
pub struct SchemaCatalog<S> {
    source: S,
    tables: Mutex<Option<Arc<TableMap>>>,
    indexes: Mutex<Option<Arc<IndexMap>>>,
    models: Mutex<Option<Arc<ModelMap>>>,
}

/// Conditions restricting every metadata query to the default schema.
fn schema_scope() -> Vec<Condition> {
    vec![
        Condition::eq("table_catalog", ""),
        Condition::eq("table_schema", ""),
    ]
}

impl<S: RowSource> SchemaCatalog<S> {
    /// Create a catalog over a metadata source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            tables: Mutex::new(None),
            indexes: Mutex::new(None),
            models: Mutex::new(None),
        }
    }

    /// Per-table fields and interleaving declarations.
    pub fn tables(&self) -> Result<Arc<TableMap>, Error> {
        let mut slot = self.tables.lock();
        if let Some(cached) = slot.as_ref() {
            return Ok(cached.clone());
        }
        let tables = Arc::new(self.load_tables()?);
        *slot = Some(tables.clone());
        Ok(tables)
    }

    /// Per-table index definitions.
    pub fn indexes(&self) -> Result<Arc<IndexMap>, Error> {
        let mut slot = self.indexes.lock();
        if let Some(cached) = slot.as_ref() {
            return Ok(cached.clone());
        }
        let indexes = Arc::new(self.load_indexes()?);
        *slot = Some(indexes.clone());
        Ok(indexes)
    }

    /// Finalized table models keyed by table name.
    pub fn models(&self) -> Result<Arc<ModelMap>, Error> {
        let mut slot = self.models.lock();
        if let Some(cached) = slot.as_ref() {
            return Ok(cached.clone());
        }
        let models = Arc::new(self.load_models()?);
        *slot = Some(models.clone());
        Ok(models)
    }

    /// Look up a single table model; `None` for unknown tables.
    pub fn model(&self, table_name: &str) -> Result<Option<Arc<ModelDef>>, Error> {
        Ok(self.models()?.get(table_name).cloned())
    }

    fn load_tables(&self) -> Result<TableMap, Error> {
        let scope = schema_scope();

        let column_rows = self.source.fetch(CatalogTable::Columns, &scope)?;
        debug!(rows = column_rows.len(), "fetched column metadata");

        let mut columns: HashMap<String, HashMap<String, Field>> = HashMap::new();
        for raw in &column_rows {
            let row = ColumnRow::decode(raw)?;
            let field_type = FieldType::from_type_string(&row.spanner_type)?;
            let mut field = Field::new(field_type)
                .named(row.column_name.clone())
                .at_position(row.ordinal_position);
            if row.nullable {
                field = field.nullable();
            }
            columns
                .entry(row.table_name)
                .or_default()
                .insert(row.column_name, field);
        }

        let table_rows = self.source.fetch(CatalogTable::Tables, &scope)?;
        debug!(rows = table_rows.len(), "fetched table metadata");

        let mut tables = TableMap::new();
        for raw in &table_rows {
            let row = TableRow::decode(raw)?;
            let fields = columns.remove(&row.table_name).unwrap_or_default();
            tables.insert(
                row.table_name,
                TableInfo {
                    fields,
                    parent_table: row.parent_table_name,
                },
            );
        }

        info!(tables = tables.len(), "reflected table metadata");
        Ok(tables)
    }

    fn load_indexes(&self) -> Result<IndexMap, Error> {
        let scope = schema_scope();

        // ordinal_position is the column's position within its index; the
        // ordering is the only signal for reconstructing key order.
        let mut conditions = scope.clone();
        conditions.push(Condition::order_by_asc("ordinal_position"));
        let index_column_rows = self.source.fetch(CatalogTable::IndexColumns, &conditions)?;
        debug!(rows = index_column_rows.len(), "fetched index column metadata");

        let mut key_columns: HashMap<(String, String), Vec<String>> = HashMap::new();
        let mut storing_columns: HashMap<(String, String), HashSet<String>> = HashMap::new();
        for raw in &index_column_rows {
            let row = IndexColumnRow::decode(raw)?;
            let key = (row.table_name, row.index_name);
            if row.ordinal_position.is_some() {
                key_columns.entry(key).or_default().push(row.column_name);
            } else {
                storing_columns.entry(key).or_default().insert(row.column_name);
            }
        }

        let index_rows = self.source.fetch(CatalogTable::Indexes, &scope)?;
        debug!(rows = index_rows.len(), "fetched index metadata");

        let mut indexes = IndexMap::new();
        for raw in &index_rows {
            let row = IndexRow::decode(raw)?;
            let key = (row.table_name.clone(), row.index_name.clone());

            let mut index = IndexDef::new(
                row.table_name.clone(),
                row.index_name.clone(),
                key_columns.remove(&key).unwrap_or_default(),
            );
            index.storing_columns = storing_columns.remove(&key).unwrap_or_default();
            if row.is_unique {
                index = index.unique();
            }
            if row.is_null_filtered {
                index = index.null_filtered();
            }
            if let Some(parent) = row.parent_table_name {
                index = index.interleaved_in(parent);
            }

            indexes
                .entry(row.table_name)
                .or_default()
                .insert(row.index_name, index);
        }

        info!(indexes = index_rows.len(), "reflected index metadata");
        Ok(indexes)
    }

    fn load_models(&self) -> Result<ModelMap, Error> {
        let tables = self.tables()?;
        let indexes = self.indexes()?;

        // Pass 1: seed every table before resolving any parent reference,
        // so a child may name a parent reflected in any order.
        let mut seeds: BTreeMap<String, ModelSeed> = BTreeMap::new();
        for (table_name, info) in tables.iter() {
            let table_indexes = indexes.get(table_name).cloned().unwrap_or_default();
            let primary = table_indexes.get(IndexDef::PRIMARY).ok_or_else(|| {
                Error::Schema(format!("table {table_name} has no primary index"))
            })?;
            let key_columns: HashSet<&str> =
                primary.columns.iter().map(String::as_str).collect();

            // Each model owns its fields; the tables() view stays untouched.
            let mut fields: Vec<Field> = info.fields.values().cloned().collect();
            for field in &mut fields {
                field.mark_primary_key(key_columns.contains(field.name()));
            }

            seeds.insert(
                table_name.clone(),
                ModelSeed {
                    fields,
                    indexes: table_indexes,
                    parent: info.parent_table.clone(),
                },
            );
        }

        // Pass 2: rewrite parent names into direct references, parents
        // first, rejecting cycles.
        let mut models = ModelMap::new();
        let mut visiting = HashSet::new();
        let names: Vec<String> = seeds.keys().cloned().collect();
        for name in names {
            finalize_model(&name, &mut seeds, &mut models, &mut visiting)?;
        }

        info!(models = models.len(), "built table models");
        Ok(models)
    }
}

fn finalize_model(
    name: &str,
    seeds: &mut BTreeMap<String, ModelSeed>,
    models: &mut ModelMap,
    visiting: &mut HashSet<String>,
) -> Result<Arc<ModelDef>, Error> {
    if let Some(model) = models.get(name) {
        return Ok(model.clone());
    }
    if !visiting.insert(name.to_string()) {
        return Err(Error::Schema(format!(
            "interleave cycle involving table {name}"
        )));
    }

    let seed = seeds.remove(name).ok_or_else(|| {
        Error::Schema(format!("unknown interleaved parent table {name}"))
    })?;
    let parent = match &seed.parent {
        Some(parent_name) => Some(finalize_model(parent_name, seeds, models, visiting)?),
        None => None,
    };

    let model = Arc::new(ModelDef::new(name, seed.fields, seed.indexes, parent)?);
    visiting.remove(name);
    models.insert(name.to_string(), model.clone());
    Ok(model)
}
