//! Trellis Core - Typed table models reflected from database metadata.
//!
//! This crate builds schema-aware table descriptors for a distributed SQL
//! database by reading its information schema: columns become typed
//! [`Field`]s, indexes become [`IndexDef`]s, and every table gets a
//! finalized [`ModelDef`] with its primary key and interleaved parent
//! resolved. Reflection happens at most once per [`SchemaCatalog`]; the
//! results are shared read-only.

pub mod catalog;
pub mod error;
pub mod reflect;

pub use catalog::{Field, FieldType, IndexDef, ModelDef};
pub use error::Error;
pub use reflect::{CatalogTable, MemorySource, RowSource, SchemaCatalog, TableInfo};

/// Re-export protocol types.
pub use trellis_proto as proto;
