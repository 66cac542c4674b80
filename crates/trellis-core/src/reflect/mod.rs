//! Schema reflection from database metadata.
//!
//! The reflect module reads the database's information schema through a
//! [`RowSource`] and assembles it into finalized table models: columns are
//! grouped per table, index key order is reconstructed from ordinal
//! positions, primary keys are inferred from the reserved primary index,
//! and interleaved parent names are resolved into direct model references.

mod catalog;
mod rows;
mod source;

pub use catalog::{SchemaCatalog, TableInfo};
pub use source::{CatalogTable, MemorySource, RowSource};
