//! Catalog definitions for reflected schemas.
//!
//! The catalog module holds the typed building blocks a reflected table is
//! assembled from: the field type taxonomy, column fields, indexes, and the
//! finalized per-table model descriptor.

mod field;
mod index;
mod model;
mod types;

pub use field::Field;
pub use index::IndexDef;
pub use model::ModelDef;
pub use types::FieldType;
