//! Trellis protocol types.
//!
//! This crate defines the wire-level types shared between the Trellis
//! catalog and the transport layer that talks to the database:
//!
//! - [`value`] - Runtime values for query parameters, metadata rows, and
//!   validation
//! - [`param`] - Parameter type descriptors used for wire-level binding
//! - [`query`] - Filter and ordering predicates consumed by metadata queries
//! - [`row`] - Named-column rows returned by metadata queries
//!
//! # Serialization
//!
//! All types derive `rkyv::Archive`, `rkyv::Serialize`, and
//! `rkyv::Deserialize` alongside serde, and use flat (non-recursive) enum
//! designs so they archive cleanly.

pub mod param;
pub mod query;
pub mod row;
pub mod value;

pub use param::ParamType;
pub use query::{Condition, OrderDirection};
pub use row::Row;
pub use value::Value;
