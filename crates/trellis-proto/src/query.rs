//! Filter and ordering predicates for metadata queries.

use crate::value::Value;
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A predicate applied to a metadata query.
///
/// Metadata fetches are restricted to equality filters and ascending or
/// descending ordering; that is the whole surface the catalog consumes.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize)]
pub enum Condition {
    /// Column equals value.
    Eq {
        /// Column to filter on.
        column: String,
        /// Value the column must equal.
        value: Value,
    },
    /// Order results by a column.
    OrderBy {
        /// Column to order by.
        column: String,
        /// Sort direction.
        direction: OrderDirection,
    },
}

impl Condition {
    /// Create an equality condition.
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::Eq {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Create an ascending ordering condition.
    pub fn order_by_asc(column: impl Into<String>) -> Self {
        Condition::OrderBy {
            column: column.into(),
            direction: OrderDirection::Asc,
        }
    }

    /// Create a descending ordering condition.
    pub fn order_by_desc(column: impl Into<String>) -> Self {
        Condition::OrderBy {
            column: column.into(),
            direction: OrderDirection::Desc,
        }
    }
}

/// Sort direction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub enum OrderDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}
