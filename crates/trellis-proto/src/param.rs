//! Parameter type descriptors for wire-level binding.

use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Wire parameter type for binding query parameters.
///
/// The transport layer uses this descriptor to pick the parameter encoding
/// for a value; the catalog maps every field type onto exactly one of these.
///
/// Note: array types are flattened (Int64Array, StringArray) rather than
/// expressed as `Array(Box<ParamType>)` so the enum archives without
/// recursion under rkyv.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub enum ParamType {
    /// Boolean parameter.
    Bool,
    /// 64-bit integer parameter.
    Int64,
    /// 64-bit float parameter.
    Float64,
    /// UTF-8 string parameter.
    String,
    /// Binary parameter.
    Bytes,
    /// Timestamp parameter.
    Timestamp,
    /// Array of 64-bit integers.
    Int64Array,
    /// Array of strings.
    StringArray,
}

impl ParamType {
    /// Check if this is an array parameter type.
    pub fn is_array(&self) -> bool {
        matches!(self, ParamType::Int64Array | ParamType::StringArray)
    }

    /// The element type for array parameters.
    pub fn element_type(&self) -> Option<ParamType> {
        match self {
            ParamType::Int64Array => Some(ParamType::Int64),
            ParamType::StringArray => Some(ParamType::String),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_types() {
        assert!(ParamType::Int64Array.is_array());
        assert!(ParamType::StringArray.is_array());
        assert!(!ParamType::Int64.is_array());

        assert_eq!(ParamType::Int64Array.element_type(), Some(ParamType::Int64));
        assert_eq!(
            ParamType::StringArray.element_type(),
            Some(ParamType::String)
        );
        assert_eq!(ParamType::Bool.element_type(), None);
    }
}
