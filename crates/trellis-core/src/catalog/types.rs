//! The field type taxonomy and its catalog type-string matchers.

use crate::error::Error;
use trellis_proto::{ParamType, Value};

/// Column types supported by Trellis.
///
/// Each variant knows its canonical DDL fragment, the wire parameter type
/// it binds as, how to recognize its own catalog type string, and how to
/// validate a runtime value against itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Boolean column.
    Boolean,
    /// 64-bit integer column.
    Integer,
    /// Array of 64-bit integers.
    IntArray,
    /// 64-bit float column.
    Float,
    /// UTF-8 string column, length-parameterized.
    String,
    /// Array of strings, length-parameterized.
    StringArray,
    /// Timestamp column; the only type that may allow commit timestamps.
    Timestamp,
    /// Binary column whose values must be base64-encoded.
    Base64Bytes,
}

impl FieldType {
    /// All field types in matcher precedence order.
    ///
    /// `from_type_string` tries these in order and takes the first match,
    /// so this order encodes precedence for ambiguous prefixes.
    pub const ALL: [FieldType; 8] = [
        FieldType::Boolean,
        FieldType::Integer,
        FieldType::IntArray,
        FieldType::Float,
        FieldType::String,
        FieldType::StringArray,
        FieldType::Timestamp,
        FieldType::Base64Bytes,
    ];

    /// Resolve a catalog type string to a field type.
    pub fn from_type_string(type_string: &str) -> Result<FieldType, Error> {
        FieldType::ALL
            .into_iter()
            .find(|field_type| field_type.matches(type_string))
            .ok_or_else(|| Error::UnknownType(type_string.to_string()))
    }

    /// The canonical DDL fragment for this type.
    ///
    /// Length-parameterized types carry a `(MAX)` placeholder.
    pub fn ddl(&self) -> &'static str {
        match self {
            FieldType::Boolean => "BOOL",
            FieldType::Integer => "INT64",
            FieldType::IntArray => "ARRAY<INT64>",
            FieldType::Float => "FLOAT64",
            FieldType::String => "STRING(MAX)",
            FieldType::StringArray => "ARRAY<STRING(MAX)>",
            FieldType::Timestamp => "TIMESTAMP",
            FieldType::Base64Bytes => "BYTES(MAX)",
        }
    }

    /// The wire parameter type values of this type bind as.
    pub fn param_type(&self) -> ParamType {
        match self {
            FieldType::Boolean => ParamType::Bool,
            FieldType::Integer => ParamType::Int64,
            FieldType::IntArray => ParamType::Int64Array,
            FieldType::Float => ParamType::Float64,
            FieldType::String => ParamType::String,
            FieldType::StringArray => ParamType::StringArray,
            FieldType::Timestamp => ParamType::Timestamp,
            FieldType::Base64Bytes => ParamType::Bytes,
        }
    }

    /// Test whether a catalog type string denotes this type.
    pub fn matches(&self, type_string: &str) -> bool {
        match self {
            FieldType::Boolean => type_string == "BOOL",
            FieldType::Integer => type_string == "INT64",
            FieldType::IntArray => type_string == "ARRAY<INT64>",
            FieldType::Float => type_string == "FLOAT64",
            FieldType::String => {
                type_string.starts_with("STRING(") && type_string.ends_with(')')
            }
            FieldType::StringArray => {
                type_string.starts_with("ARRAY<STRING(") && type_string.ends_with(")>")
            }
            FieldType::Timestamp => type_string.starts_with("TIMESTAMP"),
            FieldType::Base64Bytes => {
                type_string.starts_with("BYTES(") && type_string.ends_with(')')
            }
        }
    }

    /// Whether this type accepts a length parameter.
    pub fn supports_length(&self) -> bool {
        matches!(
            self,
            FieldType::String | FieldType::StringArray | FieldType::Base64Bytes
        )
    }

    /// Whether columns of this type may allow commit timestamps.
    pub fn supports_commit_timestamp(&self) -> bool {
        matches!(self, FieldType::Timestamp)
    }

    /// Validate a non-null value's shape against this type.
    pub fn validate_value(&self, value: &Value) -> Result<(), Error> {
        match (self, value) {
            (FieldType::Boolean, Value::Bool(_)) => Ok(()),
            (FieldType::Integer, Value::Int64(_)) => Ok(()),
            (FieldType::IntArray, Value::Int64Array(_)) => Ok(()),
            // Integers are accepted where a float is expected.
            (FieldType::Float, Value::Float64(_) | Value::Int64(_)) => Ok(()),
            (FieldType::String, Value::String(_)) => Ok(()),
            (FieldType::StringArray, Value::StringArray(_)) => Ok(()),
            (FieldType::Timestamp, Value::Timestamp(_)) => Ok(()),
            (FieldType::Base64Bytes, Value::Bytes(bytes)) => {
                if is_base64(bytes) {
                    Ok(())
                } else {
                    Err(Error::Validation(format!(
                        "{value:?} must be base64-encoded bytes"
                    )))
                }
            }
            _ => Err(Error::Validation(format!(
                "{value:?} is not of type {}",
                self.ddl()
            ))),
        }
    }
}

/// Check that bytes are valid standard-alphabet base64 with padding.
fn is_base64(data: &[u8]) -> bool {
    if data.len() % 4 != 0 {
        return false;
    }
    let padding = data.iter().rev().take_while(|&&b| b == b'=').count();
    if padding > 2 {
        return false;
    }
    data[..data.len() - padding].iter().all(|&b| {
        b.is_ascii_alphanumeric() || b == b'+' || b == b'/'
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_owned_strings() {
        assert!(FieldType::Boolean.matches("BOOL"));
        assert!(FieldType::Integer.matches("INT64"));
        assert!(FieldType::IntArray.matches("ARRAY<INT64>"));
        assert!(FieldType::Float.matches("FLOAT64"));
        assert!(FieldType::String.matches("STRING(36)"));
        assert!(FieldType::String.matches("STRING(MAX)"));
        assert!(FieldType::StringArray.matches("ARRAY<STRING(MAX)>"));
        assert!(FieldType::StringArray.matches("ARRAY<STRING(100)>"));
        assert!(FieldType::Timestamp.matches("TIMESTAMP"));
        assert!(FieldType::Base64Bytes.matches("BYTES(1024)"));
    }

    #[test]
    fn test_matches_rejects_foreign_strings() {
        assert!(!FieldType::Boolean.matches("INT64"));
        assert!(!FieldType::String.matches("BYTES(36)"));
        assert!(!FieldType::StringArray.matches("STRING(36)"));
        assert!(!FieldType::IntArray.matches("ARRAY<STRING(MAX)>"));
    }

    #[test]
    fn test_every_type_matches_its_own_ddl() {
        for field_type in FieldType::ALL {
            assert!(
                field_type.matches(field_type.ddl()),
                "{field_type:?} does not match its own ddl"
            );
        }
    }

    #[test]
    fn test_from_type_string() {
        assert_eq!(
            FieldType::from_type_string("STRING(36)").unwrap(),
            FieldType::String
        );
        assert_eq!(
            FieldType::from_type_string("ARRAY<INT64>").unwrap(),
            FieldType::IntArray
        );
        assert_eq!(
            FieldType::from_type_string("TIMESTAMP").unwrap(),
            FieldType::Timestamp
        );

        let err = FieldType::from_type_string("JSON").unwrap_err();
        assert!(matches!(err, Error::UnknownType(_)));
    }

    #[test]
    fn test_capability_flags() {
        assert!(FieldType::String.supports_length());
        assert!(FieldType::StringArray.supports_length());
        assert!(FieldType::Base64Bytes.supports_length());
        assert!(!FieldType::Integer.supports_length());
        assert!(!FieldType::Timestamp.supports_length());

        assert!(FieldType::Timestamp.supports_commit_timestamp());
        assert!(!FieldType::String.supports_commit_timestamp());
    }

    #[test]
    fn test_validate_value_shapes() {
        assert!(FieldType::Boolean.validate_value(&Value::Bool(true)).is_ok());
        assert!(FieldType::Boolean.validate_value(&Value::Int64(1)).is_err());

        assert!(FieldType::Float.validate_value(&Value::Float64(1.0)).is_ok());
        assert!(FieldType::Float.validate_value(&Value::Int64(1)).is_ok());

        assert!(FieldType::StringArray
            .validate_value(&Value::StringArray(vec!["a".into()]))
            .is_ok());
        assert!(FieldType::StringArray
            .validate_value(&Value::Int64Array(vec![1]))
            .is_err());

        assert!(FieldType::Timestamp
            .validate_value(&Value::Timestamp(1_700_000_000_000_000))
            .is_ok());
        assert!(FieldType::Timestamp.validate_value(&Value::Int64(5)).is_err());
    }

    #[test]
    fn test_base64_validation() {
        assert!(FieldType::Base64Bytes
            .validate_value(&Value::Bytes(b"aGVsbG8=".to_vec()))
            .is_ok());
        assert!(FieldType::Base64Bytes
            .validate_value(&Value::Bytes(Vec::new()))
            .is_ok());
        assert!(FieldType::Base64Bytes
            .validate_value(&Value::Bytes(b"not base64!".to_vec()))
            .is_err());
        assert!(FieldType::Base64Bytes
            .validate_value(&Value::Bytes(b"abc".to_vec()))
            .is_err());
    }

    #[test]
    fn test_param_types() {
        assert_eq!(FieldType::Integer.param_type(), ParamType::Int64);
        assert_eq!(FieldType::IntArray.param_type(), ParamType::Int64Array);
        assert_eq!(FieldType::Base64Bytes.param_type(), ParamType::Bytes);
    }
}
