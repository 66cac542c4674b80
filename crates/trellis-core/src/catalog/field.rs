//! Typed column descriptors.

use super::types::FieldType;
use crate::error::Error;
use trellis_proto::{ParamType, Value};

/// A typed column in a table model.
///
/// A field is either authored directly or reflected from a catalog column
/// row. The name and ordinal position are recorded by the owning table;
/// `primary_key` is set once primary-index membership is known.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    field_type: FieldType,
    nullable: bool,
    primary_key: bool,
    length: u32,
    allow_commit_timestamp: bool,
    position: u32,
}

impl Field {
    /// Create a non-nullable field of the given type.
    pub fn new(field_type: FieldType) -> Self {
        Self {
            name: String::new(),
            field_type,
            nullable: false,
            primary_key: false,
            length: 0,
            allow_commit_timestamp: false,
            position: 0,
        }
    }

    /// Mark the field nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the field as part of the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Set the field name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the ordinal position within the owning table.
    pub fn at_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }

    /// Set the length parameter.
    ///
    /// Fails when the field's type does not support a length.
    pub fn with_length(mut self, length: u32) -> Result<Self, Error> {
        if length > 0 && !self.field_type.supports_length() {
            return Err(Error::Validation(format!(
                "length can not be set on a {} field",
                self.field_type.ddl()
            )));
        }
        self.length = length;
        Ok(self)
    }

    /// Allow the database to write a commit timestamp into this field.
    ///
    /// Fails when the field's type does not support commit timestamps.
    pub fn with_commit_timestamp(mut self) -> Result<Self, Error> {
        if !self.field_type.supports_commit_timestamp() {
            return Err(Error::Validation(format!(
                "allow_commit_timestamp can not be set on a {} field",
                self.field_type.ddl()
            )));
        }
        self.allow_commit_timestamp = true;
        Ok(self)
    }

    /// Set primary-key membership once the primary index is known.
    pub(crate) fn mark_primary_key(&mut self, primary_key: bool) {
        self.primary_key = primary_key;
    }

    /// The DDL fragment for this column.
    pub fn ddl(&self) -> String {
        let mut base = self.field_type.ddl().to_string();
        if self.length > 0 {
            base = base.replace("(MAX)", &format!("({})", self.length));
        }
        if !self.nullable {
            base.push_str(" NOT NULL");
        }
        if self.allow_commit_timestamp {
            base.push_str(" OPTIONS (allow_commit_timestamp=true)");
        }
        base
    }

    /// Validate a value against this field.
    ///
    /// Null is only accepted on nullable fields; any present value must
    /// pass the type's shape check.
    pub fn validate(&self, value: &Value) -> Result<(), Error> {
        if value.is_null() {
            if self.nullable {
                Ok(())
            } else {
                Err(Error::Validation(format!(
                    "null value for non-nullable field {}",
                    self.name
                )))
            }
        } else {
            self.field_type.validate_value(value)
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field type.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Wire parameter type for values of this field.
    pub fn param_type(&self) -> ParamType {
        self.field_type.param_type()
    }

    /// Whether the field accepts null.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether the field is part of the primary key.
    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Configured length, 0 meaning MAX.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Whether commit timestamps are allowed.
    pub fn allows_commit_timestamp(&self) -> bool {
        self.allow_commit_timestamp
    }

    /// Ordinal position within the owning table.
    pub fn position(&self) -> u32 {
        self.position
    }
}
