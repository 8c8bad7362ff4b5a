//! Codec error types.

use thiserror::Error;

/// Errors raised by schema building, validation, encoding and decoding.
///
/// Field-scoped variants carry a field path. Nested entity fields are
/// reported as `address.city` and sequence elements as `employees[1].age`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Declared leaf type has no primitive kind mapping
    #[error("Field '{field}' of entity '{entity}' has unsupported type '{type_name}'")]
    UnsupportedFieldType {
        entity: String,
        field: String,
        type_name: String,
    },

    /// Entity declares the same field name twice
    #[error("Field '{field}' declared more than once in entity '{entity}'")]
    DuplicateField { entity: String, field: String },

    /// Nested entity declarations exceed the configured depth
    #[error("Entity '{entity}' nests deeper than {depth} levels")]
    NestingTooDeep { entity: String, depth: usize },

    /// Schema lookup for an entity that was never registered
    #[error("Entity '{entity}' not registered")]
    NotRegistered { entity: String },

    /// Required field absent from the input
    #[error("Required field '{field}' is missing")]
    RequiredFieldMissing { field: String },

    /// Value shape does not match the field's kind
    #[error("Type mismatch for field '{field}': expected {expected}")]
    TypeMismatch { field: String, expected: String },

    /// Bounded integer outside its representable range
    #[error("Value {value} for field '{field}' out of range [{min}, {max}]")]
    RangeOverflow {
        field: String,
        value: String,
        min: i64,
        max: i64,
    },

    /// Date, URL or UUID string failed to parse
    #[error("Field '{field}' value {value:?} is not a valid {kind}")]
    UnparsableValue {
        field: String,
        kind: String,
        value: String,
    },

    /// Raw value has no matching enumeration case
    #[error("Field '{field}' code {code} is not a case of enumeration '{enumeration}'")]
    UnknownEnumerationCode {
        field: String,
        enumeration: String,
        code: i64,
    },

    /// Set-kind field decoded to fewer distinct elements than it was given
    #[error("Field '{field}' contains duplicate set elements")]
    DuplicateInSet { field: String },

    /// Expected a JSON array
    #[error("Field '{field}' is not an array")]
    NotArray { field: String },

    /// Expected a JSON object for an entity
    #[error("Value for entity '{entity}' is not an object")]
    NotObject { entity: String },

    /// NaN or infinite number cannot be written to the wire
    #[error("Field '{field}' holds a non-finite number")]
    NonFiniteNumber { field: String },
}

impl CodecError {
    /// Returns the field path this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            CodecError::UnsupportedFieldType { field, .. }
            | CodecError::DuplicateField { field, .. }
            | CodecError::RequiredFieldMissing { field }
            | CodecError::TypeMismatch { field, .. }
            | CodecError::RangeOverflow { field, .. }
            | CodecError::UnparsableValue { field, .. }
            | CodecError::UnknownEnumerationCode { field, .. }
            | CodecError::DuplicateInSet { field }
            | CodecError::NotArray { field }
            | CodecError::NonFiniteNumber { field } => Some(field),
            CodecError::NestingTooDeep { .. }
            | CodecError::NotRegistered { .. }
            | CodecError::NotObject { .. } => None,
        }
    }

    fn field_mut(&mut self) -> Option<&mut String> {
        match self {
            CodecError::UnsupportedFieldType { field, .. }
            | CodecError::DuplicateField { field, .. }
            | CodecError::RequiredFieldMissing { field }
            | CodecError::TypeMismatch { field, .. }
            | CodecError::RangeOverflow { field, .. }
            | CodecError::UnparsableValue { field, .. }
            | CodecError::UnknownEnumerationCode { field, .. }
            | CodecError::DuplicateInSet { field }
            | CodecError::NotArray { field }
            | CodecError::NonFiniteNumber { field } => Some(field),
            CodecError::NestingTooDeep { .. }
            | CodecError::NotRegistered { .. }
            | CodecError::NotObject { .. } => None,
        }
    }

    /// Prefixes the field path with the enclosing entity field.
    ///
    /// A `NotObject` raised for a nested entity becomes a `TypeMismatch` on
    /// the enclosing field so the caller still learns where it happened.
    pub fn within(self, parent: &str) -> Self {
        match self {
            CodecError::NotObject { entity } => CodecError::TypeMismatch {
                field: parent.to_string(),
                expected: format!("entity({entity})"),
            },
            mut other => {
                if let Some(field) = other.field_mut() {
                    *field = format!("{parent}.{field}");
                }
                other
            }
        }
    }

    /// Marks the error as raised by element `index` of collection `field`.
    ///
    /// The path must start with `field`; `tags` becomes `tags[3]` and
    /// `employees.age` becomes `employees[1].age`.
    pub fn at_index(mut self, field: &str, index: usize) -> Self {
        if let Some(path) = self.field_mut() {
            if let Some(rest) = path.strip_prefix(field) {
                *path = format!("{field}[{index}]{rest}");
            }
        }
        self
    }
}
