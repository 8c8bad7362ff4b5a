//! Runtime field values and the reconstruction map.

use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use super::declare::FieldType;
use crate::entity::{Entity, Enumeration};
use crate::error::CodecError;

/// A single decoded leaf value.
///
/// Each variant corresponds to one [`PrimitiveKind`](super::PrimitiveKind).
/// Ordering and equality are total: floats compare with `total_cmp`, so
/// scalars can live in a [`BTreeSet`].
#[derive(Debug, Clone)]
pub enum Scalar {
    /// Boolean value
    Bool(bool),
    /// UTC timestamp
    Date(DateTime<Utc>),
    /// 64-bit floating point number
    Double(f64),
    /// 32-bit floating point number
    Float32(f32),
    /// Platform-width integer
    Int(i64),
    /// 16-bit signed integer
    Int16(i16),
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),
    /// UTF-8 string
    String(String),
    /// Absolute URL
    Url(Url),
    /// Unique identifier
    Uuid(Uuid),
    /// Raw value of an enumeration case
    Enumeration(i16),
    /// Nested entity
    Entity(Record),
}

impl Scalar {
    /// Wraps an enumeration case as its raw value.
    pub fn enumeration<E: Enumeration>(value: &E) -> Self {
        Scalar::Enumeration(value.raw_value())
    }

    /// Wraps a nested entity as its record.
    pub fn entity<E: Entity>(value: &E) -> Self {
        Scalar::Entity(value.to_record())
    }

    /// Converts the raw value back into an enumeration case.
    pub fn into_enumeration<E: Enumeration>(self, field: &str) -> Result<E, CodecError> {
        match self {
            Scalar::Enumeration(raw) => {
                E::from_raw_value(raw).ok_or_else(|| CodecError::UnknownEnumerationCode {
                    field: field.to_string(),
                    enumeration: E::NAME.to_string(),
                    code: i64::from(raw),
                })
            }
            other => Err(other.mismatch(field, &format!("enumeration({})", E::NAME))),
        }
    }

    /// Reconstructs a nested entity from its record.
    pub fn into_entity<E: Entity>(self, field: &str) -> Result<E, CodecError> {
        match self {
            Scalar::Entity(record) => E::from_record(record).map_err(|e| e.within(field)),
            other => Err(other.mismatch(field, &format!("entity({})", E::ENTITY_NAME))),
        }
    }

    /// Name of the runtime type held by this scalar.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Date(_) => "DateTime<Utc>",
            Scalar::Double(_) => "f64",
            Scalar::Float32(_) => "f32",
            Scalar::Int(_) => "isize",
            Scalar::Int16(_) => "i16",
            Scalar::Int32(_) => "i32",
            Scalar::Int64(_) => "i64",
            Scalar::String(_) => "String",
            Scalar::Url(_) => "Url",
            Scalar::Uuid(_) => "Uuid",
            Scalar::Enumeration(_) => "enumeration",
            Scalar::Entity(_) => "entity",
        }
    }

    pub(crate) fn mismatch(&self, field: &str, expected: &str) -> CodecError {
        tracing::trace!(
            "Field '{}' holds {} where {} was expected",
            field,
            self.type_name(),
            expected
        );
        CodecError::TypeMismatch {
            field: field.to_string(),
            expected: expected.to_string(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Scalar::Bool(_) => 0,
            Scalar::Date(_) => 1,
            Scalar::Double(_) => 2,
            Scalar::Float32(_) => 3,
            Scalar::Int(_) => 4,
            Scalar::Int16(_) => 5,
            Scalar::Int32(_) => 6,
            Scalar::Int64(_) => 7,
            Scalar::String(_) => 8,
            Scalar::Url(_) => 9,
            Scalar::Uuid(_) => 10,
            Scalar::Enumeration(_) => 11,
            Scalar::Entity(_) => 12,
        }
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a.cmp(b),
            (Scalar::Date(a), Scalar::Date(b)) => a.cmp(b),
            (Scalar::Double(a), Scalar::Double(b)) => a.total_cmp(b),
            (Scalar::Float32(a), Scalar::Float32(b)) => a.total_cmp(b),
            (Scalar::Int(a), Scalar::Int(b)) => a.cmp(b),
            (Scalar::Int16(a), Scalar::Int16(b)) => a.cmp(b),
            (Scalar::Int32(a), Scalar::Int32(b)) => a.cmp(b),
            (Scalar::Int64(a), Scalar::Int64(b)) => a.cmp(b),
            (Scalar::String(a), Scalar::String(b)) => a.cmp(b),
            (Scalar::Url(a), Scalar::Url(b)) => a.as_str().cmp(b.as_str()),
            (Scalar::Uuid(a), Scalar::Uuid(b)) => a.cmp(b),
            (Scalar::Enumeration(a), Scalar::Enumeration(b)) => a.cmp(b),
            (Scalar::Entity(a), Scalar::Entity(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scalar {}

/// Value of one field: a scalar or a collection of scalars.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue {
    /// Exactly one value
    Single(Scalar),
    /// Ordered values
    Sequence(Vec<Scalar>),
    /// Deduplicated values
    Set(BTreeSet<Scalar>),
}

impl FieldValue {
    /// Name of the runtime shape, e.g. `Vec<i16>`.
    pub fn type_name(&self) -> String {
        fn element(values: &mut dyn Iterator<Item = &Scalar>) -> &'static str {
            values.next().map(Scalar::type_name).unwrap_or("_")
        }
        match self {
            FieldValue::Single(scalar) => scalar.type_name().to_string(),
            FieldValue::Sequence(values) => format!("Vec<{}>", element(&mut values.iter())),
            FieldValue::Set(values) => format!("Set<{}>", element(&mut values.iter())),
        }
    }
}

/// Reconstruction map: field name to decoded value.
///
/// Produced by decoding and by [`Entity::to_record`]; consumed by
/// encoding and by [`Entity::from_record`]. Absent optional fields have no
/// entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a typed field value. `None` optionals are not stored.
    pub fn put<T: FieldType>(&mut self, name: &str, value: &T) {
        match value.to_field() {
            Some(field) => {
                self.fields.insert(name.to_string(), field);
            }
            None => {
                self.fields.remove(name);
            }
        }
    }

    /// Builder form of [`Record::put`].
    #[must_use]
    pub fn with<T: FieldType>(mut self, name: &str, value: &T) -> Self {
        self.put(name, value);
        self
    }

    /// Removes a field and converts it to the requested type.
    ///
    /// Missing fields convert to `None` for `Option<T>` targets and fail
    /// with [`CodecError::RequiredFieldMissing`] otherwise.
    pub fn take<T: FieldType>(&mut self, name: &str) -> Result<T, CodecError> {
        T::from_field(self.fields.remove(name), name)
    }

    /// Inserts a raw field value, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(name.into(), value)
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Removes and returns the value stored under `name`.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Returns `true` if a value is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of stored fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is stored.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over stored fields in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }
}

impl IntoIterator for Record {
    type Item = (String, FieldValue);
    type IntoIter = btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
