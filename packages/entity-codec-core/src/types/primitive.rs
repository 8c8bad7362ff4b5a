//! Leaf kinds and their wire conversion rules.

use std::fmt;
use std::sync::Arc;

use serde_json::{Number, Value};
use url::Url;
use uuid::Uuid;

use super::date::{format_date, parse_date};
use super::value::Scalar;
use crate::codec::{decode_record, encode_record};
use crate::error::CodecError;
use crate::schema::SchemaDescriptor;

/// Closed set of leaf types a field can hold.
///
/// Every kind knows how to turn a [`Scalar`] into a wire value and back.
/// Integer kinds and enumerations carry a range that decoding enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// `true` / `false`
    Boolean,
    /// UTC timestamp, written as an ISO-8601 string
    Date,
    /// 64-bit float
    Double,
    /// 32-bit float, widened to 64 bits on the wire
    Float32,
    /// Platform-width integer
    Int,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// UTF-8 string
    String,
    /// Absolute URL
    Url,
    /// UUID, written in canonical upper-case form
    Uuid,
    /// Enumeration backed by a 16-bit raw value
    Enumeration {
        name: &'static str,
        raw_values: &'static [i16],
    },
    /// Nested entity with its own schema
    Entity(Arc<SchemaDescriptor>),
}

impl PrimitiveKind {
    /// Maps a leaf type name to its kind.
    ///
    /// Returns `None` for types with no wire representation; schema
    /// building reports those as unsupported.
    pub fn from_type_name(name: &str) -> Option<Self> {
        let kind = match name {
            "bool" => PrimitiveKind::Boolean,
            "DateTime<Utc>" => PrimitiveKind::Date,
            "f64" => PrimitiveKind::Double,
            "f32" => PrimitiveKind::Float32,
            "isize" => PrimitiveKind::Int,
            "i16" => PrimitiveKind::Int16,
            "i32" => PrimitiveKind::Int32,
            "i64" => PrimitiveKind::Int64,
            "String" => PrimitiveKind::String,
            "Url" => PrimitiveKind::Url,
            "Uuid" => PrimitiveKind::Uuid,
            _ => return None,
        };
        Some(kind)
    }

    /// Inclusive range accepted by integer-backed kinds.
    pub fn range(&self) -> Option<(i64, i64)> {
        match self {
            PrimitiveKind::Int16 | PrimitiveKind::Enumeration { .. } => {
                Some((i64::from(i16::MIN), i64::from(i16::MAX)))
            }
            PrimitiveKind::Int32 => Some((i64::from(i32::MIN), i64::from(i32::MAX))),
            PrimitiveKind::Int | PrimitiveKind::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Returns the nested schema for entity kinds.
    pub fn schema(&self) -> Option<&Arc<SchemaDescriptor>> {
        match self {
            PrimitiveKind::Entity(schema) => Some(schema),
            _ => None,
        }
    }

    /// Converts one scalar to its wire value.
    pub fn encode(&self, scalar: &Scalar, field: &str) -> Result<Value, CodecError> {
        let value = match (self, scalar) {
            (PrimitiveKind::Boolean, Scalar::Bool(b)) => Value::Bool(*b),
            (PrimitiveKind::Date, Scalar::Date(date)) => Value::String(format_date(date)),
            (PrimitiveKind::Double, Scalar::Double(x)) => finite(*x, field)?,
            (PrimitiveKind::Float32, Scalar::Float32(x)) => finite(f64::from(*x), field)?,
            (PrimitiveKind::Int, Scalar::Int(i)) | (PrimitiveKind::Int64, Scalar::Int64(i)) => {
                Value::from(*i)
            }
            (PrimitiveKind::Int16, Scalar::Int16(i)) => Value::from(i64::from(*i)),
            (PrimitiveKind::Int32, Scalar::Int32(i)) => Value::from(i64::from(*i)),
            (PrimitiveKind::String, Scalar::String(s)) => Value::String(s.clone()),
            (PrimitiveKind::Url, Scalar::Url(url)) => Value::String(url.as_str().to_string()),
            (PrimitiveKind::Uuid, Scalar::Uuid(uuid)) => {
                let mut buffer = Uuid::encode_buffer();
                Value::String(uuid.hyphenated().encode_upper(&mut buffer).to_string())
            }
            (PrimitiveKind::Enumeration { name, raw_values }, Scalar::Enumeration(raw)) => {
                if !raw_values.contains(raw) {
                    return Err(CodecError::UnknownEnumerationCode {
                        field: field.to_string(),
                        enumeration: name.to_string(),
                        code: i64::from(*raw),
                    });
                }
                Value::from(i64::from(*raw))
            }
            (PrimitiveKind::Entity(schema), Scalar::Entity(record)) => {
                let object = encode_record(record, schema).map_err(|e| e.within(field))?;
                Value::Object(object)
            }
            (kind, other) => return Err(other.mismatch(field, &kind.to_string())),
        };
        Ok(value)
    }

    /// Converts one wire value to a scalar of this kind.
    ///
    /// Nothing is coerced: strings are not parsed as numbers, fractional
    /// numbers are not truncated to integers.
    pub fn decode(&self, value: &Value, field: &str) -> Result<Scalar, CodecError> {
        let scalar = match self {
            PrimitiveKind::Boolean => match value {
                Value::Bool(b) => Scalar::Bool(*b),
                _ => return Err(self.mismatch(field)),
            },
            PrimitiveKind::String => match value {
                Value::String(s) => Scalar::String(s.clone()),
                _ => return Err(self.mismatch(field)),
            },
            PrimitiveKind::Double => Scalar::Double(self.float(value, field)?),
            PrimitiveKind::Float32 => {
                let wide = self.float(value, field)?;
                let narrow = wide as f32;
                if wide.is_finite() && !narrow.is_finite() {
                    return Err(CodecError::NonFiniteNumber {
                        field: field.to_string(),
                    });
                }
                Scalar::Float32(narrow)
            }
            PrimitiveKind::Int => Scalar::Int(self.integer(value, field)?),
            PrimitiveKind::Int64 => Scalar::Int64(self.integer(value, field)?),
            PrimitiveKind::Int16 => Scalar::Int16(narrow(self.integer(value, field)?, field)?),
            PrimitiveKind::Int32 => Scalar::Int32(narrow(self.integer(value, field)?, field)?),
            PrimitiveKind::Date => {
                let s = self.string(value, field)?;
                Scalar::Date(parse_date(s).ok_or_else(|| unparsable(field, "date", s))?)
            }
            PrimitiveKind::Url => {
                let s = self.string(value, field)?;
                Scalar::Url(Url::parse(s).map_err(|_| unparsable(field, "url", s))?)
            }
            PrimitiveKind::Uuid => {
                let s = self.string(value, field)?;
                Scalar::Uuid(Uuid::parse_str(s).map_err(|_| unparsable(field, "uuid", s))?)
            }
            PrimitiveKind::Enumeration { name, raw_values } => {
                let raw: i16 = narrow(self.integer(value, field)?, field)?;
                if !raw_values.contains(&raw) {
                    return Err(CodecError::UnknownEnumerationCode {
                        field: field.to_string(),
                        enumeration: name.to_string(),
                        code: i64::from(raw),
                    });
                }
                Scalar::Enumeration(raw)
            }
            PrimitiveKind::Entity(schema) => {
                if !value.is_object() {
                    return Err(self.mismatch(field));
                }
                let record = decode_record(value, schema).map_err(|e| e.within(field))?;
                Scalar::Entity(record)
            }
        };
        Ok(scalar)
    }

    /// Reads an integer and checks it against this kind's range.
    fn integer(&self, value: &Value, field: &str) -> Result<i64, CodecError> {
        let Value::Number(n) = value else {
            return Err(self.mismatch(field));
        };
        let (min, max) = self.range().unwrap_or((i64::MIN, i64::MAX));
        match n.as_i64() {
            Some(i) if (min..=max).contains(&i) => Ok(i),
            Some(_) => Err(overflow(field, n, min, max)),
            // Too large for i64.
            None if n.is_u64() => Err(overflow(field, n, min, max)),
            None => Err(self.mismatch(field)),
        }
    }

    fn float(&self, value: &Value, field: &str) -> Result<f64, CodecError> {
        value.as_f64().ok_or_else(|| self.mismatch(field))
    }

    fn string<'a>(&self, value: &'a Value, field: &str) -> Result<&'a str, CodecError> {
        value.as_str().ok_or_else(|| self.mismatch(field))
    }

    fn mismatch(&self, field: &str) -> CodecError {
        CodecError::TypeMismatch {
            field: field.to_string(),
            expected: self.to_string(),
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::Boolean => f.write_str("boolean"),
            PrimitiveKind::Date => f.write_str("date"),
            PrimitiveKind::Double => f.write_str("double"),
            PrimitiveKind::Float32 => f.write_str("float32"),
            PrimitiveKind::Int => f.write_str("int"),
            PrimitiveKind::Int16 => f.write_str("int16"),
            PrimitiveKind::Int32 => f.write_str("int32"),
            PrimitiveKind::Int64 => f.write_str("int64"),
            PrimitiveKind::String => f.write_str("string"),
            PrimitiveKind::Url => f.write_str("url"),
            PrimitiveKind::Uuid => f.write_str("uuid"),
            PrimitiveKind::Enumeration { name, .. } => write!(f, "enumeration({name})"),
            PrimitiveKind::Entity(schema) => write!(f, "entity({})", schema.name()),
        }
    }
}

fn finite(x: f64, field: &str) -> Result<Value, CodecError> {
    Number::from_f64(x)
        .map(Value::Number)
        .ok_or_else(|| CodecError::NonFiniteNumber {
            field: field.to_string(),
        })
}

fn narrow<T: TryFrom<i64>>(i: i64, field: &str) -> Result<T, CodecError> {
    // Only reachable if a kind's range() is wider than its storage type.
    T::try_from(i).map_err(|_| CodecError::RangeOverflow {
        field: field.to_string(),
        value: i.to_string(),
        min: i64::MIN,
        max: i64::MAX,
    })
}

fn overflow(field: &str, n: &Number, min: i64, max: i64) -> CodecError {
    CodecError::RangeOverflow {
        field: field.to_string(),
        value: n.to_string(),
        min,
        max,
    }
}

fn unparsable(field: &str, kind: &str, value: &str) -> CodecError {
    CodecError::UnparsableValue {
        field: field.to_string(),
        kind: kind.to_string(),
        value: value.to_string(),
    }
}
