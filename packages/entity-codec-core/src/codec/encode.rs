//! Record to wire encoding.

use serde_json::{Map, Value};

use crate::error::CodecError;
use crate::schema::{FieldDescriptor, SchemaDescriptor};
use crate::types::{CollectionKind, FieldValue, PrimitiveKind, Record, Scalar};

/// Encodes a record into a wire object.
///
/// Absent optional fields are left out of the object rather than written as
/// `null`. Sets are written as arrays in their value order. Record entries
/// not named by the schema are ignored.
///
/// # Arguments
/// * `record` - Field values to encode
/// * `schema` - Schema describing each field
///
/// # Returns
/// The wire object, or the first field that cannot be encoded.
pub fn encode_record(
    record: &Record,
    schema: &SchemaDescriptor,
) -> Result<Map<String, Value>, CodecError> {
    let mut object = Map::new();
    for (name, field) in schema.fields() {
        match record.get(name) {
            Some(value) => {
                object.insert(name.clone(), encode_field(value, name, field)?);
            }
            None if field.optional => {}
            None => {
                return Err(CodecError::RequiredFieldMissing {
                    field: name.clone(),
                })
            }
        }
    }
    Ok(object)
}

fn encode_field(
    value: &FieldValue,
    name: &str,
    field: &FieldDescriptor,
) -> Result<Value, CodecError> {
    match (field.collection, value) {
        (CollectionKind::Single, FieldValue::Single(scalar)) => field.primitive.encode(scalar, name),
        (CollectionKind::Sequence, FieldValue::Sequence(values)) => {
            encode_elements(values.iter(), name, &field.primitive)
        }
        (CollectionKind::Set, FieldValue::Set(values)) => {
            encode_elements(values.iter(), name, &field.primitive)
        }
        _ => Err(CodecError::TypeMismatch {
            field: name.to_string(),
            expected: field.to_string(),
        }),
    }
}

fn encode_elements<'a>(
    values: impl Iterator<Item = &'a Scalar>,
    name: &str,
    kind: &PrimitiveKind,
) -> Result<Value, CodecError> {
    values
        .enumerate()
        .map(|(i, scalar)| kind.encode(scalar, name).map_err(|e| e.at_index(name, i)))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}
