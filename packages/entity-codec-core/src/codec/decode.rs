//! Wire to record decoding.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::CodecError;
use crate::schema::{FieldDescriptor, SchemaDescriptor};
use crate::types::{CollectionKind, FieldValue, Record};

/// Decodes a wire object into a record.
///
/// Decoding stops at the first failing field. `null` counts as absent.
/// A set field whose elements decode to fewer distinct values than it was
/// given fails with `DuplicateInSet`.
///
/// # Arguments
/// * `value` - Wire value, expected to be an object
/// * `schema` - Schema describing each field
///
/// # Returns
/// The reconstruction record, holding no entry for absent optional fields.
pub fn decode_record(value: &Value, schema: &SchemaDescriptor) -> Result<Record, CodecError> {
    let Value::Object(object) = value else {
        return Err(CodecError::NotObject {
            entity: schema.name().to_string(),
        });
    };

    let mut record = Record::new();
    for (name, field) in schema.fields() {
        match object.get(name) {
            None | Some(Value::Null) if field.optional => {}
            None | Some(Value::Null) => {
                return Err(CodecError::RequiredFieldMissing {
                    field: name.clone(),
                })
            }
            Some(value) => {
                record.insert(name.clone(), decode_field(value, name, field)?);
            }
        }
    }
    Ok(record)
}

fn decode_field(
    value: &Value,
    name: &str,
    field: &FieldDescriptor,
) -> Result<FieldValue, CodecError> {
    let kind = &field.primitive;
    match field.collection {
        CollectionKind::Single => kind.decode(value, name).map(FieldValue::Single),
        CollectionKind::Sequence => {
            let values = elements(value, name)?
                .iter()
                .enumerate()
                .map(|(i, item)| kind.decode(item, name).map_err(|e| e.at_index(name, i)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(FieldValue::Sequence(values))
        }
        CollectionKind::Set => {
            let mut values = BTreeSet::new();
            for (i, item) in elements(value, name)?.iter().enumerate() {
                let scalar = kind.decode(item, name).map_err(|e| e.at_index(name, i))?;
                if !values.insert(scalar) {
                    return Err(CodecError::DuplicateInSet {
                        field: name.to_string(),
                    });
                }
            }
            Ok(FieldValue::Set(values))
        }
    }
}

fn elements<'a>(value: &'a Value, name: &str) -> Result<&'a Vec<Value>, CodecError> {
    value.as_array().ok_or_else(|| CodecError::NotArray {
        field: name.to_string(),
    })
}
