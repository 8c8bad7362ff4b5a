//! Read-only validation of wire values against a schema.
//!
//! Validation never builds a record; it is meant as a cheap gate in front of
//! decoding untrusted input. Keys absent from the schema are ignored.

use serde_json::Value;

use crate::error::CodecError;
use crate::schema::{FieldDescriptor, SchemaDescriptor};
use crate::types::{CollectionKind, PrimitiveKind};

/// Validates a wire object against `schema`.
///
/// # Arguments
/// * `value` - Wire value, expected to be an object
/// * `schema` - Schema to check against
///
/// # Returns
/// `Ok(())`, or the first error found in field name order.
pub fn validate(value: &Value, schema: &SchemaDescriptor) -> Result<(), CodecError> {
    let Value::Object(object) = value else {
        return Err(CodecError::NotObject {
            entity: schema.name().to_string(),
        });
    };

    for (name, field) in schema.fields() {
        match object.get(name) {
            None | Some(Value::Null) => {
                if !field.optional {
                    return Err(CodecError::RequiredFieldMissing {
                        field: name.clone(),
                    });
                }
            }
            Some(value) => validate_field(value, name, field)?,
        }
    }
    Ok(())
}

/// Validates every element of a wire array against `schema`.
///
/// Element errors are reported as `[index].field`.
pub fn validate_array(value: &Value, schema: &SchemaDescriptor) -> Result<(), CodecError> {
    let Value::Array(items) = value else {
        return Err(CodecError::NotArray {
            field: schema.name().to_string(),
        });
    };
    for (i, item) in items.iter().enumerate() {
        validate(item, schema).map_err(|e| e.within(&format!("[{i}]")))?;
    }
    Ok(())
}

fn validate_field(value: &Value, name: &str, field: &FieldDescriptor) -> Result<(), CodecError> {
    match field.collection {
        CollectionKind::Single => validate_leaf(value, name, &field.primitive),
        CollectionKind::Sequence | CollectionKind::Set => {
            let Value::Array(items) = value else {
                return Err(CodecError::NotArray {
                    field: name.to_string(),
                });
            };
            for (i, item) in items.iter().enumerate() {
                validate_leaf(item, name, &field.primitive).map_err(|e| e.at_index(name, i))?;
            }
            Ok(())
        }
    }
}

fn validate_leaf(value: &Value, name: &str, kind: &PrimitiveKind) -> Result<(), CodecError> {
    match kind {
        PrimitiveKind::Entity(schema) => validate(value, schema).map_err(|e| e.within(name)),
        kind => kind.decode(value, name).map(|_| ()),
    }
}
