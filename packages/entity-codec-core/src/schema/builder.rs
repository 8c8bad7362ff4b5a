//! Schema derivation from field declarations.

use std::sync::Arc;

use super::descriptor::SchemaDescriptor;
use super::field::FieldDescriptor;
use crate::config::CodecConfig;
use crate::entity::Entity;
use crate::error::CodecError;
use crate::types::{CollectionKind, FieldValue, PrimitiveKind, Record, Scalar, TypeRef};

/// Derives [`SchemaDescriptor`]s from entity declarations.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    max_nesting_depth: usize,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::from_config(&CodecConfig::default())
    }
}

impl SchemaBuilder {
    /// Creates a builder that rejects entities nested deeper than
    /// `max_nesting_depth` levels.
    pub fn new(max_nesting_depth: usize) -> Self {
        Self { max_nesting_depth }
    }

    /// Creates a builder using the nesting limit from `config`.
    pub fn from_config(config: &CodecConfig) -> Self {
        Self::new(config.max_nesting_depth)
    }

    /// Returns the maximum nesting depth.
    pub fn max_nesting_depth(&self) -> usize {
        self.max_nesting_depth
    }

    /// Builds the schema of `E`.
    ///
    /// # Arguments
    /// * `default` - Representative instance, checked against the declaration
    ///
    /// # Returns
    /// The schema, or `UnsupportedFieldType` if a field has no kind mapping
    /// or the instance disagrees with the declaration.
    pub fn build<E: Entity>(&self, default: &E) -> Result<SchemaDescriptor, CodecError> {
        self.build_at(default, 0)
    }

    pub(crate) fn build_at<E: Entity>(
        &self,
        default: &E,
        depth: usize,
    ) -> Result<SchemaDescriptor, CodecError> {
        if depth > self.max_nesting_depth {
            tracing::warn!(
                "Entity '{}' exceeds nesting depth {}",
                E::ENTITY_NAME,
                self.max_nesting_depth
            );
            return Err(CodecError::NestingTooDeep {
                entity: E::ENTITY_NAME.to_string(),
                depth: self.max_nesting_depth,
            });
        }

        // Resolve declarations
        let mut schema = SchemaDescriptor::new(E::ENTITY_NAME);
        for decl in E::declare() {
            let field = self.resolve(E::ENTITY_NAME, decl.name, &decl.type_ref, depth)?;
            if schema.insert_field(decl.name, field).is_some() {
                return Err(CodecError::DuplicateField {
                    entity: E::ENTITY_NAME.to_string(),
                    field: decl.name.to_string(),
                });
            }
        }

        // Check the representative instance against them
        check_instance(&schema, &default.to_record())?;

        Ok(schema)
    }

    /// Resolves a declared type to a field descriptor.
    fn resolve(
        &self,
        entity: &str,
        field: &str,
        type_ref: &TypeRef,
        depth: usize,
    ) -> Result<FieldDescriptor, CodecError> {
        let (optional, inner) = match type_ref {
            TypeRef::Optional(inner) => (true, inner.as_ref()),
            other => (false, other),
        };
        let (collection, leaf) = match inner {
            TypeRef::Sequence(leaf) => (CollectionKind::Sequence, leaf.as_ref()),
            TypeRef::Set(leaf) => (CollectionKind::Set, leaf.as_ref()),
            other => (CollectionKind::Single, other),
        };

        let primitive = match leaf {
            TypeRef::Named(name) => PrimitiveKind::from_type_name(name),
            TypeRef::Enumeration { name, raw_values } => Some(PrimitiveKind::Enumeration {
                name: *name,
                raw_values: *raw_values,
            }),
            TypeRef::Entity { schema, .. } => {
                let nested = schema(self, depth + 1).map_err(|e| e.within(field))?;
                Some(PrimitiveKind::Entity(Arc::new(nested)))
            }
            // Nested containers have no wire shape
            TypeRef::Optional(_) | TypeRef::Sequence(_) | TypeRef::Set(_) => None,
        };

        match primitive {
            Some(primitive) => Ok(FieldDescriptor::new(primitive, collection, optional)),
            None => Err(unsupported(entity, field, &leaf.to_string())),
        }
    }
}

/// Checks that every value of `record` is declared with a matching shape
/// and kind, and that every required field is present.
fn check_instance(schema: &SchemaDescriptor, record: &Record) -> Result<(), CodecError> {
    for (name, value) in record.iter() {
        let Some(field) = schema.field(name) else {
            return Err(unsupported(schema.name(), name, &value.type_name()));
        };
        let matches = match (field.collection, value) {
            (CollectionKind::Single, FieldValue::Single(scalar)) => holds(&field.primitive, scalar),
            (CollectionKind::Sequence, FieldValue::Sequence(values)) => {
                values.iter().all(|scalar| holds(&field.primitive, scalar))
            }
            (CollectionKind::Set, FieldValue::Set(values)) => {
                values.iter().all(|scalar| holds(&field.primitive, scalar))
            }
            _ => false,
        };
        if !matches {
            return Err(unsupported(schema.name(), name, &value.type_name()));
        }
    }

    if let Some(name) = schema.required_fields().find(|name| !record.contains(name)) {
        return Err(CodecError::RequiredFieldMissing {
            field: name.to_string(),
        });
    }

    Ok(())
}

/// Returns `true` if `scalar` is a value of `kind`.
fn holds(kind: &PrimitiveKind, scalar: &Scalar) -> bool {
    match (kind, scalar) {
        (PrimitiveKind::Enumeration { raw_values, .. }, Scalar::Enumeration(raw)) => {
            raw_values.contains(raw)
        }
        (PrimitiveKind::Entity(schema), Scalar::Entity(record)) => {
            check_instance(schema, record).is_ok()
        }
        (PrimitiveKind::Boolean, Scalar::Bool(_))
        | (PrimitiveKind::Date, Scalar::Date(_))
        | (PrimitiveKind::Double, Scalar::Double(_))
        | (PrimitiveKind::Float32, Scalar::Float32(_))
        | (PrimitiveKind::Int, Scalar::Int(_))
        | (PrimitiveKind::Int16, Scalar::Int16(_))
        | (PrimitiveKind::Int32, Scalar::Int32(_))
        | (PrimitiveKind::Int64, Scalar::Int64(_))
        | (PrimitiveKind::String, Scalar::String(_))
        | (PrimitiveKind::Url, Scalar::Url(_))
        | (PrimitiveKind::Uuid, Scalar::Uuid(_)) => true,
        _ => false,
    }
}

fn unsupported(entity: &str, field: &str, type_name: &str) -> CodecError {
    tracing::warn!(
        "Field '{}' of entity '{}' has unsupported type '{}'",
        field,
        entity,
        type_name
    );
    CodecError::UnsupportedFieldType {
        entity: entity.to_string(),
        field: field.to_string(),
        type_name: type_name.to_string(),
    }
}
