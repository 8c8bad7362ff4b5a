//! Entity encoding and decoding over a shared schema registry.

mod decode;
mod encode;

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use serde_json::Value;

use crate::config::CodecConfig;
use crate::entity::Entity;
use crate::error::CodecError;
use crate::registry::SchemaRegistry;
use crate::schema::SchemaDescriptor;
use crate::validation::{validate, validate_array};

pub use decode::decode_record;
pub use encode::encode_record;

/// Encodes entities to wire values and decodes them back.
///
/// Schemas come from the registry; entity types must be registered before
/// they are encoded or decoded.
#[derive(Debug, Clone)]
pub struct Codec {
    registry: Arc<SchemaRegistry>,
    config: CodecConfig,
}

impl Codec {
    /// Creates a codec with the default configuration.
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self::with_config(registry, CodecConfig::default())
    }

    /// Creates a codec with an explicit configuration.
    pub fn with_config(registry: Arc<SchemaRegistry>, config: CodecConfig) -> Self {
        Self { registry, config }
    }

    /// Returns the registry handle.
    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encodes one entity into a wire object.
    pub fn encode<E: Entity>(&self, entity: &E) -> Result<Value, CodecError> {
        let schema = self.registry.schema_of::<E>()?;
        encode_record(&entity.to_record(), &schema).map(Value::Object)
    }

    /// Encodes a collection of entities into a wire array.
    ///
    /// Works for any iterable of references, including `&Vec<E>` and
    /// `&HashSet<E>`.
    pub fn encode_all<'a, E, I>(&self, entities: I) -> Result<Value, CodecError>
    where
        E: Entity + 'a,
        I: IntoIterator<Item = &'a E>,
    {
        let schema = self.registry.schema_of::<E>()?;
        entities
            .into_iter()
            .map(|entity| encode_record(&entity.to_record(), &schema).map(Value::Object))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    /// Decodes one entity from a wire object.
    ///
    /// When `validate_before_decode` is set the input is validated first.
    pub fn decode<E: Entity>(&self, value: &Value) -> Result<E, CodecError> {
        let schema = self.registry.schema_of::<E>()?;
        self.decode_with(value, &schema).map_err(|e| {
            tracing::debug!("Failed to decode entity '{}': {}", E::ENTITY_NAME, e);
            e
        })
    }

    /// Decodes a wire array of entities, keeping element order.
    ///
    /// Element errors are reported as `[index].field`.
    pub fn decode_array<E: Entity>(&self, value: &Value) -> Result<Vec<E>, CodecError> {
        let schema = self.registry.schema_of::<E>()?;
        let items = array_of::<E>(value)?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.decode_element(item, &schema, i))
            .collect()
    }

    /// Decodes a wire array of entities into a set.
    ///
    /// Two elements decoding to equal entities fail with `DuplicateInSet`.
    pub fn decode_set<E: Entity + Eq + Hash>(&self, value: &Value) -> Result<HashSet<E>, CodecError> {
        let decoded: Vec<E> = self.decode_array(value)?;
        let mut set = HashSet::with_capacity(decoded.len());
        for entity in decoded {
            if !set.insert(entity) {
                tracing::debug!("Duplicate element in set of entity '{}'", E::ENTITY_NAME);
                return Err(CodecError::DuplicateInSet {
                    field: E::ENTITY_NAME.to_string(),
                });
            }
        }
        Ok(set)
    }

    /// Decodes a wire array of entities on the rayon pool.
    ///
    /// Arrays shorter than `parallel_min_batch` are decoded on the calling
    /// thread. When several elements fail, which error is returned is not
    /// specified.
    #[cfg(feature = "parallel")]
    pub fn decode_array_par<E: Entity + Send>(&self, value: &Value) -> Result<Vec<E>, CodecError> {
        use rayon::prelude::*;

        let items = array_of::<E>(value)?;
        if items.len() < self.config.parallel_min_batch {
            return self.decode_array(value);
        }
        let schema = self.registry.schema_of::<E>()?;
        tracing::debug!(
            "Decoding {} '{}' entities in parallel",
            items.len(),
            E::ENTITY_NAME
        );
        items
            .par_iter()
            .enumerate()
            .map(|(i, item)| self.decode_element(item, &schema, i))
            .collect()
    }

    /// Validates a wire object against the schema of `E`.
    pub fn validate<E: Entity>(&self, value: &Value) -> Result<(), CodecError> {
        let schema = self.registry.schema_of::<E>()?;
        validate(value, &schema).map_err(|e| {
            tracing::debug!("Validation failed for entity '{}': {}", E::ENTITY_NAME, e);
            e
        })
    }

    /// Validates every element of a wire array against the schema of `E`.
    pub fn validate_array<E: Entity>(&self, value: &Value) -> Result<(), CodecError> {
        let schema = self.registry.schema_of::<E>()?;
        validate_array(value, &schema).map_err(|e| {
            tracing::debug!("Validation failed for entity '{}': {}", E::ENTITY_NAME, e);
            e
        })
    }

    fn decode_with<E: Entity>(
        &self,
        value: &Value,
        schema: &SchemaDescriptor,
    ) -> Result<E, CodecError> {
        if self.config.validate_before_decode {
            validate(value, schema)?;
        }
        E::from_record(decode_record(value, schema)?)
    }

    fn decode_element<E: Entity>(
        &self,
        value: &Value,
        schema: &SchemaDescriptor,
        index: usize,
    ) -> Result<E, CodecError> {
        self.decode_with(value, schema).map_err(|e| {
            let e = e.within(&format!("[{index}]"));
            tracing::debug!("Failed to decode entity '{}': {}", E::ENTITY_NAME, e);
            e
        })
    }
}

fn array_of<E: Entity>(value: &Value) -> Result<&Vec<Value>, CodecError> {
    value.as_array().ok_or_else(|| CodecError::NotArray {
        field: E::ENTITY_NAME.to_string(),
    })
}
