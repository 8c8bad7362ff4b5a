//! Schema registry with lock-free reads.
//!
//! Schemas are built off to the side and published by swapping in a new
//! map, so readers never see a partially built descriptor and never block
//! on a concurrent registration.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::CodecConfig;
use crate::entity::Entity;
use crate::error::CodecError;
use crate::schema::{SchemaBuilder, SchemaDescriptor};

type SchemaMap = HashMap<String, Arc<SchemaDescriptor>>;

/// Registry mapping entity names to their schemas.
#[derive(Debug)]
pub struct SchemaRegistry {
    /// Published schemas, replaced wholesale on every registration
    schemas: ArcSwap<SchemaMap>,
    /// Builder used by `register`
    builder: SchemaBuilder,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    /// Creates an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_builder(SchemaBuilder::default())
    }

    /// Creates an empty registry using the nesting limit from `config`.
    pub fn with_config(config: &CodecConfig) -> Self {
        Self::with_builder(SchemaBuilder::from_config(config))
    }

    /// Creates an empty registry that builds schemas with `builder`.
    pub fn with_builder(builder: SchemaBuilder) -> Self {
        Self {
            schemas: ArcSwap::from_pointee(SchemaMap::new()),
            builder,
        }
    }

    /// Builds and publishes the schema of `E` from its default instance.
    ///
    /// Registering the same type again replaces the previous schema.
    pub fn register<E: Entity>(&self) -> Result<Arc<SchemaDescriptor>, CodecError> {
        self.register_instance(&E::default())
    }

    /// Builds and publishes the schema of `E` from a representative instance.
    ///
    /// # Arguments
    /// * `default` - Instance the declaration is checked against
    ///
    /// # Returns
    /// The published schema, or the schema building error. Nothing is
    /// published on error.
    pub fn register_instance<E: Entity>(
        &self,
        default: &E,
    ) -> Result<Arc<SchemaDescriptor>, CodecError> {
        let schema = Arc::new(self.builder.build(default)?);
        self.publish(Arc::clone(&schema));
        Ok(schema)
    }

    /// Publishes a hand-built schema under its own name.
    pub fn insert(&self, schema: SchemaDescriptor) -> Arc<SchemaDescriptor> {
        let schema = Arc::new(schema);
        self.publish(Arc::clone(&schema));
        schema
    }

    fn publish(&self, schema: Arc<SchemaDescriptor>) {
        let name = schema.name().to_string();
        let previous = self.schemas.rcu(|current| {
            let mut next = SchemaMap::clone(current);
            next.insert(name.clone(), Arc::clone(&schema));
            next
        });
        if previous.contains_key(&name) {
            tracing::debug!("Replaced schema for entity '{}'", name);
        } else {
            tracing::debug!(
                "Registered schema for entity '{}' with {} fields",
                name,
                schema.len()
            );
        }
    }

    /// Returns the schema registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<Arc<SchemaDescriptor>, CodecError> {
        self.schemas
            .load()
            .get(name)
            .cloned()
            .ok_or_else(|| CodecError::NotRegistered {
                entity: name.to_string(),
            })
    }

    /// Returns the schema registered for `E`.
    pub fn schema_of<E: Entity>(&self) -> Result<Arc<SchemaDescriptor>, CodecError> {
        self.lookup(E::ENTITY_NAME)
    }

    /// Returns `true` if a schema is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.load().contains_key(name)
    }

    /// Returns all registered entity names, sorted.
    pub fn entity_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.load().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.load().len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.load().is_empty()
    }

    /// Returns the currently published map. Later registrations do not
    /// affect it.
    pub fn snapshot(&self) -> Arc<HashMap<String, Arc<SchemaDescriptor>>> {
        self.schemas.load_full()
    }
}
