//! Structural description of an entity.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use super::field::FieldDescriptor;

/// Schema of one entity type: its name and field descriptors.
///
/// Built once per entity type and never mutated after publication; the
/// registry replaces whole descriptors instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    name: String,
    fields: BTreeMap<String, FieldDescriptor>,
}

impl SchemaDescriptor {
    /// Creates an empty schema for entity `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds a field, replacing any previous one with the same name.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, field: FieldDescriptor) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Adds a field, returning the one it replaced.
    pub(crate) fn insert_field(
        &mut self,
        name: impl Into<String>,
        field: FieldDescriptor,
    ) -> Option<FieldDescriptor> {
        self.fields.insert(name.into(), field)
    }

    /// Entity name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the descriptor of field `name`.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Iterates over fields in name order.
    pub fn fields(&self) -> btree_map::Iter<'_, String, FieldDescriptor> {
        self.fields.iter()
    }

    /// Names of fields that must be present.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, field)| !field.optional)
            .map(|(name, _)| name.as_str())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for SchemaDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.name)?;
        for (i, (name, field)) in self.fields.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{name}: {field}")?;
        }
        if !self.fields.is_empty() {
            f.write_str(" ")?;
        }
        f.write_str("}")
    }
}
