//! Field definitions within a schema.

use std::fmt;

use crate::types::{CollectionKind, Declared, PrimitiveKind, TypeRef};

/// Resolved description of one schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Leaf kind of every value in the field
    pub primitive: PrimitiveKind,
    /// Container shape wrapping the leaf values
    pub collection: CollectionKind,
    /// Whether the field may be absent
    pub optional: bool,
}

impl FieldDescriptor {
    /// Creates a new field descriptor.
    ///
    /// # Arguments
    /// * `primitive` - Leaf kind
    /// * `collection` - Container shape
    /// * `optional` - Whether the field may be absent
    pub fn new(primitive: PrimitiveKind, collection: CollectionKind, optional: bool) -> Self {
        Self {
            primitive,
            collection,
            optional,
        }
    }

    /// Required single-valued field.
    pub fn single(primitive: PrimitiveKind) -> Self {
        Self::new(primitive, CollectionKind::Single, false)
    }

    /// Required sequence field.
    pub fn sequence(primitive: PrimitiveKind) -> Self {
        Self::new(primitive, CollectionKind::Sequence, false)
    }

    /// Required set field.
    pub fn set(primitive: PrimitiveKind) -> Self {
        Self::new(primitive, CollectionKind::Set, false)
    }

    /// Marks the field as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            f.write_str("optional ")?;
        }
        match self.collection {
            CollectionKind::Single => write!(f, "{}", self.primitive),
            collection => write!(f, "{}<{}>", collection, self.primitive),
        }
    }
}

/// Declared field of an entity: its name and declared type.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    /// Field name as it appears on the wire
    pub name: &'static str,
    /// Declared type, resolved to a [`FieldDescriptor`] by the schema builder
    pub type_ref: TypeRef,
}

impl FieldDecl {
    /// Declares field `name` with the type `T`.
    pub fn of<T: Declared>(name: &'static str) -> Self {
        Self {
            name,
            type_ref: T::type_ref(),
        }
    }

    /// Declares field `name` with an explicit type reference.
    pub fn new(name: &'static str, type_ref: TypeRef) -> Self {
        Self { name, type_ref }
    }
}
