//! Static field declarations.
//!
//! Entity types describe their fields with [`TypeRef`]s instead of being
//! inspected at runtime. [`Declared`] names the type of a field, [`Leaf`]
//! converts leaf values to and from [`Scalar`], and [`FieldType`] adds the
//! optional and collection wrappers on top.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use super::value::{FieldValue, Scalar};
use crate::entity::{Entity, Enumeration};
use crate::error::CodecError;
use crate::schema::{SchemaBuilder, SchemaDescriptor};

/// Builds the schema of a nested entity at the given nesting depth.
pub type SchemaFn = fn(&SchemaBuilder, usize) -> Result<SchemaDescriptor, CodecError>;

/// Declared type of a field, before it is resolved to a schema.
#[derive(Clone)]
pub enum TypeRef {
    /// Leaf type identified by name, resolved through the dispatch table
    Named(&'static str),
    /// Enumeration with a 16-bit backing value
    Enumeration {
        name: &'static str,
        raw_values: &'static [i16],
    },
    /// Nested entity
    Entity { name: &'static str, schema: SchemaFn },
    /// `Option<T>`
    Optional(Box<TypeRef>),
    /// `Vec<T>`
    Sequence(Box<TypeRef>),
    /// `HashSet<T>` or `BTreeSet<T>`
    Set(Box<TypeRef>),
}

impl TypeRef {
    /// Declares an enumeration leaf.
    pub fn enumeration<E: Enumeration>() -> Self {
        TypeRef::Enumeration {
            name: E::NAME,
            raw_values: E::RAW_VALUES,
        }
    }

    /// Declares a nested entity leaf.
    pub fn entity<E: Entity>() -> Self {
        TypeRef::Entity {
            name: E::ENTITY_NAME,
            schema: build_nested::<E>,
        }
    }
}

fn build_nested<E: Entity>(
    builder: &SchemaBuilder,
    depth: usize,
) -> Result<SchemaDescriptor, CodecError> {
    builder.build_at(&E::default(), depth)
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
            TypeRef::Enumeration { name, raw_values } => f
                .debug_struct("Enumeration")
                .field("name", name)
                .field("raw_values", raw_values)
                .finish(),
            TypeRef::Entity { name, .. } => f.debug_struct("Entity").field("name", name).finish(),
            TypeRef::Optional(inner) => f.debug_tuple("Optional").field(inner).finish(),
            TypeRef::Sequence(inner) => f.debug_tuple("Sequence").field(inner).finish(),
            TypeRef::Set(inner) => f.debug_tuple("Set").field(inner).finish(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::Enumeration { name, .. } | TypeRef::Entity { name, .. } => f.write_str(name),
            TypeRef::Optional(inner) => write!(f, "Option<{inner}>"),
            TypeRef::Sequence(inner) => write!(f, "Vec<{inner}>"),
            TypeRef::Set(inner) => write!(f, "Set<{inner}>"),
        }
    }
}

/// A type that can appear in a field declaration.
///
/// Implemented for every built-in leaf, including integer widths with no
/// wire mapping, so that declaring them is possible and schema building
/// reports them as unsupported.
pub trait Declared {
    fn type_ref() -> TypeRef;
}

macro_rules! declare_named {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Declared for $ty {
                fn type_ref() -> TypeRef {
                    TypeRef::Named($name)
                }
            }
        )*
    };
}

declare_named! {
    bool => "bool",
    DateTime<Utc> => "DateTime<Utc>",
    f64 => "f64",
    f32 => "f32",
    isize => "isize",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    String => "String",
    Url => "Url",
    Uuid => "Uuid",
    i8 => "i8",
    i128 => "i128",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    char => "char",
}

impl<T: Declared> Declared for Option<T> {
    fn type_ref() -> TypeRef {
        TypeRef::Optional(Box::new(T::type_ref()))
    }
}

impl<T: Declared> Declared for Vec<T> {
    fn type_ref() -> TypeRef {
        TypeRef::Sequence(Box::new(T::type_ref()))
    }
}

impl<T: Declared> Declared for HashSet<T> {
    fn type_ref() -> TypeRef {
        TypeRef::Set(Box::new(T::type_ref()))
    }
}

impl<T: Declared> Declared for BTreeSet<T> {
    fn type_ref() -> TypeRef {
        TypeRef::Set(Box::new(T::type_ref()))
    }
}

/// A leaf value with a [`Scalar`] representation.
///
/// Enumerations implement it with [`Scalar::enumeration`] and
/// [`Scalar::into_enumeration`], nested entities with [`Scalar::entity`]
/// and [`Scalar::into_entity`].
pub trait Leaf: Declared + Sized {
    fn to_scalar(&self) -> Scalar;

    fn from_scalar(scalar: Scalar, field: &str) -> Result<Self, CodecError>;
}

macro_rules! leaf {
    ($($ty:ty => $variant:ident, $kind:literal);* $(;)?) => {
        $(
            impl Leaf for $ty {
                fn to_scalar(&self) -> Scalar {
                    Scalar::$variant(self.clone())
                }

                fn from_scalar(scalar: Scalar, field: &str) -> Result<Self, CodecError> {
                    match scalar {
                        Scalar::$variant(value) => Ok(value),
                        other => Err(other.mismatch(field, $kind)),
                    }
                }
            }
        )*
    };
}

leaf! {
    bool => Bool, "boolean";
    DateTime<Utc> => Date, "date";
    f64 => Double, "double";
    f32 => Float32, "float32";
    i16 => Int16, "int16";
    i32 => Int32, "int32";
    i64 => Int64, "int64";
    String => String, "string";
    Url => Url, "url";
    Uuid => Uuid, "uuid";
}

impl Leaf for isize {
    fn to_scalar(&self) -> Scalar {
        Scalar::Int(*self as i64)
    }

    fn from_scalar(scalar: Scalar, field: &str) -> Result<Self, CodecError> {
        match scalar {
            Scalar::Int(value) => isize::try_from(value).map_err(|_| CodecError::RangeOverflow {
                field: field.to_string(),
                value: value.to_string(),
                min: isize::MIN as i64,
                max: isize::MAX as i64,
            }),
            other => Err(other.mismatch(field, "int")),
        }
    }
}

/// A complete field type: a leaf, a collection of leaves, or an optional of
/// either.
pub trait FieldType: Declared + Sized {
    /// Converts to a field value; `None` means the field is absent.
    fn to_field(&self) -> Option<FieldValue>;

    /// Converts from a field value; `None` means the field was absent.
    fn from_field(value: Option<FieldValue>, field: &str) -> Result<Self, CodecError>;
}

fn missing(field: &str) -> CodecError {
    CodecError::RequiredFieldMissing {
        field: field.to_string(),
    }
}

fn wrong_shape<T: Declared>(value: &FieldValue, field: &str) -> CodecError {
    tracing::trace!("Field '{}' holds {}", field, value.type_name());
    CodecError::TypeMismatch {
        field: field.to_string(),
        expected: T::type_ref().to_string(),
    }
}

impl<T: Leaf> FieldType for T {
    fn to_field(&self) -> Option<FieldValue> {
        Some(FieldValue::Single(self.to_scalar()))
    }

    fn from_field(value: Option<FieldValue>, field: &str) -> Result<Self, CodecError> {
        match value {
            Some(FieldValue::Single(scalar)) => T::from_scalar(scalar, field),
            Some(other) => Err(wrong_shape::<T>(&other, field)),
            None => Err(missing(field)),
        }
    }
}

impl<T: Leaf> FieldType for Vec<T> {
    fn to_field(&self) -> Option<FieldValue> {
        Some(FieldValue::Sequence(
            self.iter().map(Leaf::to_scalar).collect(),
        ))
    }

    fn from_field(value: Option<FieldValue>, field: &str) -> Result<Self, CodecError> {
        match value {
            Some(FieldValue::Sequence(values)) => values
                .into_iter()
                .enumerate()
                .map(|(i, scalar)| T::from_scalar(scalar, field).map_err(|e| e.at_index(field, i)))
                .collect(),
            Some(other) => Err(wrong_shape::<Self>(&other, field)),
            None => Err(missing(field)),
        }
    }
}

impl<T: Leaf + Eq + Hash> FieldType for HashSet<T> {
    fn to_field(&self) -> Option<FieldValue> {
        Some(FieldValue::Set(self.iter().map(Leaf::to_scalar).collect()))
    }

    fn from_field(value: Option<FieldValue>, field: &str) -> Result<Self, CodecError> {
        match value {
            Some(FieldValue::Set(values)) => {
                let mut set = HashSet::with_capacity(values.len());
                for scalar in values {
                    if !set.insert(T::from_scalar(scalar, field)?) {
                        return Err(CodecError::DuplicateInSet {
                            field: field.to_string(),
                        });
                    }
                }
                Ok(set)
            }
            Some(other) => Err(wrong_shape::<Self>(&other, field)),
            None => Err(missing(field)),
        }
    }
}

impl<T: Leaf + Ord> FieldType for BTreeSet<T> {
    fn to_field(&self) -> Option<FieldValue> {
        Some(FieldValue::Set(self.iter().map(Leaf::to_scalar).collect()))
    }

    fn from_field(value: Option<FieldValue>, field: &str) -> Result<Self, CodecError> {
        match value {
            Some(FieldValue::Set(values)) => {
                let mut set = BTreeSet::new();
                for scalar in values {
                    if !set.insert(T::from_scalar(scalar, field)?) {
                        return Err(CodecError::DuplicateInSet {
                            field: field.to_string(),
                        });
                    }
                }
                Ok(set)
            }
            Some(other) => Err(wrong_shape::<Self>(&other, field)),
            None => Err(missing(field)),
        }
    }
}

impl<T: FieldType> FieldType for Option<T> {
    fn to_field(&self) -> Option<FieldValue> {
        self.as_ref().and_then(FieldType::to_field)
    }

    fn from_field(value: Option<FieldValue>, field: &str) -> Result<Self, CodecError> {
        match value {
            Some(value) => T::from_field(Some(value), field).map(Some),
            None => Ok(None),
        }
    }
}
