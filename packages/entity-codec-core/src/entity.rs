//! Capabilities a type provides to take part in encoding and decoding.

use crate::error::CodecError;
use crate::schema::FieldDecl;
use crate::types::Record;

/// An application record type with a derivable schema.
///
/// `Default` supplies the representative instance the schema builder
/// checks the declaration against.
///
/// ```
/// use entity_codec_core::{CodecError, Entity, FieldDecl, Record};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Tag {
///     label: String,
///     weight: Option<i32>,
/// }
///
/// impl Entity for Tag {
///     const ENTITY_NAME: &'static str = "Tag";
///
///     fn declare() -> Vec<FieldDecl> {
///         vec![
///             FieldDecl::of::<String>("label"),
///             FieldDecl::of::<Option<i32>>("weight"),
///         ]
///     }
///
///     fn to_record(&self) -> Record {
///         Record::new()
///             .with("label", &self.label)
///             .with("weight", &self.weight)
///     }
///
///     fn from_record(mut record: Record) -> Result<Self, CodecError> {
///         Ok(Self {
///             label: record.take("label")?,
///             weight: record.take("weight")?,
///         })
///     }
/// }
/// ```
pub trait Entity: Default + Sized {
    /// Name the schema is registered under
    const ENTITY_NAME: &'static str;

    /// Static field table, one entry per field.
    fn declare() -> Vec<FieldDecl>;

    /// Current field values. Unset optionals are left out.
    fn to_record(&self) -> Record;

    /// Rebuilds an instance from decoded field values.
    fn from_record(record: Record) -> Result<Self, CodecError>;
}

/// A field-less enumeration carried on the wire as a 16-bit raw value.
pub trait Enumeration: Sized + 'static {
    /// Name used in schemas and error messages
    const NAME: &'static str;
    /// Raw values of every case
    const RAW_VALUES: &'static [i16];

    fn raw_value(&self) -> i16;

    fn from_raw_value(raw: i16) -> Option<Self>;
}

/// Implements [`Declared`](crate::Declared) and [`Leaf`](crate::Leaf) for an
/// [`Enumeration`] so it can be used as a field type.
#[macro_export]
macro_rules! enumeration_field {
    ($ty:ty) => {
        impl $crate::Declared for $ty {
            fn type_ref() -> $crate::TypeRef {
                $crate::TypeRef::enumeration::<Self>()
            }
        }

        impl $crate::Leaf for $ty {
            fn to_scalar(&self) -> $crate::Scalar {
                $crate::Scalar::enumeration(self)
            }

            fn from_scalar(
                scalar: $crate::Scalar,
                field: &str,
            ) -> ::std::result::Result<Self, $crate::CodecError> {
                scalar.into_enumeration(field)
            }
        }
    };
}

/// Implements [`Declared`](crate::Declared) and [`Leaf`](crate::Leaf) for an
/// [`Entity`] so it can be nested in another entity.
#[macro_export]
macro_rules! entity_field {
    ($ty:ty) => {
        impl $crate::Declared for $ty {
            fn type_ref() -> $crate::TypeRef {
                $crate::TypeRef::entity::<Self>()
            }
        }

        impl $crate::Leaf for $ty {
            fn to_scalar(&self) -> $crate::Scalar {
                $crate::Scalar::entity(self)
            }

            fn from_scalar(
                scalar: $crate::Scalar,
                field: &str,
            ) -> ::std::result::Result<Self, $crate::CodecError> {
                scalar.into_entity(field)
            }
        }
    };
}
