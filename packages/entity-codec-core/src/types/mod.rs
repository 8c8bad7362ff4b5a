//! Leaf kinds, collection shapes, runtime values and field declarations.

mod collection;
pub mod date;
mod declare;
mod primitive;
mod value;

pub use collection::CollectionKind;
pub use declare::{Declared, FieldType, Leaf, SchemaFn, TypeRef};
pub use primitive::PrimitiveKind;
pub use value::{FieldValue, Record, Scalar};
