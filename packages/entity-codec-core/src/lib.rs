//! Schema-driven entity codec and validator.
//!
//! Entity types declare their fields once; the schema derived from that
//! declaration drives encoding to JSON values, decoding back into typed
//! instances and validation of untrusted input.

pub mod codec;
pub mod config;
pub mod entity;
pub mod error;
pub mod json;
pub mod registry;
pub mod schema;
pub mod types;
pub mod validation;

pub use codec::{decode_record, encode_record, Codec};
pub use config::CodecConfig;
pub use entity::{Entity, Enumeration};
pub use error::CodecError;
pub use json::json_equivalent;
pub use registry::SchemaRegistry;
pub use schema::{FieldDecl, FieldDescriptor, SchemaBuilder, SchemaDescriptor};
pub use types::{
    CollectionKind, Declared, FieldType, FieldValue, Leaf, PrimitiveKind, Record, Scalar, TypeRef,
};
pub use validation::{validate, validate_array};
