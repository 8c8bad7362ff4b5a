//! Entity schemas: field descriptors, descriptors and the builder.

mod builder;
mod descriptor;
mod field;

pub use builder::SchemaBuilder;
pub use descriptor::SchemaDescriptor;
pub use field::{FieldDecl, FieldDescriptor};
