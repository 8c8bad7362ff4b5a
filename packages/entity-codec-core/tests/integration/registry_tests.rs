//! Schema registration and concurrent registry access.

use std::sync::Arc;
use std::thread;

use ntest::timeout;
use pretty_assertions::assert_eq;

use entity_codec_core::{
    CodecConfig, CodecError, CollectionKind, Entity, FieldDecl, FieldDescriptor, PrimitiveKind,
    Record, SchemaRegistry,
};

use super::fixtures::*;

#[derive(Debug, Default)]
struct Meter;

impl Entity for Meter {
    const ENTITY_NAME: &'static str = "Meter";

    fn declare() -> Vec<FieldDecl> {
        vec![FieldDecl::of::<u64>("reading")]
    }

    fn to_record(&self) -> Record {
        Record::new()
    }

    fn from_record(_record: Record) -> Result<Self, CodecError> {
        Ok(Self)
    }
}

#[test]
fn test_person_schema() {
    let registry = SchemaRegistry::new();
    let schema = registry.register::<Person>().unwrap();

    assert_eq!(schema.name(), "Person");
    assert_eq!(schema.len(), 5);
    assert_eq!(
        schema.field("gender"),
        Some(&FieldDescriptor::single(PrimitiveKind::Enumeration {
            name: "Gender",
            raw_values: &[0, 1],
        }))
    );
    assert_eq!(
        schema.field("age"),
        Some(&FieldDescriptor::single(PrimitiveKind::Int16))
    );
    assert!(schema.fields().all(|(_, field)| !field.optional));
}

#[test]
fn test_complex_schema() {
    let registry = SchemaRegistry::new();
    let schema = registry.register::<Complex>().unwrap();

    assert_eq!(schema.len(), 17);
    assert_eq!(
        schema.field("int"),
        Some(&FieldDescriptor::single(PrimitiveKind::Int))
    );
    assert_eq!(
        schema.field("int64"),
        Some(&FieldDescriptor::single(PrimitiveKind::Int64).optional())
    );
    assert_eq!(
        schema.field("array2"),
        Some(&FieldDescriptor::sequence(PrimitiveKind::Int16).optional())
    );
    assert_eq!(
        schema.field("set2"),
        Some(&FieldDescriptor::set(PrimitiveKind::Date))
    );
    assert_eq!(
        schema.field("float").map(|f| f.collection),
        Some(CollectionKind::Single)
    );
}

#[test]
fn test_nested_schema() {
    let registry = SchemaRegistry::new();
    let schema = registry.register::<Contact>().unwrap();
    let home = schema.field("home").unwrap();
    let address = home.primitive.schema().unwrap();
    assert_eq!(address.name(), "Address");
    assert_eq!(address.len(), 3);
    assert_eq!(home.to_string(), "entity(Address)");
    assert_eq!(
        schema.field("work").unwrap().to_string(),
        "optional entity(Address)"
    );
    // Registering a nested entity does not register the inner one
    assert!(!registry.contains("Address"));
}

#[test]
fn test_registration_is_idempotent() {
    let once = SchemaRegistry::new();
    let first = once.register::<Complex>().unwrap();

    let twice = SchemaRegistry::new();
    twice.register::<Complex>().unwrap();
    let second = twice.register::<Complex>().unwrap();

    assert_eq!(*first, *second);
    assert_eq!(twice.len(), 1);
    assert_eq!(once.entity_names(), twice.entity_names());
}

#[test]
fn test_unsupported_field_type() {
    let registry = SchemaRegistry::new();
    assert_eq!(
        registry.register::<Meter>(),
        Err(CodecError::UnsupportedFieldType {
            entity: "Meter".to_string(),
            field: "reading".to_string(),
            type_name: "u64".to_string(),
        })
    );
    assert!(registry.is_empty());
}

#[test]
fn test_nesting_limit() {
    let registry = SchemaRegistry::with_config(&CodecConfig {
        max_nesting_depth: 0,
        ..Default::default()
    });
    assert_eq!(
        registry.register::<Contact>(),
        Err(CodecError::NestingTooDeep {
            entity: "Address".to_string(),
            depth: 0,
        })
    );
    assert!(registry.register::<Address>().is_ok());
}

#[test]
fn test_register_instance() {
    let registry = SchemaRegistry::new();
    let schema = registry.register_instance(&person1()).unwrap();
    assert_eq!(registry.lookup("Person").unwrap(), schema);
}

#[timeout(10000)]
#[test]
fn test_concurrent_lookups_during_registration() {
    let registry = Arc::new(SchemaRegistry::new());
    registry.register::<Person>().unwrap();
    let expected = registry.lookup("Person").unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let expected = Arc::clone(&expected);
            thread::spawn(move || {
                for _ in 0..2_000 {
                    let schema = registry.lookup("Person").unwrap();
                    assert_eq!(*schema, *expected);
                    if let Ok(company) = registry.lookup("Company") {
                        assert_eq!(company.len(), 3);
                    }
                }
            })
        })
        .collect();

    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for _ in 0..200 {
                registry.register::<Person>().unwrap();
                registry.register::<Company>().unwrap();
            }
        })
    };

    for reader in readers {
        reader.join().unwrap();
    }
    writer.join().unwrap();

    assert_eq!(registry.entity_names(), vec!["Company", "Person"]);
}

#[timeout(10000)]
#[test]
fn test_codec_shared_across_threads() {
    let codec = codec();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let codec = codec.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let encoded = codec.encode(&person2()).unwrap();
                    let decoded: Person = codec.decode(&encoded).unwrap();
                    assert_eq!(decoded, person2());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
