//! Entity types and wire values shared by the integration tests.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use url::Url;
use uuid::Uuid;

use entity_codec_core::types::date::parse_date;
use entity_codec_core::{
    entity_field, enumeration_field, Codec, CodecError, Entity, Enumeration, FieldDecl, Record,
    SchemaRegistry,
};

pub const PERSON1_ID: &str = "A53395A6-3318-4D4E-A777-2A21E10F8DC0";
pub const PERSON2_ID: &str = "EBE21A4C-3DB8-4209-8F7A-178307DF67FA";
pub const PERSON3_ID: &str = "592376F2-B23E-487F-A109-6DF3EDF933B0";
pub const COMPANY_ID: &str = "5323C209-919E-4B92-B366-0B23A082EF08";
pub const COMPLEX_ID: &str = "267FEB1D-DB43-4B16-A1E5-F574B9AD2B6D";

pub const DATE_1: &str = "1978-02-12T12:00:00+0000";
pub const DATE_2: &str = "1964-05-05T15:30:30+0000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Enumeration for Gender {
    const NAME: &'static str = "Gender";
    const RAW_VALUES: &'static [i16] = &[0, 1];

    fn raw_value(&self) -> i16 {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
        }
    }

    fn from_raw_value(raw: i16) -> Option<Self> {
        match raw {
            0 => Some(Gender::Male),
            1 => Some(Gender::Female),
            _ => None,
        }
    }
}

enumeration_field!(Gender);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Person {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub age: i16,
}

impl Person {
    pub fn new(id: &str, first_name: &str, last_name: &str, gender: Gender, age: i16) -> Self {
        Self {
            id: Uuid::parse_str(id).unwrap(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            gender,
            age,
        }
    }
}

impl Entity for Person {
    const ENTITY_NAME: &'static str = "Person";

    fn declare() -> Vec<FieldDecl> {
        vec![
            FieldDecl::of::<Uuid>("id"),
            FieldDecl::of::<String>("firstName"),
            FieldDecl::of::<String>("lastName"),
            FieldDecl::of::<Gender>("gender"),
            FieldDecl::of::<i16>("age"),
        ]
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", &self.id)
            .with("firstName", &self.first_name)
            .with("lastName", &self.last_name)
            .with("gender", &self.gender)
            .with("age", &self.age)
    }

    fn from_record(mut record: Record) -> Result<Self, CodecError> {
        Ok(Self {
            id: record.take("id")?,
            first_name: record.take("firstName")?,
            last_name: record.take("lastName")?,
            gender: record.take("gender")?,
            age: record.take("age")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub employees: Vec<Uuid>,
}

impl Entity for Company {
    const ENTITY_NAME: &'static str = "Company";

    fn declare() -> Vec<FieldDecl> {
        vec![
            FieldDecl::of::<Uuid>("id"),
            FieldDecl::of::<String>("name"),
            FieldDecl::of::<Vec<Uuid>>("employees"),
        ]
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", &self.id)
            .with("name", &self.name)
            .with("employees", &self.employees)
    }

    fn from_record(mut record: Record) -> Result<Self, CodecError> {
        Ok(Self {
            id: record.take("id")?,
            name: record.take("name")?,
            employees: record.take("employees")?,
        })
    }
}

/// Entity exercising every primitive kind and collection shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Complex {
    pub id: Uuid,
    pub flag: bool,
    pub date: DateTime<Utc>,
    pub double: f64,
    pub float: f32,
    pub int: isize,
    pub int16: i16,
    pub int32: i32,
    pub int64: Option<i64>,
    pub string: String,
    pub url: Url,
    pub uuid: Uuid,
    pub optional: Option<DateTime<Utc>>,
    pub array1: Vec<f64>,
    pub array2: Option<Vec<i16>>,
    pub set1: HashSet<i16>,
    pub set2: BTreeSet<DateTime<Utc>>,
}

impl Default for Complex {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            flag: false,
            date: DateTime::<Utc>::default(),
            double: 0.0,
            float: 0.0,
            int: 0,
            int16: 0,
            int32: 0,
            int64: None,
            string: String::new(),
            url: Url::parse("https://www.google.com").unwrap(),
            uuid: Uuid::nil(),
            optional: None,
            array1: Vec::new(),
            array2: Some(Vec::new()),
            set1: HashSet::new(),
            set2: BTreeSet::new(),
        }
    }
}

impl Entity for Complex {
    const ENTITY_NAME: &'static str = "ComplexCodable";

    fn declare() -> Vec<FieldDecl> {
        vec![
            FieldDecl::of::<Uuid>("id"),
            FieldDecl::of::<bool>("bool"),
            FieldDecl::of::<DateTime<Utc>>("date"),
            FieldDecl::of::<f64>("double"),
            FieldDecl::of::<f32>("float"),
            FieldDecl::of::<isize>("int"),
            FieldDecl::of::<i16>("int16"),
            FieldDecl::of::<i32>("int32"),
            FieldDecl::of::<Option<i64>>("int64"),
            FieldDecl::of::<String>("string"),
            FieldDecl::of::<Url>("url"),
            FieldDecl::of::<Uuid>("uuid"),
            FieldDecl::of::<Option<DateTime<Utc>>>("optional"),
            FieldDecl::of::<Vec<f64>>("array1"),
            FieldDecl::of::<Option<Vec<i16>>>("array2"),
            FieldDecl::of::<HashSet<i16>>("set1"),
            FieldDecl::of::<BTreeSet<DateTime<Utc>>>("set2"),
        ]
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", &self.id)
            .with("bool", &self.flag)
            .with("date", &self.date)
            .with("double", &self.double)
            .with("float", &self.float)
            .with("int", &self.int)
            .with("int16", &self.int16)
            .with("int32", &self.int32)
            .with("int64", &self.int64)
            .with("string", &self.string)
            .with("url", &self.url)
            .with("uuid", &self.uuid)
            .with("optional", &self.optional)
            .with("array1", &self.array1)
            .with("array2", &self.array2)
            .with("set1", &self.set1)
            .with("set2", &self.set2)
    }

    fn from_record(mut record: Record) -> Result<Self, CodecError> {
        Ok(Self {
            id: record.take("id")?,
            flag: record.take("bool")?,
            date: record.take("date")?,
            double: record.take("double")?,
            float: record.take("float")?,
            int: record.take("int")?,
            int16: record.take("int16")?,
            int32: record.take("int32")?,
            int64: record.take("int64")?,
            string: record.take("string")?,
            url: record.take("url")?,
            uuid: record.take("uuid")?,
            optional: record.take("optional")?,
            array1: record.take("array1")?,
            array2: record.take("array2")?,
            set1: record.take("set1")?,
            set2: record.take("set2")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: Option<String>,
}

impl Entity for Address {
    const ENTITY_NAME: &'static str = "Address";

    fn declare() -> Vec<FieldDecl> {
        vec![
            FieldDecl::of::<String>("street"),
            FieldDecl::of::<String>("city"),
            FieldDecl::of::<Option<String>>("zip"),
        ]
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("street", &self.street)
            .with("city", &self.city)
            .with("zip", &self.zip)
    }

    fn from_record(mut record: Record) -> Result<Self, CodecError> {
        Ok(Self {
            street: record.take("street")?,
            city: record.take("city")?,
            zip: record.take("zip")?,
        })
    }
}

entity_field!(Address);

/// Entity with nested entity fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contact {
    pub name: String,
    pub home: Address,
    pub previous: Vec<Address>,
    pub work: Option<Address>,
}

impl Entity for Contact {
    const ENTITY_NAME: &'static str = "Contact";

    fn declare() -> Vec<FieldDecl> {
        vec![
            FieldDecl::of::<String>("name"),
            FieldDecl::of::<Address>("home"),
            FieldDecl::of::<Vec<Address>>("previous"),
            FieldDecl::of::<Option<Address>>("work"),
        ]
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("name", &self.name)
            .with("home", &self.home)
            .with("previous", &self.previous)
            .with("work", &self.work)
    }

    fn from_record(mut record: Record) -> Result<Self, CodecError> {
        Ok(Self {
            name: record.take("name")?,
            home: record.take("home")?,
            previous: record.take("previous")?,
            work: record.take("work")?,
        })
    }
}

pub fn person1() -> Person {
    Person::new(PERSON1_ID, "David", "Vallas", Gender::Male, 42)
}

pub fn person2() -> Person {
    Person::new(PERSON2_ID, "Lucia", "Rolim", Gender::Female, 33)
}

pub fn person1_json() -> Value {
    json!({
        "id": PERSON1_ID,
        "firstName": "David",
        "lastName": "Vallas",
        "gender": 0,
        "age": 42,
    })
}

pub fn person2_json() -> Value {
    json!({
        "id": PERSON2_ID,
        "firstName": "Lucia",
        "lastName": "Rolim",
        "gender": 1,
        "age": 33,
    })
}

/// Person whose age does not fit in 16 bits.
pub fn person3_json() -> Value {
    json!({
        "id": PERSON3_ID,
        "firstName": "Joe",
        "lastName": "Shmo",
        "gender": 0,
        "age": 999999999777i64,
    })
}

pub fn company() -> Company {
    Company {
        id: Uuid::parse_str(COMPANY_ID).unwrap(),
        name: COMPANY_ID.to_string(),
        employees: vec![
            Uuid::parse_str(PERSON1_ID).unwrap(),
            Uuid::parse_str(PERSON2_ID).unwrap(),
        ],
    }
}

pub fn complex() -> Complex {
    let d1 = parse_date(DATE_1).unwrap();
    let d2 = parse_date(DATE_2).unwrap();
    Complex {
        id: Uuid::parse_str(COMPLEX_ID).unwrap(),
        flag: false,
        date: d1,
        double: 100.5,
        float: 50.598_89,
        int: 123456789,
        int16: 136,
        int32: 1001230,
        int64: None,
        string: "Test String 😍".to_string(),
        url: Url::parse("https://www.google.com").unwrap(),
        uuid: Uuid::parse_str(COMPANY_ID).unwrap(),
        optional: None,
        array1: vec![100.5, 100.512348213],
        array2: None,
        set1: HashSet::from([136, 139]),
        set2: BTreeSet::from([d1, d2]),
    }
}

pub fn complex_json() -> Value {
    json!({
        "id": COMPLEX_ID,
        "bool": false,
        "date": DATE_1,
        "double": 100.5,
        "float": f64::from(50.598_89f32),
        "int": 123456789,
        "int16": 136,
        "int32": 1001230,
        "string": "Test String 😍",
        "url": "https://www.google.com/",
        "uuid": COMPANY_ID,
        "array1": [100.5, 100.512348213],
        "set1": [136, 139],
        "set2": [DATE_1, DATE_2],
    })
}

pub fn contact() -> Contact {
    Contact {
        name: "Ada".to_string(),
        home: Address {
            street: "12 Analytical Row".to_string(),
            city: "London".to_string(),
            zip: Some("N1 9GU".to_string()),
        },
        previous: vec![
            Address {
                street: "1 Engine Way".to_string(),
                city: "Bath".to_string(),
                zip: None,
            },
            Address {
                street: "3 Difference Lane".to_string(),
                city: "Oxford".to_string(),
                zip: None,
            },
        ],
        work: None,
    }
}

pub fn contact_json() -> Value {
    json!({
        "name": "Ada",
        "home": {"street": "12 Analytical Row", "city": "London", "zip": "N1 9GU"},
        "previous": [
            {"street": "1 Engine Way", "city": "Bath"},
            {"street": "3 Difference Lane", "city": "Oxford"},
        ],
    })
}

/// Registry with every fixture entity registered.
pub fn registry() -> Arc<SchemaRegistry> {
    let registry = SchemaRegistry::new();
    registry.register::<Person>().unwrap();
    registry.register::<Company>().unwrap();
    registry.register::<Complex>().unwrap();
    registry.register::<Address>().unwrap();
    registry.register::<Contact>().unwrap();
    Arc::new(registry)
}

pub fn codec() -> Codec {
    Codec::new(registry())
}
