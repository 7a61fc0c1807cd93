use graft::{prelude::*, types::Blob};
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug, Default, PartialEq, Record)]
struct Employee {
    #[record(rename = "Name")]
    name: String,

    #[record(rename = "Age")]
    age: i64,

    #[record(rename = "Office")]
    office: Option<Box<Office>>,

    #[record(rename = "Salary")]
    salary: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Record)]
struct Office {
    #[record(rename = "City")]
    city: String,

    #[record(rename = "Floor")]
    floor: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Record)]
struct EmployeeDto {
    name: String,
    age: i32,
    office: Option<OfficeDto>,
}

#[derive(Clone, Debug, Default, PartialEq, Record)]
struct OfficeDto {
    city: String,
}

fn employee(name: &str, age: i64, city: Option<&str>) -> Employee {
    Employee {
        name: name.to_string(),
        age,
        office: city.map(|city| {
            Box::new(Office {
                city: city.to_string(),
                floor: 3,
            })
        }),
        salary: 1_000,
    }
}

#[test]
fn maps_fields_by_lowercased_name() {
    let dto: EmployeeDto = map_one(&employee("x", 30, None)).expect("mapping succeeds");

    assert_eq!(
        dto,
        EmployeeDto {
            name: "x".to_string(),
            age: 30,
            office: None,
        }
    );
}

#[test]
fn nested_boxed_records_become_destination_records() {
    let dto: EmployeeDto = map_one(&employee("x", 30, Some("Oslo"))).expect("mapping succeeds");

    assert_eq!(
        dto.office,
        Some(OfficeDto {
            city: "Oslo".to_string(),
        })
    );
}

#[test]
fn source_is_left_untouched() {
    let source = employee("x", 30, Some("Oslo"));
    let before = source.clone();

    let _: EmployeeDto = map_one(&source).expect("mapping succeeds");

    assert_eq!(source, before);
}

#[test]
fn keyed_collections_keep_keys() {
    let staff = BTreeMap::from([
        (10_u32, employee("a", 20, None)),
        (20_u32, employee("b", 40, Some("Rome"))),
    ]);

    let dtos: BTreeMap<u32, EmployeeDto> = map_entries(&staff).expect("mapping succeeds");

    assert_eq!(dtos.keys().copied().collect::<Vec<_>>(), vec![10, 20]);
    assert_eq!(dtos[&20].office.as_ref().map(|o| o.city.as_str()), Some("Rome"));
}

#[test]
fn out_of_range_values_are_incompatible() {
    let err = map_one::<_, EmployeeDto>(&employee("x", i64::MAX, None)).expect_err("too large");

    assert_eq!(err.class, graft::error::ErrorClass::Incompatible);
    assert!(err.display_with_class().starts_with("map:incompatible:"));
}

#[test]
fn dynamic_lists_map_to_many() {
    let list = Value::List(vec![
        Value::Record(employee("a", 1, None).to_record_value()),
        Value::Record(employee("b", 2, None).to_record_value()),
    ]);

    let mapped = map_value::<EmployeeDto>(&list).expect("list of records");
    let names: Vec<_> = mapped
        .into_many()
        .expect("many")
        .into_iter()
        .map(|dto| dto.name)
        .collect();

    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn generated_model_lists_fields_in_order() {
    let names: Vec<_> = Employee::MODEL.fields.iter().map(|f| f.name).collect();

    assert_eq!(names, vec!["Name", "Age", "Office", "Salary"]);
    assert_eq!(Employee::MODEL.name, "Employee");
    assert!(Employee::PATH.ends_with("::Employee"));
    assert_eq!(
        Employee::MODEL.fields[2].target().map(|m| m.name),
        Some("Office")
    );
}

#[derive(Clone, Debug, Default, PartialEq, Record)]
struct Sample {
    count: usize,
    grade: char,
    payload: Blob,
    reading: f64,
    spare: Option<f64>,
    labels: HashMap<String, u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Record)]
struct SampleView {
    count: u64,
    grade: char,
    payload: Blob,
    reading: f64,
    spare: Option<f64>,
    labels: BTreeMap<String, u64>,
}

#[test]
fn wider_field_types_copy_unchanged() {
    let sample = Sample {
        count: 3,
        grade: 'B',
        payload: Blob::new(vec![0, 255]),
        reading: f64::NEG_INFINITY,
        spare: Some(f64::INFINITY),
        labels: HashMap::from([("a".to_string(), 1)]),
    };

    let view: SampleView = map_one(&sample).expect("mapping succeeds");

    assert_eq!(view.count, 3);
    assert_eq!(view.grade, 'B');
    assert_eq!(view.payload.as_bytes(), &[0, 255]);
    assert_eq!(view.reading, f64::NEG_INFINITY);
    assert_eq!(view.spare, Some(f64::INFINITY));
    assert_eq!(view.labels["a"], 1);
}

#[test]
fn nan_readings_survive_mapping() {
    let sample = Sample {
        reading: f64::NAN,
        ..Sample::default()
    };

    let view: SampleView = map_one(&sample).expect("mapping succeeds");

    assert!(view.reading.is_nan());
    assert_eq!(view.spare, None);
}
