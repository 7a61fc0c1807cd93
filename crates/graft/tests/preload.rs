use graft::{
    config::GraftConfig,
    obs::{event_report, event_reset_all},
    prelude::*,
};
use std::{cell::Cell, collections::HashMap, sync::Arc};

#[derive(Clone, Debug, Default, PartialEq, Record)]
struct Asset {
    #[record(rename = "SerialNumber")]
    serial_number: String,

    #[record(rename = "V")]
    version: i64,
}

#[derive(Clone, Debug, Default, Record)]
struct Device {
    #[record(rename = "FK")]
    fk: String,

    #[record(rename = "Assoc", preload = "foreignkey:FK;primarykey:SerialNumber")]
    assoc: Option<Box<Asset>>,

    #[record(rename = "Shared", preload = "foreignkey:FK;primarykey:SerialNumber")]
    shared: Option<Arc<Asset>>,

    #[record(rename = "Missing", preload = "foreignkey:FK")]
    missing: Option<Asset>,
}

fn device(fk: &str) -> Device {
    Device {
        fk: fk.to_string(),
        ..Device::default()
    }
}

fn asset(sn: &str, version: i64) -> Asset {
    Asset {
        serial_number: sn.to_string(),
        version,
    }
}

// in-memory table standing in for a database
fn table() -> Vec<Asset> {
    vec![asset("S1", 1), asset("S2", 2)]
}

#[test]
fn single_fetch_fills_only_empty_associations() {
    let mut devices = vec![device("S1"), device(""), device("S1")];
    devices[2].assoc = Some(Box::new(asset("S1", 7)));

    let calls = Cell::new(0);
    let mut seen = Vec::new();
    let finder = |out: &mut Vec<Asset>, filter: &Filter| {
        calls.set(calls.get() + 1);
        seen = filter.values.clone();
        out.extend(table().into_iter().filter(|a| filter.matches(&a.serial_number.to_value())));
    };

    let report = Preload::new(RecordSet::sequence(&mut devices), finder)
        .preload::<Asset>("Assoc")
        .expect("preload succeeds");

    assert_eq!(calls.get(), 1);
    assert_eq!(seen, vec![Value::from("S1")]);
    assert_eq!(devices[0].assoc.as_deref(), Some(&asset("S1", 1)));
    assert!(devices[1].assoc.is_none());
    assert_eq!(devices[2].assoc.as_deref(), Some(&asset("S1", 7)));
    assert_eq!(report.applied, 1);
}

#[test]
fn missing_primary_key_fails_before_fetch() {
    let mut devices = vec![device("S1")];
    let calls = Cell::new(0);

    let err = Preload::new(
        RecordSet::sequence(&mut devices),
        |_: &mut Vec<Asset>, _: &Filter| calls.set(calls.get() + 1),
    )
    .preload::<Asset>("Missing")
    .expect_err("tag lacks primarykey");

    assert!(err.is_configuration());
    assert_eq!(calls.get(), 0);
}

#[test]
fn hash_map_values_share_fetched_arcs() {
    let mut by_name = HashMap::from([("a", device("S2")), ("b", device("S2"))]);

    Preload::new(RecordSet::hash_map(&mut by_name), |out: &mut Vec<Asset>, filter: &Filter| {
        let wanted: Vec<&str> = filter.text_values().collect();
        out.extend(table().into_iter().filter(|a| wanted.contains(&a.serial_number.as_str())));
    })
    .preload::<Asset>("Shared")
    .expect("preload succeeds");

    let (Some(a), Some(b)) = (&by_name["a"].shared, &by_name["b"].shared) else {
        panic!("both devices should be loaded");
    };
    assert!(Arc::ptr_eq(a, b));
    assert_eq!(a.version, 2);
}

#[test]
fn config_file_overrides_column_case() {
    let config = GraftConfig::from_toml_str(
        r#"
        [preload]
        column_case = "pascal"
        "#,
    )
    .expect("valid config");

    let mut devices = vec![device("S1")];
    let mut column = String::new();

    Preload::new(RecordSet::sequence(&mut devices), |_: &mut Vec<Asset>, filter: &Filter| {
        column = filter.column.clone();
    })
    .config(&config)
    .preload::<Asset>("Assoc")
    .expect("preload succeeds");

    assert_eq!(column, "SerialNumber");
    assert!(devices[0].assoc.is_none());
}

#[test]
fn counters_track_preload_batches() {
    event_reset_all();

    let mut devices = vec![device("S1"), device("S2"), device("S9"), device("")];
    Preload::new(RecordSet::sequence(&mut devices), |out: &mut Vec<Asset>, _: &Filter| {
        out.extend(table());
    })
    .preload::<Asset>("Assoc")
    .expect("preload succeeds");

    let ops = event_report().ops;
    assert_eq!(ops.preload_calls, 1);
    assert_eq!(ops.keys_batched, 3);
    assert_eq!(ops.skipped_zero_keys, 1);
    assert_eq!(ops.records_fetched, 2);
    assert_eq!(ops.associations_applied, 2);
    assert_eq!(ops.unmatched_keys, 1);
}

#[test]
fn version_is_exported() {
    assert!(!graft::VERSION.is_empty());
}
