//! Parameter file loading

use std::io::Write;
use tempfile::{tempdir, Builder};
use warehouse_econ::config::load_parameters;
use warehouse_econ::error::WarehouseError;
use warehouse_econ::params::WarehouseParameters;

#[test]
fn test_load_toml_file() {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
total_area = 500.0
shelves_per_m2 = 4

[shares]
storage = 0.25
loan = 0.25
vip = 0.25
short_term = 0.25

[expenses]
salary = 300000.0
"#
    )
    .unwrap();

    let params = load_parameters(file.path()).unwrap();
    assert_eq!(params.total_area, 500.0);
    assert_eq!(params.shelves_per_m2, 4);
    assert_eq!(params.shares.vip, 0.25);
    assert_eq!(params.expenses.salary, 300_000.0);
    assert_eq!(params.expenses.taxes, 50_000.0);
    assert!(params.validate().is_ok());
}

#[test]
fn test_load_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scenario.json");
    let params = WarehouseParameters {
        total_area: 320.0,
        shelves_per_m2: 2,
        ..WarehouseParameters::default()
    };
    std::fs::write(&path, serde_json::to_string(&params).unwrap()).unwrap();

    let loaded = load_parameters(&path).unwrap();
    assert_eq!(loaded.total_area, 320.0);
    assert_eq!(loaded.shelves_per_m2, 2);
    assert_eq!(loaded.risk.enabled, params.risk.enabled);
    assert_eq!(loaded.expenses.salary, 240_000.0);
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let err = load_parameters(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, WarehouseError::IoError(_)));
}

#[test]
fn test_malformed_json() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{{ \"total_area\": ").unwrap();

    let err = load_parameters(file.path()).unwrap_err();
    assert!(matches!(err, WarehouseError::SerdeError(_)));
}
