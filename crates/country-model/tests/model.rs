//! Tests for country-model types.

use std::sync::Arc;

use chrono::NaiveDate;
use country_model::{ALPHA_2, ALPHA_3, CodeSet, CountryCode, ModelError, NUMERIC, StandardInfo};

fn iso() -> Arc<StandardInfo> {
    Arc::new(
        StandardInfo::new(
            "ISO",
            Some("2020"),
            NaiveDate::from_ymd_opt(2020, 8, 1).unwrap(),
            [ALPHA_2, ALPHA_3, NUMERIC],
        )
        .unwrap(),
    )
}

#[test]
fn builds_entry_with_declared_formats() {
    let code = CountryCode::new(
        iso(),
        "Afghanistan",
        [(ALPHA_2, "AF"), (ALPHA_3, "AFG"), (NUMERIC, "004")],
    )
    .unwrap();

    assert_eq!(code.name(), "Afghanistan");
    assert_eq!(code.format(ALPHA_3), Some("AFG"));
    assert_eq!(code.format("alpha4"), None);
    assert!(code.has_value("004"));
    assert!(!code.has_value("afg"));
    assert!(code.belongs_to(&iso()));
}

#[test]
fn rejects_unknown_format() {
    let err = CountryCode::new(iso(), "Afghanistan", [("fips", "AF")]).unwrap_err();
    assert_eq!(
        err,
        ModelError::UnknownFormat {
            standard: "ISO:2020".to_string(),
            format: "fips".to_string(),
        }
    );
}

#[test]
fn rejects_blank_name() {
    let err = CountryCode::new(iso(), "  ", [(ALPHA_2, "AF")]).unwrap_err();
    assert!(matches!(err, ModelError::EmptyName { .. }));
}

#[test]
fn code_set_deduplicates_equal_entries() {
    let a = Arc::new(CountryCode::new(iso(), "Albania", [(ALPHA_2, "AL")]).unwrap());
    let b = Arc::new(CountryCode::new(iso(), "Albania", [(ALPHA_2, "AL")]).unwrap());
    let c = Arc::new(CountryCode::new(iso(), "Algeria", [(ALPHA_2, "DZ")]).unwrap());

    let set: CodeSet = [a, b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
    let names: Vec<&str> = set.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Albania", "Algeria"]);
}

#[test]
fn entry_serializes_with_standard_key() {
    let code = CountryCode::new(iso(), "Afghanistan", [(ALPHA_2, "AF")]).unwrap();
    let json = serde_json::to_value(&code).expect("serialize code");
    assert_eq!(json["standard"], "ISO:2020");
    assert_eq!(json["name"], "Afghanistan");
    assert_eq!(json["formats"]["alpha2"], "AF");
}
