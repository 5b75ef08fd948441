use country_map::{HeaderMode, HeaderProblem, MappingError, RowProblem, load_table};
use country_standards::{
    Fips104Standard, GencStandard, Iso3166Standard, SourceText, StandardRegistry, iso,
};

fn load(content: &str, mode: HeaderMode) -> Result<country_map::LoadReport, MappingError> {
    let registry = StandardRegistry::builtin().expect("builtin registry");
    load_table("inline", content, &registry, mode).map(|(_, report)| report)
}

fn strict(content: &str) -> Result<country_map::LoadReport, MappingError> {
    load(content, HeaderMode::Strict)
}

#[test]
fn embedded_table_loads_cleanly() {
    let registry = StandardRegistry::builtin().expect("builtin registry");
    let (table, report) = load_table(
        country_map::embedded::MAPPINGS_FILE,
        country_map::embedded::MAPPINGS,
        &registry,
        HeaderMode::Strict,
    )
    .expect("embedded table");
    assert!(report.is_clean(), "{report}");
    assert_eq!(table.bindings().len(), 3);
    assert_eq!(table.rows().len(), report.rows_loaded);
    assert!(table.rows().iter().all(|row| row.len() >= 2));
}

#[test]
fn malformed_tokens_are_all_reported() {
    let err = strict("ISO:2020,FIPS,GENC:9\nalpha3,alpha2,alpha3\nAFG,AF,AFG\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "mapping table inline has an invalid header: column 2: \"FIPS\" is not NAME:VERSION; \
         column 3: standard GENC:9 is not registered"
    );
}

#[test]
fn malformed_token_is_fatal_even_when_lenient() {
    let err = load("ISO:2020,FIPS,GENC:3.0.0\nalpha3,alpha3\nAFG,AFG\n", HeaderMode::Lenient)
        .unwrap_err();
    assert!(matches!(err, MappingError::Header { .. }));
}

#[test]
fn single_standard_is_rejected() {
    let err = strict("ISO:2020\nalpha3\nAFG\n").unwrap_err();
    assert!(matches!(err, MappingError::TooFewStandards { count: 1, .. }));
}

#[test]
fn unknown_standard_is_dropped_when_lenient() {
    let content = "ISO:2020,ACME:1,FIPS:2014\nalpha3,alpha2\nAFG,AF\n";
    assert!(matches!(strict(content), Err(MappingError::Header { .. })));

    let report = load(content, HeaderMode::Lenient).expect("lenient load");
    assert_eq!(report.rows_loaded, 1);
    assert_eq!(
        report.dropped_columns,
        [HeaderProblem::UnknownStandard {
            column: 2,
            standard: "ACME:1".to_string(),
        }]
    );
}

#[test]
fn field_count_must_match_standards() {
    let err = strict("ISO:2020,FIPS:2014\nalpha3\nAFG,AF\n").unwrap_err();
    assert!(matches!(
        err,
        MappingError::FieldCountMismatch {
            standards: 2,
            fields: 1,
            ..
        }
    ));

    let err = strict("ISO:2020,FIPS:2014\n").unwrap_err();
    assert!(matches!(err, MappingError::FieldCountMismatch { fields: 0, .. }));
}

#[test]
fn unknown_field_drops_column_when_lenient() {
    let content = "ISO:2020,FIPS:2014,GENC:3.0.0\nalpha3,alpha3,alpha3\nAFG,AFG\n";
    let err = strict(content).unwrap_err();
    assert!(matches!(
        err,
        MappingError::Header { ref problems, .. }
            if problems == &[HeaderProblem::UnknownField {
                column: 2,
                standard: "FIPS:2014".to_string(),
                field: "alpha3".to_string(),
            }]
    ));

    let report = load(content, HeaderMode::Lenient).expect("lenient load");
    assert_eq!(report.dropped_columns.len(), 1);
    assert_eq!(report.rows_loaded, 1);
}

#[test]
fn empty_and_headerless_tables_are_fatal() {
    assert!(matches!(strict(""), Err(MappingError::EmptyTable { .. })));
    assert!(matches!(strict("\n\n"), Err(MappingError::EmptyTable { .. })));
    assert!(matches!(
        strict("ISO:2020,FIPS:2014\nalpha3,alpha2\n"),
        Err(MappingError::NoDataRows { .. })
    ));
}

#[test]
fn table_without_valid_rows_is_fatal() {
    let err = strict("ISO:2020,FIPS:2014\nalpha3,alpha2\nZZZ,AF\nAFG\n").unwrap_err();
    assert!(matches!(err, MappingError::NoValidRows { failed: 2, .. }));
}

#[test]
fn row_failures_are_recorded() {
    let report = strict(
        "ISO:2020,FIPS:2014\nalpha3,alpha2\nAFG,AF\nAFG\nZZZ,AF\nAFG,AF,XX\n,AF\nAFG,AF\n",
    )
    .expect("load");

    assert_eq!(report.rows_loaded, 1);
    assert_eq!(report.duplicate_rows, 1);
    assert_eq!(report.failed_rows(), 4);
    assert_eq!(
        report.failures[1].problem,
        RowProblem::UnmatchedValue {
            column: 1,
            standard: "ISO:2020".to_string(),
            field: "alpha3".to_string(),
            value: "ZZZ".to_string(),
        }
    );

    insta::assert_snapshot!(report.to_string().trim_end(), @r#"
    inline: 1 rows loaded, 4 rejected, 1 duplicates skipped
      line 4: 1 value(s), at least 2 are required
      line 5: column 1: no ISO:2020 entry has alpha3 "ZZZ"
      line 6: 3 values for 2 columns
      line 7: 1 matched entries, at least 2 are required
    "#);
}

#[test]
fn values_and_tokens_are_trimmed() {
    let report = strict(" ISO : 2020 , FIPS:2014 \n alpha3 , alpha2\n AFG , AF \n\n").expect("load");
    assert_eq!(report.rows_loaded, 1);
    assert!(report.is_clean());
}

#[test]
fn trailing_commas_do_not_count_as_values() {
    let report = strict("ISO:2020,FIPS:2014,GENC:3.0.0\nalpha3,alpha2,alpha3\nAFG,AF,,\n").expect("load");
    assert_eq!(report.rows_loaded, 1);
}

#[test]
fn blank_lines_are_skipped() {
    let report = strict("ISO:2020,FIPS:2014\nalpha3,alpha2\n\nAFG,AF\n   \n , \nALB,AL\n").expect("load");
    assert_eq!(report.rows_loaded, 2);
    assert!(report.is_clean(), "{report}");

    assert!(matches!(
        strict("ISO:2020,FIPS:2014\nalpha3,alpha2\n\n  \n"),
        Err(MappingError::NoDataRows { .. })
    ));
}

#[test]
fn quotes_are_not_special() {
    let report = strict("ISO:2020,FIPS:2014\nalpha3,alpha2\nAFG,AF\n\"ALB,AL\"\n").expect("load");
    assert_eq!(report.rows_loaded, 1);
    assert_eq!(
        report.failures[0].problem,
        RowProblem::UnmatchedValue {
            column: 1,
            standard: "ISO:2020".to_string(),
            field: "alpha3".to_string(),
            value: "\"ALB".to_string(),
        }
    );
}

#[test]
fn unloadable_standard_rejects_rows_naming_it() {
    let broken = Iso3166Standard::with_source(
        iso::info().expect("iso descriptor"),
        SourceText::text("bad.json", "{"),
    )
    .expect("iso provider");
    let mut registry = StandardRegistry::new();
    registry.register(broken).expect("register iso");
    registry
        .register(Fips104Standard::embedded().expect("fips provider"))
        .expect("register fips");
    registry
        .register(GencStandard::embedded().expect("genc provider"))
        .expect("register genc");

    let (table, report) = load_table(
        "inline",
        "ISO:2020,FIPS:2014,GENC:3.0.0\nalpha3,alpha2,alpha3\nAFG,AF,AFG\n,KV,XKS\n",
        &registry,
        HeaderMode::Strict,
    )
    .expect("load");
    assert_eq!(table.rows().len(), 1);
    let iso = registry.lookup("ISO").expect("iso registered");
    assert!(table.entries(iso).expect("iso bound").is_empty());
    assert_eq!(report.failed_rows(), 1);
    assert_eq!(
        report.failures[0].problem,
        RowProblem::UnmatchedValue {
            column: 1,
            standard: "ISO:2020".to_string(),
            field: "alpha3".to_string(),
            value: "AFG".to_string(),
        }
    );

    let err = load_table(
        "iso-only",
        "ISO:2020,FIPS:2014\nalpha3,alpha2\nAFG,AF\nALB,AL\n",
        &registry,
        HeaderMode::Strict,
    )
    .unwrap_err();
    assert!(matches!(err, MappingError::NoValidRows { failed: 2, .. }));
}
