//! Mapping table loader.
//!
//! A mapping table is comma-separated text with two header lines:
//!
//! ```text
//! ISO:2020,FIPS:2014     standards taking part, as NAME:VERSION
//! alpha3,alpha2          join-key format of each standard
//! AFG,AF                 data rows, one value per column
//! PSE,GZ
//! ,KV                    an empty value means no entry in that column
//! ```
//!
//! Values are split on plain commas; quotes have no special meaning. Lines
//! without any value are skipped. Problems in the header lines are fatal.
//! Problems in a data row reject that row only; they are collected in the
//! [`LoadReport`] and logged.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use country_model::{CountryCode, StandardInfo};
use country_standards::{Entries, StandardRegistry};
use csv::StringRecord;

use crate::config::HeaderMode;
use crate::error::{HeaderProblem, MappingError, Result};

/// Rejected rows logged individually before only a summary is emitted.
const MAX_ROW_WARNINGS: usize = 5;

/// A standard taking part in a table together with its join-key format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardFieldBinding {
    standard: Arc<StandardInfo>,
    field: String,
}

impl StandardFieldBinding {
    pub fn standard(&self) -> &Arc<StandardInfo> {
        &self.standard
    }

    /// Format whose values identify this standard's entries in the table.
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl fmt::Display for StandardFieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.standard, self.field)
    }
}

/// An entry placed in a row, with the join field of the column it came from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowEntry {
    code: Arc<CountryCode>,
    field: String,
}

impl RowEntry {
    pub fn code(&self) -> &Arc<CountryCode> {
        &self.code
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Value of the entry in its column's join field.
    pub fn key(&self) -> Option<&str> {
        self.code.format(&self.field)
    }
}

/// Entries of different columns that denote corresponding territories.
///
/// A row always holds at least two entries and never the same entry twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingRow {
    entries: Vec<RowEntry>,
}

impl MappingRow {
    /// Entries in column order.
    pub fn columns(&self) -> &[RowEntry] {
        &self.entries
    }

    pub fn entries(&self) -> impl Iterator<Item = &Arc<CountryCode>> {
        self.entries.iter().map(RowEntry::code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Why a data row was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RowProblem {
    TooFewValues { count: usize },
    TooManyValues { count: usize, columns: usize },
    UnmatchedValue {
        column: usize,
        standard: String,
        field: String,
        value: String,
    },
    TooFewEntries { count: usize },
}

impl fmt::Display for RowProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewValues { count } => {
                write!(f, "{count} value(s), at least 2 are required")
            }
            Self::TooManyValues { count, columns } => {
                write!(f, "{count} values for {columns} columns")
            }
            Self::UnmatchedValue {
                column,
                standard,
                field,
                value,
            } => write!(
                f,
                "column {column}: no {standard} entry has {field} \"{value}\""
            ),
            Self::TooFewEntries { count } => {
                write!(f, "{count} matched entries, at least 2 are required")
            }
        }
    }
}

/// A rejected data row. `line` is the 1-based line number in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    pub line: u64,
    pub problem: RowProblem,
}

impl fmt::Display for RowFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.problem)
    }
}

/// Outcome of loading a table that did not fail outright.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub table: String,
    pub rows_loaded: usize,
    pub duplicate_rows: usize,
    pub failures: Vec<RowFailure>,
    /// Header columns dropped in [`HeaderMode::Lenient`].
    pub dropped_columns: Vec<HeaderProblem>,
}

impl LoadReport {
    pub fn failed_rows(&self) -> usize {
        self.failures.len()
    }

    /// True when no row was rejected and no column dropped.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.dropped_columns.is_empty()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} rows loaded, {} rejected, {} duplicates skipped",
            self.table,
            self.rows_loaded,
            self.failures.len(),
            self.duplicate_rows
        )?;
        for problem in &self.dropped_columns {
            writeln!(f, "  dropped {problem}")?;
        }
        for failure in &self.failures {
            writeln!(f, "  {failure}")?;
        }
        Ok(())
    }
}

/// Bindings and rows parsed from a table, plus the entry sets of every
/// bound standard.
#[derive(Debug, Clone)]
pub struct MappingTable {
    bindings: Vec<StandardFieldBinding>,
    rows: Vec<MappingRow>,
    entries: BTreeMap<Arc<StandardInfo>, Entries>,
}

impl MappingTable {
    /// Column schema, in declared order.
    pub fn bindings(&self) -> &[StandardFieldBinding] {
        &self.bindings
    }

    pub fn rows(&self) -> &[MappingRow] {
        &self.rows
    }

    /// Full entry set of a bound standard.
    pub fn entries(&self, standard: &StandardInfo) -> Option<&Entries> {
        self.entries.get(standard)
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Vec<StandardFieldBinding>,
        Vec<MappingRow>,
        BTreeMap<Arc<StandardInfo>, Entries>,
    ) {
        (self.bindings, self.rows, self.entries)
    }
}

/// Parse `content`, resolving its standards through `registry`.
///
/// `table` names the source in errors and logs.
///
/// # Errors
///
/// Fails on an empty table, a broken header (see [`HeaderMode`]), a join
/// field line whose length differs from the number of resolved standards,
/// a table without data lines, or one where every row was rejected.
pub fn load_table(
    table: &str,
    content: &str,
    registry: &StandardRegistry,
    mode: HeaderMode,
) -> Result<(MappingTable, LoadReport)> {
    let csv_error = |e: csv::Error| MappingError::Csv {
        table: table.to_string(),
        message: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let mut records = reader.records();

    let standards_line = records
        .next()
        .transpose()
        .map_err(csv_error)?
        .ok_or_else(|| MappingError::EmptyTable {
            table: table.to_string(),
        })?;
    let fields_line = records.next().transpose().map_err(csv_error)?;

    let mut report = LoadReport {
        table: table.to_string(),
        ..LoadReport::default()
    };

    let standards = resolve_standards(table, &standards_line, registry, mode, &mut report)?;
    let bindings = bind_fields(table, standards, fields_line.as_ref(), mode, &mut report)?;
    let entries = load_entries(registry, &bindings)?;

    let columns: Vec<Column<'_>> = bindings
        .iter()
        .map(|binding| Column::new(binding, &entries))
        .collect();

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    let mut data_lines = 0usize;
    for record in records {
        let record = record.map_err(csv_error)?;
        let line = record.position().map_or(0, csv::Position::line);
        if values(&record).is_empty() {
            tracing::debug!(table = %table, line, "blank line skipped");
            continue;
        }
        data_lines += 1;

        match parse_row(&record, &columns, line) {
            Ok(row) => {
                if seen.insert(row.clone()) {
                    rows.push(row);
                } else {
                    report.duplicate_rows += 1;
                    tracing::debug!(table = %table, line, "duplicate mapping row skipped");
                }
            }
            Err(problem) => {
                let failure = RowFailure { line, problem };
                if report.failures.len() < MAX_ROW_WARNINGS {
                    tracing::warn!(table = %table, line, problem = %failure.problem, "mapping row rejected");
                }
                report.failures.push(failure);
            }
        }
    }
    drop(columns);

    if report.failures.len() > MAX_ROW_WARNINGS {
        tracing::warn!(
            table = %table,
            rejected = report.failures.len(),
            "mapping table contains rejected rows"
        );
    }

    if data_lines == 0 {
        return Err(MappingError::NoDataRows {
            table: table.to_string(),
        });
    }
    if rows.is_empty() {
        return Err(MappingError::NoValidRows {
            table: table.to_string(),
            failed: report.failures.len(),
        });
    }

    report.rows_loaded = rows.len();
    tracing::info!(
        table = %table,
        standards = bindings.len(),
        rows = rows.len(),
        rejected = report.failures.len(),
        "mapping table loaded"
    );

    Ok((
        MappingTable {
            bindings,
            rows,
            entries,
        },
        report,
    ))
}

/// Values of a record without trailing empty fields.
fn values(record: &StringRecord) -> Vec<&str> {
    let mut values: Vec<&str> = record.iter().collect();
    while values.last().is_some_and(|v| v.is_empty()) {
        values.pop();
    }
    values
}

/// Split a `NAME:VERSION` token. An empty version means unversioned.
fn split_token(token: &str) -> Option<(&str, Option<&str>)> {
    let (name, version) = token.split_once(':')?;
    let (name, version) = (name.trim(), version.trim());
    if name.is_empty() || version.contains(':') {
        return None;
    }
    Some((name, (!version.is_empty()).then_some(version)))
}

fn resolve_standards(
    table: &str,
    line: &StringRecord,
    registry: &StandardRegistry,
    mode: HeaderMode,
    report: &mut LoadReport,
) -> Result<Vec<Arc<StandardInfo>>> {
    let mut malformed = Vec::new();
    let mut unknown = Vec::new();
    let mut tokens = Vec::new();

    for (index, token) in values(line).into_iter().enumerate() {
        let column = index + 1;
        match split_token(token) {
            Some(parts) => tokens.push((column, token, parts)),
            None => malformed.push(HeaderProblem::MalformedToken {
                column,
                token: token.to_string(),
            }),
        }
    }

    let mut standards = Vec::new();
    for (column, token, (name, version)) in tokens {
        match registry.lookup_version(name, version) {
            Some(info) => standards.push(Arc::clone(info)),
            None => unknown.push(HeaderProblem::UnknownStandard {
                column,
                standard: token.to_string(),
            }),
        }
    }

    let fatal = !malformed.is_empty() || (mode == HeaderMode::Strict && !unknown.is_empty());
    if fatal {
        malformed.extend(unknown);
        return Err(MappingError::Header {
            table: table.to_string(),
            problems: malformed,
        });
    }
    for problem in unknown {
        tracing::warn!(table = %table, problem = %problem, "mapping column dropped");
        report.dropped_columns.push(problem);
    }

    if standards.len() < 2 {
        return Err(MappingError::TooFewStandards {
            table: table.to_string(),
            count: standards.len(),
        });
    }
    Ok(standards)
}

fn bind_fields(
    table: &str,
    standards: Vec<Arc<StandardInfo>>,
    line: Option<&StringRecord>,
    mode: HeaderMode,
    report: &mut LoadReport,
) -> Result<Vec<StandardFieldBinding>> {
    let fields = line.map(values).unwrap_or_default();
    if fields.len() != standards.len() {
        return Err(MappingError::FieldCountMismatch {
            table: table.to_string(),
            standards: standards.len(),
            fields: fields.len(),
        });
    }

    let mut bindings = Vec::new();
    let mut problems = Vec::new();
    for (index, (standard, field)) in standards.into_iter().zip(fields).enumerate() {
        if standard.supports_format(field) {
            bindings.push(StandardFieldBinding {
                standard,
                field: field.to_string(),
            });
        } else {
            problems.push(HeaderProblem::UnknownField {
                column: index + 1,
                standard: standard.to_string(),
                field: field.to_string(),
            });
        }
    }

    if !problems.is_empty() {
        if mode == HeaderMode::Strict {
            return Err(MappingError::Header {
                table: table.to_string(),
                problems,
            });
        }
        for problem in problems {
            tracing::warn!(table = %table, problem = %problem, "mapping column dropped");
            report.dropped_columns.push(problem);
        }
    }

    if bindings.len() < 2 {
        return Err(MappingError::TooFewStandards {
            table: table.to_string(),
            count: bindings.len(),
        });
    }
    Ok(bindings)
}

/// Entry sets of every bound standard. A provider that fails to load is
/// treated as empty, which rejects every row naming one of its values.
fn load_entries(
    registry: &StandardRegistry,
    bindings: &[StandardFieldBinding],
) -> Result<BTreeMap<Arc<StandardInfo>, Entries>> {
    let mut entries = BTreeMap::new();
    for binding in bindings {
        if entries.contains_key(&binding.standard) {
            continue;
        }
        let provider = registry.resolve(&binding.standard)?;
        let loaded = provider.entries().unwrap_or_else(|error| {
            tracing::warn!(
                standard = %binding.standard,
                error = %error,
                "standard entries could not be loaded; treating the standard as empty"
            );
            Entries::from(Vec::new())
        });
        entries.insert(Arc::clone(&binding.standard), loaded);
    }
    Ok(entries)
}

/// A binding with its entries indexed by join-key value.
struct Column<'a> {
    binding: &'a StandardFieldBinding,
    by_key: HashMap<&'a str, &'a Arc<CountryCode>>,
}

impl<'a> Column<'a> {
    fn new(
        binding: &'a StandardFieldBinding,
        entries: &'a BTreeMap<Arc<StandardInfo>, Entries>,
    ) -> Self {
        let mut by_key = HashMap::new();
        let codes = entries.get(&binding.standard).map(|e| e.iter()).into_iter().flatten();
        for code in codes {
            if let Some(value) = code.format(&binding.field) {
                by_key.entry(value).or_insert(code);
            }
        }
        Self { binding, by_key }
    }
}

fn parse_row(
    record: &StringRecord,
    columns: &[Column<'_>],
    line: u64,
) -> std::result::Result<MappingRow, RowProblem> {
    let values = values(record);
    if values.len() <= 1 {
        return Err(RowProblem::TooFewValues {
            count: values.len(),
        });
    }
    if values.len() > columns.len() {
        return Err(RowProblem::TooManyValues {
            count: values.len(),
            columns: columns.len(),
        });
    }

    let mut entries: Vec<RowEntry> = Vec::with_capacity(values.len());
    for (index, (value, column)) in values.into_iter().zip(columns).enumerate() {
        let binding = column.binding;
        if value.is_empty() {
            tracing::debug!(line, standard = %binding.standard, "no entry in column");
            continue;
        }
        let Some(code) = column.by_key.get(value) else {
            return Err(RowProblem::UnmatchedValue {
                column: index + 1,
                standard: binding.standard.to_string(),
                field: binding.field.clone(),
                value: value.to_string(),
            });
        };
        if !entries.iter().any(|e| e.code == **code) {
            entries.push(RowEntry {
                code: Arc::clone(code),
                field: binding.field.clone(),
            });
        }
    }

    if entries.len() < 2 {
        return Err(RowProblem::TooFewEntries {
            count: entries.len(),
        });
    }
    Ok(MappingRow { entries })
}
