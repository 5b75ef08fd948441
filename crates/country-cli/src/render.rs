//! Terminal and JSON rendering of conversion results.

use std::collections::BTreeSet;
use std::sync::Arc;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use country_map::StandardFieldBinding;
use country_model::{CodeSet, CountryCode, StandardInfo};

/// Table of matched entries: standard, name, then one column per format.
pub fn codes_table(codes: &CodeSet) -> Table {
    let formats: BTreeSet<&str> = codes
        .iter()
        .flat_map(|code| code.formats().keys().map(String::as_str))
        .collect();

    let mut table = Table::new();
    let mut header = vec![header_cell("Standard"), header_cell("Name")];
    header.extend(formats.iter().map(|format| header_cell(format)));
    table.set_header(header);
    apply_table_style(&mut table);

    for code in codes {
        let mut row = vec![Cell::new(code.standard()), Cell::new(code.name())];
        row.extend(formats.iter().map(|format| match code.format(format) {
            Some(value) => Cell::new(value),
            None => dim_cell("-"),
        }));
        table.add_row(row);
    }
    table
}

/// Matched entries as a pretty-printed JSON array.
pub fn codes_json(codes: &CodeSet) -> serde_json::Result<String> {
    let codes: Vec<&CountryCode> = codes.iter().map(Arc::as_ref).collect();
    serde_json::to_string_pretty(&codes)
}

/// Supported standards with their join fields; the default is marked.
pub fn standards_table(
    standards: &BTreeSet<Arc<StandardInfo>>,
    bindings: &[StandardFieldBinding],
    default: &StandardInfo,
) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Version"),
        header_cell("Published"),
        header_cell("Formats"),
        header_cell("Join fields"),
        header_cell("Default"),
    ]);
    apply_table_style(&mut table);

    for standard in standards {
        let formats: Vec<&str> = standard.format_names().iter().map(String::as_str).collect();
        let fields: Vec<&str> = bindings
            .iter()
            .filter(|b| b.standard() == standard)
            .map(StandardFieldBinding::field)
            .collect();
        let is_default = standard.as_ref() == default;
        table.add_row(vec![
            Cell::new(standard.name()),
            match standard.version() {
                Some(version) => Cell::new(version),
                None => dim_cell("-"),
            },
            Cell::new(standard.published()),
            Cell::new(formats.join(", ")),
            Cell::new(fields.join(", ")),
            if is_default {
                Cell::new("yes").fg(Color::Green).add_attribute(Attribute::Bold)
            } else {
                dim_cell("")
            },
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
