//! Query structure over a loaded mapping table.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use country_model::{CodeSet, StandardInfo};
use country_standards::Entries;

use crate::table::{MappingRow, MappingTable, StandardFieldBinding};

/// Rows of a mapping table, indexed by the join-key value of each entry.
///
/// The index is immutable after construction and can be shared between
/// threads without locking.
#[derive(Debug, Clone)]
pub struct MappingIndex {
    bindings: Vec<StandardFieldBinding>,
    rows: Vec<MappingRow>,
    entries: BTreeMap<Arc<StandardInfo>, Entries>,
    /// standard -> join-key value -> indices into `rows`
    keys: BTreeMap<Arc<StandardInfo>, HashMap<String, Vec<usize>>>,
}

impl MappingIndex {
    pub fn new(table: MappingTable) -> Self {
        let (bindings, rows, entries) = table.into_parts();

        let mut keys: BTreeMap<Arc<StandardInfo>, HashMap<String, Vec<usize>>> = BTreeMap::new();
        for (index, row) in rows.iter().enumerate() {
            for column in row.columns() {
                let Some(key) = column.key() else {
                    continue;
                };
                let positions = keys
                    .entry(Arc::clone(column.code().standard()))
                    .or_default()
                    .entry(key.to_string())
                    .or_default();
                if positions.last() != Some(&index) {
                    positions.push(index);
                }
            }
        }

        Self {
            bindings,
            rows,
            entries,
            keys,
        }
    }

    /// Standards named by the table's bindings.
    pub fn mapped_standards(&self) -> BTreeSet<Arc<StandardInfo>> {
        self.bindings
            .iter()
            .map(|b| Arc::clone(b.standard()))
            .collect()
    }

    pub fn is_mapped(&self, standard: &StandardInfo) -> bool {
        self.bindings.iter().any(|b| b.standard().as_ref() == standard)
    }

    pub fn bindings(&self) -> &[StandardFieldBinding] {
        &self.bindings
    }

    pub fn all_rows(&self) -> &[MappingRow] {
        &self.rows
    }

    /// Entries corresponding to the `source` entry keyed by `value`.
    ///
    /// Every row whose `source` entry has `value` in its column's join field
    /// contributes all of its entries of other standards. Unknown standards
    /// and unmapped values yield an empty set.
    pub fn lookup(&self, source: &StandardInfo, value: &str) -> CodeSet {
        if !self.is_mapped(source) {
            return CodeSet::new();
        }
        let Some(positions) = self.keys.get(source).and_then(|keys| keys.get(value)) else {
            return CodeSet::new();
        };
        positions
            .iter()
            .filter_map(|&index| self.rows.get(index))
            .flat_map(MappingRow::entries)
            .filter(|code| !code.belongs_to(source))
            .cloned()
            .collect()
    }

    /// Entries of `standard` carrying `value` in any of their formats.
    ///
    /// Searches the standard's full entry set, not only the rows.
    pub fn entries_with_value(&self, standard: &StandardInfo, value: &str) -> CodeSet {
        self.entries(standard)
            .into_iter()
            .flat_map(|entries| entries.iter())
            .filter(|code| code.has_value(value))
            .cloned()
            .collect()
    }

    /// Full entry set of a mapped standard.
    pub fn entries(&self, standard: &StandardInfo) -> Option<&Entries> {
        self.entries.get(standard)
    }
}
