//! Identifier-indexed measurement table for one condition.

use crate::data::MeasurementRow;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All retained measurement rows for one condition, keyed by identifier.
///
/// Membership is set-semantic: insertion order carries no meaning. Accession
/// splitting is not injective, so duplicate identifiers can arrive from a
/// single export; the first occurrence wins and later ones are dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementTable {
    /// Condition name this table was built for (used to tag discards).
    name: String,
    rows: HashMap<String, MeasurementRow>,
}

impl MeasurementTable {
    /// Create an empty table for a named condition.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: HashMap::new(),
        }
    }

    /// Condition name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a row. Returns false (and keeps the existing row) when the
    /// identifier is already present.
    pub fn insert(&mut self, row: MeasurementRow) -> bool {
        match self.rows.entry(row.identifier.clone()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(row);
                true
            }
        }
    }

    /// Look up a row by identifier.
    pub fn get(&self, identifier: &str) -> Option<&MeasurementRow> {
        self.rows.get(identifier)
    }

    /// Does the table contain this identifier?
    pub fn contains(&self, identifier: &str) -> bool {
        self.rows.contains_key(identifier)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over rows in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &MeasurementRow> {
        self.rows.values()
    }

    /// Identifiers sorted lexically, for deterministic reporting.
    pub fn sorted_identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.rows.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Rows sorted by identifier, for deterministic reporting.
    pub fn sorted_rows(&self) -> Vec<&MeasurementRow> {
        let mut rows: Vec<&MeasurementRow> = self.rows.values().collect();
        rows.sort_unstable_by(|a, b| a.identifier.cmp(&b.identifier));
        rows
    }
}
