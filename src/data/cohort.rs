//! Cohort → Subtype → Condition hierarchy with name-based lookup.

use crate::data::MeasurementTable;
use crate::error::{BiomarkerError, Result};
use std::collections::HashMap;

/// A named grouping of conditions within a cohort.
///
/// Owns one measurement table per declared condition name, plus the most
/// recently computed accepted-biomarker set per condition (later computations
/// overwrite earlier ones).
#[derive(Debug, Clone)]
pub struct Subtype {
    name: String,
    condition_names: Vec<String>,
    tables: HashMap<String, MeasurementTable>,
    biomarkers: HashMap<String, MeasurementTable>,
}

impl Subtype {
    /// Create a subtype with no conditions yet.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            condition_names: Vec::new(),
            tables: HashMap::new(),
            biomarkers: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared condition names, in discovery order.
    pub fn condition_names(&self) -> &[String] {
        &self.condition_names
    }

    /// Attach a condition's measurement table. The table's own name is the
    /// condition name; re-adding an existing name replaces its table.
    pub fn add_condition(&mut self, table: MeasurementTable) {
        let name = table.name().to_string();
        if !self.condition_names.contains(&name) {
            self.condition_names.push(name.clone());
        }
        self.tables.insert(name, table);
    }

    /// Look up a condition's table by name.
    pub fn condition(&self, condition_name: &str) -> Result<&MeasurementTable> {
        self.tables
            .get(condition_name)
            .ok_or_else(|| BiomarkerError::ConditionNotFound {
                subtype: self.name.clone(),
                condition: condition_name.to_string(),
            })
    }

    /// Register the accepted biomarker set for a condition, overwriting any
    /// prior registration under the same condition name.
    pub fn register_biomarkers(&mut self, condition_name: &str, accepted: MeasurementTable) {
        self.biomarkers.insert(condition_name.to_string(), accepted);
    }

    /// Most recently registered biomarker set for a condition, if any.
    pub fn biomarkers(&self, condition_name: &str) -> Option<&MeasurementTable> {
        self.biomarkers.get(condition_name)
    }
}

/// Top-level grouping (e.g. a disease type), owning its subtypes.
#[derive(Debug, Clone)]
pub struct Cohort {
    name: String,
    subtypes: Vec<Subtype>,
}

impl Cohort {
    /// Create a cohort with no subtypes yet.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subtypes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_subtype(&mut self, subtype: Subtype) {
        self.subtypes.push(subtype);
    }

    pub fn subtypes(&self) -> &[Subtype] {
        &self.subtypes
    }

    /// Look up a subtype by name.
    pub fn subtype(&self, subtype_name: &str) -> Result<&Subtype> {
        self.subtypes
            .iter()
            .find(|s| s.name == subtype_name)
            .ok_or_else(|| BiomarkerError::SubtypeNotFound(subtype_name.to_string()))
    }

    /// Mutable subtype lookup, used to register computed biomarker sets.
    pub fn subtype_mut(&mut self, subtype_name: &str) -> Result<&mut Subtype> {
        self.subtypes
            .iter_mut()
            .find(|s| s.name == subtype_name)
            .ok_or_else(|| BiomarkerError::SubtypeNotFound(subtype_name.to_string()))
    }
}
