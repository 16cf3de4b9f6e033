//! Decide which discarded rows still deserve to appear in a discard report.

use crate::compare::DiscardRecord;
use crate::data::{Cohort, MeasurementRow};
use crate::error::Result;
use std::collections::HashMap;

/// Split cross-subtype discards into genuinely redundant rows and rows worth
/// keeping visible.
///
/// A row discarded during cross-subtype comparison matched some other table's
/// direction, but the same identifier may also appear with a different
/// highest-mean group in the reference conditions; such a row is not truly
/// redundant and is kept for the discard report. The reference set is
/// re-derived from the cohort rather than trusting earlier bookkeeping, so it
/// may overlap with tables already compared against.
pub fn reconcile(
    discards: &[&DiscardRecord],
    cohort: &Cohort,
    other_subtype_names: &[String],
    other_condition_names: &[String],
) -> Result<Vec<DiscardRecord>> {
    // Reference set: every row of every listed condition present in every
    // named subtype. An identifier can appear in several reference tables
    // with conflicting groups, so all of its rows are kept for the join.
    let mut reference: HashMap<&str, Vec<&MeasurementRow>> = HashMap::new();
    for subtype_name in other_subtype_names {
        let subtype = cohort.subtype(subtype_name)?;
        for condition_name in subtype.condition_names() {
            if !other_condition_names.contains(condition_name) {
                continue;
            }
            let table = subtype.condition(condition_name)?;
            for row in table.iter() {
                reference.entry(row.identifier.as_str()).or_default().push(row);
            }
        }
    }

    // A discard is excluded when any reference row shares its highest-mean
    // group; absent identifiers and all-differing joins stay visible.
    let kept = discards
        .iter()
        .filter(|record| match reference.get(record.row.identifier.as_str()) {
            Some(reference_rows) => !reference_rows
                .iter()
                .any(|r| r.highest_mean_group == record.row.highest_mean_group),
            None => true,
        })
        .map(|record| (*record).clone())
        .collect();

    Ok(kept)
}
