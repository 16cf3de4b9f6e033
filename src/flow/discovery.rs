//! Orchestration flows built on the comparison engine.
//!
//! Three named procedures: a basic two-condition comparison within one
//! subtype, two-stage diagnosis biomarker discovery (within-subtype then
//! cross-subtype), and single-stage monitoring biomarker discovery
//! (cross-subtype only).

use crate::compare::{compare, Comparison};
use crate::data::{Cohort, MeasurementTable};
use crate::error::{BiomarkerError, Result};
use crate::reconcile::{reconcile, DiscardLedger, LedgerKey};
use crate::report::{append_discards, default_biomarker_path, write_biomarkers};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Counts and output locations from one discovery flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverySummary {
    pub subtype: String,
    pub condition: String,
    /// Candidates surviving the within-subtype stage (diagnosis flow only).
    pub n_stage_a: Option<usize>,
    /// Final accepted biomarkers.
    pub n_accepted: usize,
    /// Rows discarded across all stages.
    pub n_discarded: usize,
    /// Discards kept visible after reconciliation.
    pub n_kept_discards: usize,
    /// Biomarker report location, when one was written.
    pub report: Option<PathBuf>,
    /// Discard report location, when one was written.
    pub discard_report: Option<PathBuf>,
}

impl fmt::Display for DiscoverySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Subtype:    {}", self.subtype)?;
        writeln!(f, "Condition:  {}", self.condition)?;
        if let Some(n) = self.n_stage_a {
            writeln!(f, "Within-subtype candidates: {}", n)?;
        }
        writeln!(f, "Accepted biomarkers:       {}", self.n_accepted)?;
        writeln!(f, "Discarded:                 {}", self.n_discarded)?;
        writeln!(f, "Discards kept for report:  {}", self.n_kept_discards)?;
        if let Some(path) = &self.report {
            writeln!(f, "Report: {}", path.display())?;
        }
        Ok(())
    }
}

/// Reject a flow whose subtype of interest is also listed as a comparison
/// subtype. Checked at flow entry, before any table access.
fn validate_other_subtypes(subtype_name: &str, other_subtype_names: &[String]) -> Result<()> {
    if other_subtype_names.iter().any(|s| s == subtype_name) {
        return Err(BiomarkerError::InvalidComparison(format!(
            "subtype '{}' cannot be compared against itself",
            subtype_name
        )));
    }
    Ok(())
}

/// Collect, from every named other subtype, each condition whose name is in
/// the caller-supplied list.
fn collect_other_tables<'a>(
    cohort: &'a Cohort,
    other_subtype_names: &[String],
    other_condition_names: &[String],
) -> Result<Vec<&'a MeasurementTable>> {
    let mut tables = Vec::new();
    for subtype_name in other_subtype_names {
        let subtype = cohort.subtype(subtype_name)?;
        for condition_name in subtype.condition_names() {
            if other_condition_names.contains(condition_name) {
                tables.push(subtype.condition(condition_name)?);
            }
        }
    }
    Ok(tables)
}

fn discard_report_path(subtype_name: &str, condition_name: &str, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.with_extension("discarded.tsv"),
        None => PathBuf::from(format!("{}_{}_discarded.tsv", subtype_name, condition_name)),
    }
}

/// Compare two conditions of one subtype and partition the first into
/// potential biomarkers and discards. Fails with a lookup error when either
/// name is unknown.
pub fn compare_within_subtype(
    cohort: &Cohort,
    subtype_name: &str,
    condition_name1: &str,
    condition_name2: &str,
) -> Result<Comparison> {
    let subtype = cohort.subtype(subtype_name)?;
    let condition = subtype.condition(condition_name1)?;
    let other = subtype.condition(condition_name2)?;
    Ok(compare(condition, &[other]))
}

/// Basic flow: within-subtype comparison with an optional biomarker report.
pub fn run_basic_comparison(
    cohort: &Cohort,
    subtype_name: &str,
    condition_name1: &str,
    condition_name2: &str,
    output: Option<&Path>,
) -> Result<DiscoverySummary> {
    let comparison = compare_within_subtype(cohort, subtype_name, condition_name1, condition_name2)?;

    let report = match output {
        Some(path) => Some(path.to_path_buf()),
        None => Some(default_biomarker_path(subtype_name, condition_name1)),
    };
    if let Some(path) = &report {
        write_biomarkers(&comparison.accepted, path)?;
    }

    Ok(DiscoverySummary {
        subtype: subtype_name.to_string(),
        condition: condition_name1.to_string(),
        n_stage_a: None,
        n_accepted: comparison.accepted.len(),
        n_discarded: comparison.discarded.len(),
        n_kept_discards: 0,
        report,
        discard_report: None,
    })
}

/// Two-stage diagnosis biomarker discovery.
///
/// Stage A compares the condition of interest against the second condition of
/// its own subtype; stage B compares the survivors against the listed
/// conditions of every listed other subtype. Discards from both stages are
/// recorded in the ledger under this analysis' key, reconciled against the
/// other-subtype reference set, and the kept discards appended to the discard
/// report. The final accepted set is registered on the subtype and always
/// written, even when empty.
#[allow(clippy::too_many_arguments)]
pub fn find_diagnosis_biomarkers(
    cohort: &mut Cohort,
    subtype_name: &str,
    condition_name1: &str,
    condition_name2: &str,
    other_subtype_names: &[String],
    other_condition_names: &[String],
    ledger: &mut DiscardLedger,
    output: Option<&Path>,
) -> Result<DiscoverySummary> {
    validate_other_subtypes(subtype_name, other_subtype_names)?;

    let key = LedgerKey::new(subtype_name, condition_name1);

    // Stage A: within-subtype comparison.
    let stage_a = compare_within_subtype(cohort, subtype_name, condition_name1, condition_name2)?;
    let n_stage_a = stage_a.accepted.len();
    let mut n_discarded = stage_a.discarded.len();
    ledger.record(key.clone(), stage_a.discarded);

    // Stage B: survivors against the other subtypes' conditions.
    let others = collect_other_tables(cohort, other_subtype_names, other_condition_names)?;
    let stage_b = compare(&stage_a.accepted, &others);
    n_discarded += stage_b.discarded.len();
    ledger.record(key.clone(), stage_b.discarded);

    // Reconcile everything recorded for this analysis and report what remains.
    let records = ledger.records_for(&key);
    let kept = reconcile(&records, cohort, other_subtype_names, other_condition_names)?;
    let discard_report = discard_report_path(subtype_name, condition_name1, output);
    append_discards(&kept, &discard_report)?;

    let report = match output {
        Some(path) => path.to_path_buf(),
        None => default_biomarker_path(subtype_name, condition_name1),
    };
    write_biomarkers(&stage_b.accepted, &report)?;

    let n_accepted = stage_b.accepted.len();
    let n_kept_discards = kept.len();
    cohort
        .subtype_mut(subtype_name)?
        .register_biomarkers(condition_name1, stage_b.accepted);

    Ok(DiscoverySummary {
        subtype: subtype_name.to_string(),
        condition: condition_name1.to_string(),
        n_stage_a: Some(n_stage_a),
        n_accepted,
        n_discarded,
        n_kept_discards,
        report: Some(report),
        discard_report: Some(discard_report),
    })
}

/// Single-stage monitoring biomarker discovery.
///
/// The named condition is compared directly against the listed conditions of
/// every listed other subtype; there is no within-subtype stage. Discards go
/// to the ledger, but a report is written (and the set registered) only when
/// the accepted set is non-empty.
pub fn find_monitoring_biomarkers(
    cohort: &mut Cohort,
    subtype_name: &str,
    condition_name: &str,
    other_subtype_names: &[String],
    other_condition_names: &[String],
    ledger: &mut DiscardLedger,
    output: Option<&Path>,
) -> Result<DiscoverySummary> {
    validate_other_subtypes(subtype_name, other_subtype_names)?;

    let key = LedgerKey::new(subtype_name, condition_name);

    let condition = cohort.subtype(subtype_name)?.condition(condition_name)?;
    let others = collect_other_tables(cohort, other_subtype_names, other_condition_names)?;
    let comparison = compare(condition, &others);

    let n_accepted = comparison.accepted.len();
    let n_discarded = comparison.discarded.len();
    ledger.record(key, comparison.discarded);

    let mut report = None;
    if !comparison.accepted.is_empty() {
        let path = match output {
            Some(path) => path.to_path_buf(),
            None => default_biomarker_path(subtype_name, condition_name),
        };
        write_biomarkers(&comparison.accepted, &path)?;
        report = Some(path);
        cohort
            .subtype_mut(subtype_name)?
            .register_biomarkers(condition_name, comparison.accepted);
    }

    Ok(DiscoverySummary {
        subtype: subtype_name.to_string(),
        condition: condition_name.to_string(),
        n_stage_a: None,
        n_accepted,
        n_discarded,
        n_kept_discards: 0,
        report,
        discard_report: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Group, MeasurementRow, Subtype};
    use tempfile::tempdir;

    fn make_table(name: &str, rows: &[(&str, Group)]) -> MeasurementTable {
        let mut table = MeasurementTable::new(name);
        for (id, group) in rows {
            table.insert(MeasurementRow {
                identifier: id.to_string(),
                description: format!("Protein {}", id),
                group_a_mean: 60_000.0,
                group_b_mean: 120_000.0,
                anova_p: 0.01,
                highest_mean_group: *group,
            });
        }
        table
    }

    fn make_cohort() -> Cohort {
        let mut s1 = Subtype::new("Subtype1");
        s1.add_condition(make_table(
            "Condition1",
            &[("P1", Group::B), ("P2", Group::A), ("P3", Group::B)],
        ));
        s1.add_condition(make_table("Condition2", &[("P2", Group::A), ("P4", Group::B)]));

        let mut s2 = Subtype::new("Subtype2");
        s2.add_condition(make_table("Condition1", &[("P3", Group::B)]));

        let mut cohort = Cohort::new("Type");
        cohort.add_subtype(s1);
        cohort.add_subtype(s2);
        cohort
    }

    #[test]
    fn test_compare_within_subtype() {
        let cohort = make_cohort();
        let comparison =
            compare_within_subtype(&cohort, "Subtype1", "Condition1", "Condition2").unwrap();
        assert_eq!(comparison.accepted.len(), 2);
        assert!(comparison.accepted.contains("P1"));
        assert!(comparison.accepted.contains("P3"));
    }

    #[test]
    fn test_unknown_names_fail() {
        let cohort = make_cohort();
        assert!(compare_within_subtype(&cohort, "Subtype9", "Condition1", "Condition2").is_err());
        assert!(compare_within_subtype(&cohort, "Subtype1", "Condition9", "Condition2").is_err());
    }

    #[test]
    fn test_self_comparison_rejected() {
        let mut cohort = make_cohort();
        let mut ledger = DiscardLedger::new();
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.tsv");

        let result = find_diagnosis_biomarkers(
            &mut cohort,
            "Subtype1",
            "Condition1",
            "Condition2",
            &["Subtype1".to_string()],
            &["Condition1".to_string()],
            &mut ledger,
            Some(&out),
        );
        assert!(matches!(result, Err(BiomarkerError::InvalidComparison(_))));
        assert!(!out.exists());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_diagnosis_two_stages() {
        let mut cohort = make_cohort();
        let mut ledger = DiscardLedger::new();
        let dir = tempdir().unwrap();
        let out = dir.path().join("diagnosis.tsv");

        let summary = find_diagnosis_biomarkers(
            &mut cohort,
            "Subtype1",
            "Condition1",
            "Condition2",
            &["Subtype2".to_string()],
            &["Condition1".to_string()],
            &mut ledger,
            Some(&out),
        )
        .unwrap();

        // Stage A drops P2 (shared down with Condition2); stage B drops P3
        // (shared up with Subtype2 Condition1); P1 survives.
        assert_eq!(summary.n_stage_a, Some(2));
        assert_eq!(summary.n_accepted, 1);
        assert_eq!(summary.n_discarded, 2);

        let registered = cohort
            .subtype("Subtype1")
            .unwrap()
            .biomarkers("Condition1")
            .unwrap();
        assert!(registered.contains("P1"));

        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.contains("P1"));
        assert!(!content.contains("P3"));
    }

    #[test]
    fn test_diagnosis_writes_empty_report() {
        let mut cohort = make_cohort();
        // Make every row of interest explainable elsewhere.
        cohort
            .subtype_mut("Subtype2")
            .unwrap()
            .add_condition(make_table(
                "Condition2",
                &[("P1", Group::B), ("P3", Group::B)],
            ));

        let mut ledger = DiscardLedger::new();
        let dir = tempdir().unwrap();
        let out = dir.path().join("diagnosis.tsv");

        let summary = find_diagnosis_biomarkers(
            &mut cohort,
            "Subtype1",
            "Condition1",
            "Condition2",
            &["Subtype2".to_string()],
            &["Condition1".to_string(), "Condition2".to_string()],
            &mut ledger,
            Some(&out),
        )
        .unwrap();

        assert_eq!(summary.n_accepted, 0);
        // header-only report still written
        let content = std::fs::read_to_string(&out).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_monitoring_suppresses_empty_output() {
        let mut cohort = make_cohort();
        // Subtype2 Condition1 reproduces every up-regulated row of interest.
        cohort
            .subtype_mut("Subtype2")
            .unwrap()
            .add_condition(make_table(
                "Condition2",
                &[("P1", Group::B), ("P2", Group::A), ("P3", Group::B)],
            ));

        let mut ledger = DiscardLedger::new();
        let dir = tempdir().unwrap();
        let out = dir.path().join("monitoring.tsv");

        let summary = find_monitoring_biomarkers(
            &mut cohort,
            "Subtype1",
            "Condition1",
            &["Subtype2".to_string()],
            &["Condition1".to_string(), "Condition2".to_string()],
            &mut ledger,
            Some(&out),
        )
        .unwrap();

        assert_eq!(summary.n_accepted, 0);
        assert!(summary.report.is_none());
        assert!(!out.exists());
    }

    #[test]
    fn test_monitoring_single_stage() {
        let mut cohort = make_cohort();
        let mut ledger = DiscardLedger::new();
        let dir = tempdir().unwrap();
        let out = dir.path().join("monitoring.tsv");

        let summary = find_monitoring_biomarkers(
            &mut cohort,
            "Subtype1",
            "Condition1",
            &["Subtype2".to_string()],
            &["Condition1".to_string()],
            &mut ledger,
            Some(&out),
        )
        .unwrap();

        // No within-subtype stage: P2 is never compared against Condition2,
        // only P3 is explained away by Subtype2.
        assert_eq!(summary.n_stage_a, None);
        assert_eq!(summary.n_accepted, 2);
        assert!(out.exists());
        let registered = cohort
            .subtype("Subtype1")
            .unwrap()
            .biomarkers("Condition1")
            .unwrap();
        assert!(registered.contains("P1"));
        assert!(registered.contains("P2"));
    }

    #[test]
    fn test_determinism() {
        let cohort = make_cohort();
        let a = compare_within_subtype(&cohort, "Subtype1", "Condition1", "Condition2").unwrap();
        let b = compare_within_subtype(&cohort, "Subtype1", "Condition1", "Condition2").unwrap();
        assert_eq!(a.accepted.sorted_identifiers(), b.accepted.sorted_identifiers());
        assert_eq!(a.discarded.len(), b.discarded.len());
    }
}
