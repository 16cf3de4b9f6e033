//! The comparison engine: partition a condition's rows into potential
//! biomarkers and rows explained away by a comparison table.

use crate::data::{MeasurementRow, MeasurementTable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A row removed from candidacy, tagged with the condition that explained it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscardRecord {
    pub row: MeasurementRow,
    /// Name of the comparison table whose matching direction caused the discard.
    pub context: String,
}

/// Output of one comparison: accepted and discarded rows partition the input.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Potential biomarkers: rows found nowhere else, or found elsewhere only
    /// with the opposite direction of change.
    pub accepted: MeasurementTable,
    /// Rows whose direction was reproduced by some comparison table.
    pub discarded: Vec<DiscardRecord>,
}

/// What a comparison table says about one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirectionEvidence {
    /// Identifier not present in the table; not evidence either way.
    Absent,
    /// Present with the same direction of change.
    Matches,
    /// Present with the opposite direction of change.
    Differs,
}

fn evidence_for(row: &MeasurementRow, other: &MeasurementTable) -> DirectionEvidence {
    match other.get(&row.identifier) {
        None => DirectionEvidence::Absent,
        Some(other_row) if other_row.direction() == row.direction() => DirectionEvidence::Matches,
        Some(_) => DirectionEvidence::Differs,
    }
}

/// Partition `condition_of_interest` against one or more comparison tables.
///
/// A row whose identifier appears in no comparison table is accepted outright.
/// A shared row is checked against each comparison table in order and is
/// discarded on the first table that reproduces its direction of change;
/// tables that lack the identifier are skipped. A shared row whose direction
/// is never reproduced is accepted: its signal is specific to the condition
/// of interest.
///
/// With an empty `others` every row is accepted; with an empty input both
/// outputs are empty.
pub fn compare(condition_of_interest: &MeasurementTable, others: &[&MeasurementTable]) -> Comparison {
    let elsewhere: HashSet<&str> = others
        .iter()
        .flat_map(|t| t.iter().map(|r| r.identifier.as_str()))
        .collect();

    let mut accepted = MeasurementTable::new(condition_of_interest.name());
    let mut discarded = Vec::new();

    for row in condition_of_interest.iter() {
        if !elsewhere.contains(row.identifier.as_str()) {
            accepted.insert(row.clone());
            continue;
        }

        let mut matched_in: Option<&str> = None;
        for other in others {
            match evidence_for(row, other) {
                DirectionEvidence::Matches => {
                    matched_in = Some(other.name());
                    break;
                }
                DirectionEvidence::Absent | DirectionEvidence::Differs => {}
            }
        }

        match matched_in {
            Some(context) => discarded.push(DiscardRecord {
                row: row.clone(),
                context: context.to_string(),
            }),
            None => {
                accepted.insert(row.clone());
            }
        }
    }

    Comparison { accepted, discarded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Group;
    use std::collections::HashSet;

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

    // Group::B rows read as "up", Group::A rows as "down".
    #[test]
    fn test_unique_identifiers_accepted() {
        let interest = make_table("X", &[("P1", Group::B), ("P2", Group::A)]);
        let other = make_table("Y", &[("P9", Group::B)]);

        let result = compare(&interest, &[&other]);
        assert_eq!(result.accepted.len(), 2);
        assert!(result.discarded.is_empty());
    }

    #[test]
    fn test_matching_direction_discarded() {
        let interest = make_table("X", &[("P1", Group::B)]);
        let other = make_table("Y", &[("P1", Group::B)]);

        let result = compare(&interest, &[&other]);
        assert!(result.accepted.is_empty());
        assert_eq!(result.discarded.len(), 1);
        assert_eq!(result.discarded[0].context, "Y");
    }

    #[test]
    fn test_differing_direction_accepted() {
        let interest = make_table("X", &[("P1", Group::B)]);
        let other = make_table("Y", &[("P1", Group::A)]);

        let result = compare(&interest, &[&other]);
        assert_eq!(result.accepted.len(), 1);
        assert!(result.discarded.is_empty());
    }

    #[test]
    fn test_short_circuit_tags_first_match() {
        let interest = make_table("X", &[("P1", Group::B)]);
        let differs = make_table("Y1", &[("P1", Group::A)]);
        let matches_first = make_table("Y2", &[("P1", Group::B)]);
        let matches_second = make_table("Y3", &[("P1", Group::B)]);

        let result = compare(&interest, &[&differs, &matches_first, &matches_second]);
        assert_eq!(result.discarded.len(), 1);
        assert_eq!(result.discarded[0].context, "Y2");
    }

    #[test]
    fn test_partition_invariant() {
        let interest = make_table(
            "X",
            &[
                ("P1", Group::B),
                ("P2", Group::A),
                ("P3", Group::B),
                ("P4", Group::A),
            ],
        );
        let other1 = make_table("Y1", &[("P2", Group::A), ("P3", Group::A)]);
        let other2 = make_table("Y2", &[("P4", Group::B), ("P3", Group::B)]);

        let result = compare(&interest, &[&other1, &other2]);

        let mut seen: HashSet<String> = result
            .accepted
            .iter()
            .map(|r| r.identifier.clone())
            .collect();
        for record in &result.discarded {
            // no identifier lands on both sides
            assert!(seen.insert(record.row.identifier.clone()));
        }
        let all: HashSet<String> = interest.iter().map(|r| r.identifier.clone()).collect();
        assert_eq!(seen, all);
    }

    #[test]
    fn test_flow_diagram_example() {
        // X = {P1:up, P2:down, P3:up}, Y = {P2:down, P4:up}
        let interest = make_table("X", &[("P1", Group::B), ("P2", Group::A), ("P3", Group::B)]);
        let other = make_table("Y", &[("P2", Group::A), ("P4", Group::B)]);

        let result = compare(&interest, &[&other]);
        assert!(result.accepted.contains("P1"));
        assert!(result.accepted.contains("P3"));
        assert_eq!(result.accepted.len(), 2);
        assert_eq!(result.discarded.len(), 1);
        assert_eq!(result.discarded[0].row.identifier, "P2");
    }

    #[test]
    fn test_empty_others_accepts_everything() {
        let interest = make_table("X", &[("P1", Group::B), ("P2", Group::A)]);
        let result = compare(&interest, &[]);
        assert_eq!(result.accepted.len(), 2);
        assert!(result.discarded.is_empty());
    }

    #[test]
    fn test_empty_interest() {
        let interest = make_table("X", &[]);
        let other = make_table("Y", &[("P1", Group::B)]);
        let result = compare(&interest, &[&other]);
        assert!(result.accepted.is_empty());
        assert!(result.discarded.is_empty());
    }
}
