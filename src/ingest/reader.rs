//! Parse one condition's measurement export into a table.
//!
//! Expected format: a CSV export with one row per protein. Required columns
//! are `Accession`, `Description`, `Anova (p)`, and `Highest mean condition`;
//! replicate abundance columns are recognized by headers starting with
//! `Group A` or `Group B` (the export carries a variable number of replicates
//! per group).

use crate::data::{Group, MeasurementRow, MeasurementTable};
use crate::error::{BiomarkerError, Result};
use std::path::Path;

/// Rows are retained only below this Anova significance cutoff.
pub const P_VALUE_CUTOFF: f64 = 0.05;

/// Rows where both group means fall below this abundance are treated as
/// absolute low-signal and dropped.
pub const ABUNDANCE_FLOOR: f64 = 50_000.0;

const COL_ACCESSION: &str = "Accession";
const COL_DESCRIPTION: &str = "Description";
const COL_ANOVA: &str = "Anova (p)";
const COL_HIGHEST_MEAN: &str = "Highest mean condition";

struct ColumnLayout {
    accession: usize,
    description: usize,
    anova: usize,
    highest_mean: usize,
    group_a: Vec<usize>,
    group_b: Vec<usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| BiomarkerError::MissingColumn(name.to_string()))
        };

        let group_a: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.trim_start().starts_with("Group A"))
            .map(|(i, _)| i)
            .collect();
        let group_b: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.trim_start().starts_with("Group B"))
            .map(|(i, _)| i)
            .collect();

        if group_a.is_empty() {
            return Err(BiomarkerError::MissingColumn("Group A replicates".to_string()));
        }
        if group_b.is_empty() {
            return Err(BiomarkerError::MissingColumn("Group B replicates".to_string()));
        }

        Ok(Self {
            accession: find(COL_ACCESSION)?,
            description: find(COL_DESCRIPTION)?,
            anova: find(COL_ANOVA)?,
            highest_mean: find(COL_HIGHEST_MEAN)?,
            group_a,
            group_b,
        })
    }
}

fn mean_of(record: &csv::StringRecord, columns: &[usize]) -> Option<f64> {
    let mut sum = 0.0;
    for &col in columns {
        let value: f64 = record.get(col)?.trim().parse().ok()?;
        sum += value;
    }
    Some(sum / columns.len() as f64)
}

/// Build one row from a record, or None when the row fails the data contract
/// (missing or unparsable fields, p-value cutoff, abundance floor). Dropping
/// such rows is data cleaning, not an error.
fn parse_row(record: &csv::StringRecord, layout: &ColumnLayout) -> Option<MeasurementRow> {
    let accession = record.get(layout.accession)?.trim();
    if accession.is_empty() {
        return None;
    }
    let identifier = MeasurementRow::canonical_identifier(accession).to_string();
    if identifier.is_empty() {
        return None;
    }

    let description = record.get(layout.description)?.trim().to_string();
    if description.is_empty() {
        return None;
    }

    let anova_p: f64 = record.get(layout.anova)?.trim().parse().ok()?;
    if !(anova_p < P_VALUE_CUTOFF) {
        return None;
    }

    let group_a_mean = mean_of(record, &layout.group_a)?;
    let group_b_mean = mean_of(record, &layout.group_b)?;
    if group_a_mean < ABUNDANCE_FLOOR && group_b_mean < ABUNDANCE_FLOOR {
        return None;
    }

    let highest_mean_group = Group::parse(record.get(layout.highest_mean)?)?;

    Some(MeasurementRow {
        identifier,
        description,
        group_a_mean,
        group_b_mean,
        anova_p,
        highest_mean_group,
    })
}

/// Read a condition's CSV export into a measurement table.
///
/// Applies the ingestion-time contract: rows with missing values are dropped,
/// only `Anova (p) < 0.05` rows are kept, rows with both group means below the
/// abundance floor are dropped, and the identifier is the accession text
/// before its first semicolon (first occurrence wins on duplicates).
pub fn read_measurement_table<P: AsRef<Path>>(
    path: P,
    condition_name: &str,
) -> Result<MeasurementTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;
    let layout = ColumnLayout::from_headers(reader.headers()?)?;

    let mut table = MeasurementTable::new(condition_name);
    for record in reader.records() {
        let record = record?;
        if let Some(row) = parse_row(&record, &layout) {
            table.insert(row);
        }
    }
    Ok(table)
}
