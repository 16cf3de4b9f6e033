//! TSV report output for accepted biomarkers and reconciled discards.

use crate::compare::DiscardRecord;
use crate::data::{MeasurementRow, MeasurementTable};
use crate::error::Result;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const HEADER: &str =
    "gene_name\tidentifier\tlog2_fold_change\tanova_p\tdirection\thighest_mean_group\tdescription";

fn write_row<W: Write>(writer: &mut W, row: &MeasurementRow) -> Result<()> {
    writeln!(
        writer,
        "{}\t{}\t{:.4}\t{:.4e}\t{}\t{}\t{}",
        row.gene_name(),
        row.identifier,
        row.log2_fold_change(),
        row.anova_p,
        row.direction(),
        row.highest_mean_group.name(),
        row.description
    )?;
    Ok(())
}

/// Conventional output path for a condition's biomarker report when the
/// caller gives none.
pub fn default_biomarker_path(subtype_name: &str, condition_name: &str) -> PathBuf {
    PathBuf::from(format!("{}_{}_biomarkers.tsv", subtype_name, condition_name))
}

/// Write an accepted-biomarker table to one file, creating or truncating it.
///
/// Rows are sorted by identifier so unchanged inputs produce byte-identical
/// files. An empty table still produces a header-only file.
pub fn write_biomarkers<P: AsRef<Path>>(table: &MeasurementTable, path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", HEADER)?;
    for row in table.sorted_rows() {
        write_row(&mut writer, row)?;
    }
    Ok(())
}

/// Append reconciled discards to a running discard report.
///
/// Successive reconciliation contexts share one file: the header is written
/// only when the file is first created. Records are sorted by identifier
/// within each call.
pub fn append_discards<P: AsRef<Path>>(records: &[DiscardRecord], path: P) -> Result<()> {
    let existed = path.as_ref().exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);

    if !existed {
        writeln!(writer, "{}\tdiscarded_by", HEADER)?;
    }

    let mut sorted: Vec<&DiscardRecord> = records.iter().collect();
    sorted.sort_unstable_by(|a, b| a.row.identifier.cmp(&b.row.identifier));
    for record in sorted {
        writeln!(
            writer,
            "{}\t{}\t{:.4}\t{:.4e}\t{}\t{}\t{}\t{}",
            record.row.gene_name(),
            record.row.identifier,
            record.row.log2_fold_change(),
            record.row.anova_p,
            record.row.direction(),
            record.row.highest_mean_group.name(),
            record.row.description,
            record.context
        )?;
    }
    Ok(())
}
