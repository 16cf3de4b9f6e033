//! Directory-driven discovery of a cohort's subtype/condition structure.

use crate::data::{Cohort, Subtype};
use crate::error::{BiomarkerError, Result};
use crate::ingest::reader::read_measurement_table;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

fn sorted_entries(dir: &Path, keep_dirs: bool) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .filter(|p| p.is_dir() == keep_dirs)
        .collect();
    entries.sort();
    Ok(entries)
}

fn name_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Load a cohort from its root directory.
///
/// Each subdirectory of the root is a subtype; each `*.csv` file inside a
/// subtype directory is one condition, named by its file stem. Condition
/// tables are mutually independent, so they are built in parallel.
pub fn load_cohort<P: AsRef<Path>>(root: P) -> Result<Cohort> {
    let root = root.as_ref();
    let subtype_dirs = sorted_entries(root, true)?;
    if subtype_dirs.is_empty() {
        return Err(BiomarkerError::EmptyData(format!(
            "no subtype directories under {}",
            root.display()
        )));
    }

    let mut cohort = Cohort::new(&name_of(root));
    for dir in subtype_dirs {
        let files: Vec<PathBuf> = sorted_entries(&dir, false)?
            .into_iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
            .collect();

        let tables = files
            .par_iter()
            .map(|file| read_measurement_table(file, &name_of(file)))
            .collect::<Result<Vec<_>>>()?;

        let mut subtype = Subtype::new(&name_of(&dir));
        for table in tables {
            subtype.add_condition(table);
        }
        cohort.add_subtype(subtype);
    }
    Ok(cohort)
}
