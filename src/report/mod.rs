//! Report output for biomarker and discard tables.

mod writer;

pub use writer::{append_discards, default_biomarker_path, write_biomarkers};
