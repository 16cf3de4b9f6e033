//! Ingestion of measurement exports into the cohort model.

mod loader;
mod reader;

pub use loader::load_cohort;
pub use reader::{read_measurement_table, ABUNDANCE_FLOOR, P_VALUE_CUTOFF};
