//! Data structures for biomarker discovery.

mod cohort;
mod measurement;
mod table;

pub use cohort::{Cohort, Subtype};
pub use measurement::{Direction, Group, MeasurementRow};
pub use table::MeasurementTable;
