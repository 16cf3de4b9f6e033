//! Candidate protein biomarker discovery from differential-expression tables.
//!
//! Measurements are organized into a three-level hierarchy: a cohort (e.g. a
//! disease type), subtypes within it, and experimental conditions within each
//! subtype. For a condition of interest, the library decides which protein
//! identifiers are uniquely or divergently expressed relative to one or more
//! comparison conditions, optionally drawn from other subtypes of the same
//! cohort.
//!
//! # Overview
//!
//! - **data**: measurement rows and tables, and the Cohort → Subtype →
//!   Condition hierarchy
//! - **ingest**: CSV ingestion and directory-driven cohort discovery
//! - **compare**: the comparison engine partitioning a condition into
//!   potential biomarkers and explained-away discards
//! - **flow**: the basic, diagnosis, and monitoring discovery flows
//! - **reconcile**: the per-run discard ledger and the reconciler deciding
//!   which discards stay visible in reports
//! - **report**: TSV report output
//!
//! # Example
//!
//! ```no_run
//! use biomarker_discovery::prelude::*;
//!
//! let mut cohort = load_cohort("data/NSCLC").unwrap();
//! let mut ledger = DiscardLedger::new();
//! let summary = find_diagnosis_biomarkers(
//!     &mut cohort,
//!     "Subtype1",
//!     "Condition1",
//!     "Condition2",
//!     &["Subtype2".to_string()],
//!     &["Condition1".to_string(), "Condition2".to_string()],
//!     &mut ledger,
//!     None,
//! )
//! .unwrap();
//! println!("{}", summary);
//! ```

pub mod compare;
pub mod data;
pub mod error;
pub mod flow;
pub mod ingest;
pub mod reconcile;
pub mod report;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::compare::{compare, Comparison, DiscardRecord};
    pub use crate::data::{Cohort, Direction, Group, MeasurementRow, MeasurementTable, Subtype};
    pub use crate::error::{BiomarkerError, Result};
    pub use crate::flow::{
        compare_within_subtype, find_diagnosis_biomarkers, find_monitoring_biomarkers,
        run_basic_comparison, DiscoverySummary,
    };
    pub use crate::ingest::{load_cohort, read_measurement_table, ABUNDANCE_FLOOR, P_VALUE_CUTOFF};
    pub use crate::reconcile::{reconcile, DiscardLedger, LedgerKey};
    pub use crate::report::{append_discards, default_biomarker_path, write_biomarkers};
}
