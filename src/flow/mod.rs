//! Discovery flows composing comparison, reconciliation, and reporting.

mod discovery;

pub use discovery::{
    compare_within_subtype, find_diagnosis_biomarkers, find_monitoring_biomarkers,
    run_basic_comparison, DiscoverySummary,
};
