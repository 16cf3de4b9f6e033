//! Comparison engine partitioning a condition's rows into potential
//! biomarkers and explained-away discards.

mod engine;

pub use engine::{compare, Comparison, DiscardRecord};
