//! A single protein's differential-expression observation in one condition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Replicate group label. Group A is the control-like group, Group B the
/// comparison group, matching the column layout of the measurement exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
}

impl Group {
    /// Parse the "Highest mean condition" field ("Group A" / "Group B").
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Group A" | "A" => Some(Group::A),
            "Group B" | "B" => Some(Group::B),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Group::A => "Group A",
            Group::B => "Group B",
        }
    }
}

/// Direction of regulation relative to Group A. A row whose highest mean sits
/// in Group A is down-regulated in the comparison group, otherwise up-regulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One protein's observation in one condition.
///
/// Rows are produced by ingestion, which has already applied the data-contract
/// filters: no missing fields, `anova_p < 0.05`, and at least one group mean at
/// or above the abundance floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    /// Canonical protein key: the accession text before its first semicolon.
    pub identifier: String,
    /// Free-text description from the export (typically UniProt style).
    pub description: String,
    /// Mean abundance across Group A replicates.
    pub group_a_mean: f64,
    /// Mean abundance across Group B replicates.
    pub group_b_mean: f64,
    /// Anova significance for the A/B contrast.
    pub anova_p: f64,
    /// Which replicate group carries the larger mean.
    pub highest_mean_group: Group,
}

impl MeasurementRow {
    /// Direction of change, the sole signal the comparison engine reasons about.
    pub fn direction(&self) -> Direction {
        match self.highest_mean_group {
            Group::A => Direction::Down,
            Group::B => Direction::Up,
        }
    }

    /// log2(B mean) - log2(A mean), the fold change reported alongside a hit.
    ///
    /// The abundance floor only requires one group mean to clear it, so the
    /// other can legitimately be 0 (absent in every replicate); the fold
    /// change is then infinite and reports print it as `inf`/`-inf` rather
    /// than masking the on/off signal with a clamp.
    pub fn log2_fold_change(&self) -> f64 {
        self.group_b_mean.log2() - self.group_a_mean.log2()
    }

    /// Human-readable gene name, taken from the `GN=` token of the description
    /// when present, otherwise the identifier itself.
    pub fn gene_name(&self) -> &str {
        for token in self.description.split_whitespace() {
            if let Some(name) = token.strip_prefix("GN=") {
                if !name.is_empty() {
                    return name;
                }
            }
        }
        &self.identifier
    }

    /// Reduce a raw accession field to its canonical identifier: the export may
    /// list several accessions separated by semicolons, only the first is kept.
    pub fn canonical_identifier(raw: &str) -> &str {
        raw.split(';').next().unwrap_or(raw).trim()
    }
}
