//! Per-run record of discarded rows, keyed by comparison context.

use crate::compare::DiscardRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Composite key naming the analysis a discard set belongs to. A struct key
/// rather than concatenated names, so "AB"+"C" and "A"+"BC" never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerKey {
    pub subtype: String,
    pub condition: String,
}

impl LedgerKey {
    pub fn new(subtype: &str, condition: &str) -> Self {
        Self {
            subtype: subtype.to_string(),
            condition: condition.to_string(),
        }
    }
}

/// Accumulates the discard sets produced while a flow runs, grouped first by
/// the (subtype, condition) under analysis and then by the comparison context
/// (the other condition name) that produced them. Transient: built during a
/// run, consumed once by the reconciler, never persisted.
#[derive(Debug, Clone, Default)]
pub struct DiscardLedger {
    entries: HashMap<LedgerKey, HashMap<String, Vec<DiscardRecord>>>,
}

impl DiscardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record discards for one analysis under one comparison context.
    /// Repeated records under the same context accumulate.
    pub fn record(&mut self, key: LedgerKey, records: Vec<DiscardRecord>) {
        let by_context = self.entries.entry(key).or_default();
        for record in records {
            by_context
                .entry(record.context.clone())
                .or_default()
                .push(record);
        }
    }

    /// All discard records for one analysis, across every comparison context,
    /// in deterministic (context-sorted) order.
    pub fn records_for(&self, key: &LedgerKey) -> Vec<&DiscardRecord> {
        let Some(by_context) = self.entries.get(key) else {
            return Vec::new();
        };
        let mut contexts: Vec<&String> = by_context.keys().collect();
        contexts.sort_unstable();
        contexts
            .into_iter()
            .flat_map(|c| by_context[c].iter())
            .collect()
    }

    /// Analysis keys present in the ledger, in deterministic order.
    pub fn keys(&self) -> Vec<&LedgerKey> {
        let mut keys: Vec<&LedgerKey> = self.entries.keys().collect();
        keys.sort_unstable_by(|a, b| {
            (&a.subtype, &a.condition).cmp(&(&b.subtype, &b.condition))
        });
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
