//! Discard bookkeeping and reconciliation.

mod ledger;
mod reconciler;

pub use ledger::{DiscardLedger, LedgerKey};
pub use reconciler::reconcile;
