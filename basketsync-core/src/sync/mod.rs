//! Reconciliation of page basket vs. cookie, and the per-item server sync.

pub mod response;
pub mod quick_add;
pub mod reconcile;

pub use quick_add::{add_items_to_basket, QuickAddBatch};
pub use reconcile::{decide, reconcile, Decision, ReconcileOutcome};
pub use response::QuickCartResponse;
