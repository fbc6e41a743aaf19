//! Platform-independent basket/cookie reconciliation.
//!
//! The page-rendered basket and the snapshot cookie are compared here so that
//! the browser (WASM) and native clients share identical behavior. Every
//! platform concern (cookies, DOM, network, time, task spawning) is reached
//! through the traits in [`traits`].

pub mod error;
pub mod constants;
pub mod config;
pub mod traits;
pub mod basket;
pub mod cookie;
pub mod sync;
pub mod reconciler;
pub mod bootstrap;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ReconcilerConfig;
pub use error::{BasketSyncError, Result};
pub use reconciler::{BasketReconciler, Platform};
