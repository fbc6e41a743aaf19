//! DOM adapters for the rendered basket and the quick cart header.

pub mod page;
pub mod header;

pub use header::DomHeaderDisplay;
pub use page::DomBasketPage;

use web_sys::{Document, Element};

use basketsync_core::error::BasketSyncError;

/// `document.querySelector` that treats "no match" as a DOM error.
pub(crate) fn require_element(document: &Document, selector: &str) -> Result<Element, BasketSyncError> {
    document
        .query_selector(selector)
        .map_err(|e| BasketSyncError::Dom(format!("invalid selector {selector}: {:?}", e)))?
        .ok_or_else(|| BasketSyncError::Dom(format!("no element matches {selector}")))
}
