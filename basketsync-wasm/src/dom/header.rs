use web_sys::Document;

use basketsync_core::constants::{HEADER_ITEMS_SELECTOR, HEADER_VALUE_SELECTOR};
use basketsync_core::error::BasketSyncError;
use basketsync_core::traits::display::HeaderDisplay;

use crate::dom::require_element;

/// Writes quick-add summaries into the quick cart header.
///
/// Elements are looked up on every write so a header re-rendered by the page
/// is still found.
pub struct DomHeaderDisplay {
    document: Document,
}

impl DomHeaderDisplay {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl HeaderDisplay for DomHeaderDisplay {
    fn set_item_count(&self, text: &str) -> Result<(), BasketSyncError> {
        require_element(&self.document, HEADER_ITEMS_SELECTOR)?.set_text_content(Some(text));
        Ok(())
    }

    fn set_total_value(&self, text: &str) -> Result<(), BasketSyncError> {
        require_element(&self.document, HEADER_VALUE_SELECTOR)?.set_text_content(Some(text));
        Ok(())
    }
}
