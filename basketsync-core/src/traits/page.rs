use std::rc::Rc;

use crate::error::BasketSyncError;

/// Raw content of one rendered basket row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketRow {
    /// Text content of the SKU cell.
    pub sku: String,
    /// Value of the quantity input.
    pub qty: String,
}

impl BasketRow {
    pub fn new(sku: impl Into<String>, qty: impl Into<String>) -> Self {
        Self { sku: sku.into(), qty: qty.into() }
    }
}

/// Click callback installed on delete buttons.
pub type DeleteHandler = Rc<dyn Fn()>;

/// Read-only view of the rendered page plus the two side effects the
/// reconciler needs from it (navigation and handler attachment).
pub trait BasketPage {
    /// Whether the page root carries the basket page marker class.
    fn is_basket_page(&self) -> Result<bool, BasketSyncError>;

    /// Every rendered basket row, in document order.
    fn basket_rows(&self) -> Result<Vec<BasketRow>, BasketSyncError>;

    /// Text shown in the quick cart header's item count.
    fn header_item_count(&self) -> Result<String, BasketSyncError>;

    /// Send the browser to another path on the same site.
    fn navigate(&self, path: &str) -> Result<(), BasketSyncError>;

    /// Install `handler` on every delete button. Returns how many buttons
    /// received it.
    fn attach_delete_handler(&self, handler: DeleteHandler) -> Result<usize, BasketSyncError>;
}
