use crate::error::BasketSyncError;

/// The quick cart header: item count and total value.
pub trait HeaderDisplay {
    fn set_item_count(&self, text: &str) -> Result<(), BasketSyncError>;
    fn set_total_value(&self, text: &str) -> Result<(), BasketSyncError>;
}
