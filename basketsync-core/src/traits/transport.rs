use async_trait::async_trait;

use crate::basket::ItemFields;
use crate::error::BasketSyncError;
use crate::sync::QuickCartResponse;

#[async_trait(?Send)]
pub trait CartTransport {
    /// POST one item's fields as a form to `endpoint` and decode the quick
    /// cart summary.
    async fn quick_add(
        &self,
        endpoint: &str,
        fields: &ItemFields,
    ) -> Result<QuickCartResponse, BasketSyncError>;
}
