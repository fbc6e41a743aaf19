use crate::error::BasketSyncError;

pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> Result<i64, BasketSyncError>;
}
