use chrono::Utc;

use basketsync_core::error::BasketSyncError;
use basketsync_core::traits::clock::Clock;

/// Native Clock implementation using the system time.
pub struct NativeClock;

impl NativeClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for NativeClock {
    fn now_millis(&self) -> Result<i64, BasketSyncError> {
        Ok(Utc::now().timestamp_millis())
    }
}
