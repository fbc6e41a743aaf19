use basketsync_core::error::BasketSyncError;
use basketsync_core::traits::clock::Clock;

/// WASM-compatible clock using `js_sys::Date::now()`.
///
/// `Date.now()` is an f64 of whole milliseconds since the Unix epoch.
pub struct WasmClock;

impl WasmClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WasmClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WasmClock {
    fn now_millis(&self) -> Result<i64, BasketSyncError> {
        let ms = js_sys::Date::now();
        if !ms.is_finite() {
            return Err(BasketSyncError::Platform(format!("Date.now() returned {ms}")));
        }
        Ok(ms as i64)
    }
}
